// src/controllers/signup.rs
use super::login::auth_error_message;
use crate::app::AppContext;
use crate::app_log;
use crate::error::{ClientError, ClientResult};
use crate::scope::ScreenScope;
use crate::types::user::SignupRequest;
use crate::types::Role;
use crate::utils::looks_like_email;

const SIGNUP_FAILED: &str = "Signup failed. Please try again.";

pub struct SignupController {
    ctx: AppContext,
    scope: ScreenScope,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub show_password: bool,
    pub submitted: bool,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl SignupController {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            scope: ScreenScope::new(),
            name: String::new(),
            email: String::new(),
            password: String::new(),
            role: Role::Seeker,
            show_password: false,
            submitted: false,
            is_loading: false,
            error_message: None,
        }
    }

    pub fn select_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Every failing field, in form order.
    pub fn field_errors(&self) -> Vec<&'static str> {
        let mut errors = Vec::new();
        if self.name.trim().chars().count() < 2 {
            errors.push("Name must be at least 2 characters");
        }
        if !looks_like_email(&self.email) {
            errors.push("Please enter a valid email address");
        }
        if self.password.chars().count() < 6 {
            errors.push("Password must be at least 6 characters");
        }
        errors
    }

    pub async fn submit(&mut self) -> ClientResult<Option<&'static str>> {
        self.submitted = true;
        if let Some(first) = self.field_errors().first() {
            app_log!(warn, "Signup form invalid: {}", first);
            self.error_message = Some(first.to_string());
            return Ok(None);
        }

        self.is_loading = true;
        self.error_message = None;

        let request = SignupRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role,
        };
        let result = self.scope.guard(self.ctx.services.auth.signup(&request)).await;
        if matches!(result, Err(ClientError::Cancelled)) {
            return Err(ClientError::Cancelled);
        }
        self.is_loading = false;

        match result {
            Ok(envelope) if envelope.success => Ok(Some(self.role.dashboard_path())),
            Ok(envelope) => {
                self.error_message = Some(envelope.message_or(SIGNUP_FAILED));
                Ok(None)
            }
            Err(e) => {
                app_log!(error, "Signup error: {}", e);
                self.error_message = Some(auth_error_message(&e, SIGNUP_FAILED));
                Ok(None)
            }
        }
    }
}

impl Drop for SignupController {
    fn drop(&mut self) {
        self.scope.close();
    }
}
