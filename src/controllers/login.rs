// src/controllers/login.rs
use crate::app::AppContext;
use crate::app_log;
use crate::error::{ClientError, ClientResult};
use crate::scope::ScreenScope;
use crate::types::user::LoginRequest;
use crate::utils::looks_like_email;

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

pub struct LoginController {
    ctx: AppContext,
    scope: ScreenScope,
    pub email: String,
    pub password: String,
    pub show_password: bool,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl LoginController {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            scope: ScreenScope::new(),
            email: String::new(),
            password: String::new(),
            show_password: false,
            is_loading: false,
            error_message: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !looks_like_email(&self.email) {
            return Err("Please enter a valid email address".to_string());
        }
        if self.password.is_empty() {
            return Err("Password is required".to_string());
        }
        Ok(())
    }

    /// Returns the dashboard route to navigate to on success.
    pub async fn submit(&mut self) -> ClientResult<Option<&'static str>> {
        if let Err(message) = self.validate() {
            app_log!(warn, "Login form invalid: {}", message);
            self.error_message = Some(message);
            return Ok(None);
        }

        self.is_loading = true;
        self.error_message = None;

        let request = LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };
        let result = self.scope.guard(self.ctx.services.auth.login(&request)).await;
        if matches!(result, Err(ClientError::Cancelled)) {
            return Err(ClientError::Cancelled);
        }
        self.is_loading = false;

        match result {
            Ok(envelope) if envelope.success => match self.ctx.session.role() {
                Some(role) => Ok(Some(role.dashboard_path())),
                None => {
                    self.error_message = Some(envelope.message_or(LOGIN_FAILED));
                    Ok(None)
                }
            },
            Ok(envelope) => {
                self.error_message = Some(envelope.message_or(LOGIN_FAILED));
                Ok(None)
            }
            Err(e) => {
                app_log!(error, "Login error: {}", e);
                self.error_message = Some(auth_error_message(&e, LOGIN_FAILED));
                Ok(None)
            }
        }
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }
}

/// Server-provided message when there is one, else `fallback`.
pub(crate) fn auth_error_message(err: &ClientError, fallback: &str) -> String {
    match err {
        ClientError::Http { message, .. } if !message.trim().is_empty() => message.clone(),
        ClientError::Validation(message) => message.clone(),
        _ => fallback.to_string(),
    }
}

impl Drop for LoginController {
    fn drop(&mut self) {
        self.scope.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fail, ok, Harness};
    use serde_json::json;

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let h = Harness::signed_out();
        let mut login = LoginController::new(h.ctx.clone());
        login.email = "not-an-email".into();
        login.password = "x".into();

        assert_eq!(login.submit().await.unwrap(), None);
        assert!(login.error_message.is_some());
        assert_eq!(h.mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_success_routes_to_role_dashboard() {
        let h = Harness::signed_out();
        h.mock.push_json(
            200,
            ok(json!({"token": "t", "user": {"id": 2, "name": "Sam", "email": "sam@example.com", "role": "RECRUITER"}})),
        );
        let mut login = LoginController::new(h.ctx.clone());
        login.email = "sam@example.com".into();
        login.password = "recruiter123".into();

        assert_eq!(login.submit().await.unwrap(), Some("/dashboard/recruiter"));
        assert!(!login.is_loading);
    }

    #[tokio::test]
    async fn test_error_messages() {
        let h = Harness::signed_out();
        h.mock.push_json(401, fail(""));
        h.mock.push_failure("connection refused");
        let mut login = LoginController::new(h.ctx.clone());
        login.email = "sam@example.com".into();
        login.password = "wrong".into();

        login.submit().await.unwrap();
        assert_eq!(login.error_message.as_deref(), Some(LOGIN_FAILED));
        login.submit().await.unwrap();
        assert_eq!(login.error_message.as_deref(), Some(LOGIN_FAILED));
        assert!(!h.session.is_authenticated());
    }
}
