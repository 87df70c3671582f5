// src/controllers/recruiter_profile.rs
use crate::app::AppContext;
use crate::app_log;
use crate::error::{ClientError, ClientResult};
use crate::scope::ScreenScope;
use crate::types::recruiter_profile::{RecruiterInfo, EXPERIENCE_OPTIONS, LOCATION_OPTIONS, ROLE_OPTIONS};
use crate::types::{HiringPreferences, PreferenceGroup, RecruiterProfile, Role, User};
use crate::utils::avatar_or_placeholder;

/// Starting point for a recruiter who never saved a profile.
pub fn default_profile(user: &User) -> RecruiterProfile {
    RecruiterProfile {
        recruiter: RecruiterInfo {
            user_id: Some(user.id),
            name: user.name.clone(),
            email: user.email.clone(),
            ..Default::default()
        },
        company: Default::default(),
        preferences: HiringPreferences {
            roles: vec![ROLE_OPTIONS[0].to_string()],
            experience_levels: vec![EXPERIENCE_OPTIONS[1].to_string()],
            locations: vec![LOCATION_OPTIONS[0].to_string()],
            ..Default::default()
        },
    }
}

pub struct RecruiterProfileController {
    ctx: AppContext,
    scope: ScreenScope,
    pub profile: RecruiterProfile,
    pub is_editing: bool,
    pub is_loading: bool,
    pub is_saving: bool,
    pub error_message: Option<String>,
}

impl RecruiterProfileController {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            scope: ScreenScope::new(),
            profile: RecruiterProfile::default(),
            is_editing: false,
            is_loading: false,
            is_saving: false,
            error_message: None,
        }
    }

    pub async fn activate(&mut self) -> ClientResult<()> {
        let user = match self.ctx.session.require_role(Role::Recruiter) {
            Ok(user) => user,
            Err(e) => {
                self.error_message = Some(e.user_message());
                return Ok(());
            }
        };

        self.is_loading = true;
        let result = self
            .scope
            .guard(self.ctx.services.recruiter_profile.get_recruiter_profile(user.id))
            .await;
        if matches!(result, Err(ClientError::Cancelled)) {
            return Err(ClientError::Cancelled);
        }
        self.is_loading = false;

        self.profile = match result {
            Ok(envelope) if envelope.success => envelope
                .data
                .unwrap_or_else(|| default_profile(&user)),
            Ok(envelope) => {
                self.error_message = Some(envelope.message_or("Failed to load profile"));
                default_profile(&user)
            }
            Err(e) if e.is_not_found() => default_profile(&user),
            Err(e) => {
                app_log!(error, "Failed to load recruiter profile: {}", e);
                self.error_message = Some(e.user_message());
                default_profile(&user)
            }
        };
        Ok(())
    }

    pub fn toggle_edit(&mut self) {
        self.is_editing = !self.is_editing;
    }

    pub fn options(group: PreferenceGroup) -> &'static [&'static str] {
        match group {
            PreferenceGroup::Roles => &ROLE_OPTIONS,
            PreferenceGroup::ExperienceLevels => &EXPERIENCE_OPTIONS,
            PreferenceGroup::Locations => &LOCATION_OPTIONS,
        }
    }

    pub fn toggle_selection(&mut self, group: PreferenceGroup, item: &str) -> bool {
        self.profile.preferences.toggle(group, item)
    }

    pub fn is_selected(&self, group: PreferenceGroup, item: &str) -> bool {
        self.profile.preferences.is_selected(group, item)
    }

    pub fn avatar(&self) -> String {
        let seed = self.ctx.session.current_user().map(|u| u.id).unwrap_or_default();
        avatar_or_placeholder(&self.profile.recruiter.avatar_url, seed)
    }

    pub async fn save(&mut self) -> ClientResult<bool> {
        let user = match self.ctx.session.require_role(Role::Recruiter) {
            Ok(user) => user,
            Err(e) => {
                self.ctx.notifier.warning(e.user_message());
                return Ok(false);
            }
        };

        self.is_saving = true;
        let result = self
            .scope
            .guard(
                self.ctx
                    .services
                    .recruiter_profile
                    .save_recruiter_profile(user.id, &self.profile),
            )
            .await;
        if matches!(result, Err(ClientError::Cancelled)) {
            return Err(ClientError::Cancelled);
        }
        self.is_saving = false;

        match result {
            Ok(envelope) if envelope.success => {
                if let Some(saved) = envelope.data.clone() {
                    self.profile = saved;
                }
                self.is_editing = false;
                self.ctx
                    .notifier
                    .success(envelope.message_or("Profile saved successfully!"));
                Ok(true)
            }
            Ok(envelope) => {
                self.ctx.notifier.error(envelope.message_or("Failed to save profile"));
                Ok(false)
            }
            Err(e) => {
                app_log!(error, "Failed to save recruiter profile: {}", e);
                self.ctx.notifier.error(e.user_message());
                Ok(false)
            }
        }
    }
}

impl Drop for RecruiterProfileController {
    fn drop(&mut self) {
        self.scope.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::{Method, RequestBody};
    use crate::test_support::{ok, ok_message, Harness};
    use serde_json::json;

    #[tokio::test]
    async fn test_null_profile_seeds_defaults_from_session() {
        let h = Harness::signed_in(5, Role::Recruiter).await;
        h.mock.on(Method::Get, "/recruiter/profile/5", 200, json!({"success": true, "data": null}));

        let mut screen = RecruiterProfileController::new(h.ctx.clone());
        screen.activate().await.unwrap();

        assert_eq!(screen.profile.recruiter.name, "Ada Lovelace");
        assert!(screen.is_selected(PreferenceGroup::Roles, "Software Engineer"));
        assert!(screen.is_selected(PreferenceGroup::ExperienceLevels, "Mid Level"));
        assert!(screen.is_selected(PreferenceGroup::Locations, "Remote"));
        assert!(screen.error_message.is_none());
    }

    #[tokio::test]
    async fn test_toggle_and_save() {
        let h = Harness::signed_in(5, Role::Recruiter).await;
        h.mock.on(
            Method::Get,
            "/recruiter/profile/5",
            200,
            ok(json!({
                "recruiter": {"name": "Sarah"},
                "company": {"name": "TechCorp"},
                "preferences": {"roles": "Designer", "experienceLevels": "", "locations": "Remote"}
            })),
        );
        h.mock.on(Method::Post, "/recruiter/profile/5", 200, ok_message("Saved"));

        let mut screen = RecruiterProfileController::new(h.ctx.clone());
        screen.activate().await.unwrap();
        screen.toggle_edit();
        assert!(screen.toggle_selection(PreferenceGroup::Locations, "Hybrid"));
        assert!(!screen.toggle_selection(PreferenceGroup::Roles, "Designer"));

        assert!(screen.save().await.unwrap());
        assert!(!screen.is_editing);
        match &h.mock.requests()[1].body {
            RequestBody::Json(body) => {
                assert_eq!(body["preferences"]["locations"], "Remote, Hybrid");
                assert_eq!(body["preferences"]["roles"], "");
                assert_eq!(body["company"]["name"], "TechCorp");
            }
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_seeker_cannot_open_recruiter_profile() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        let mut screen = RecruiterProfileController::new(h.ctx.clone());
        screen.activate().await.unwrap();
        assert!(screen.error_message.is_some());
        assert_eq!(h.mock.request_count(), 0);
    }
}
