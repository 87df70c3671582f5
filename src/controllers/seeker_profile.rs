// src/controllers/seeker_profile.rs
use std::sync::Arc;

use async_trait::async_trait;

use crate::app::AppContext;
use crate::app_log;
use crate::error::{ClientError, ClientResult};
use crate::scope::ScreenScope;
use crate::services::ProfileService;
use crate::types::profile::is_complete;
use crate::types::wire::{comma_list, parse_skills};
use crate::types::{AiFeedback, SaveProfileRequest};
use crate::upload_validator::{UploadFile, UploadKind};
use crate::utils::avatar_or_placeholder;

/// Produces AI feedback for a profile. How the feedback is computed is not
/// this crate's concern.
#[async_trait]
pub trait ProfileReviewer: Send + Sync {
    async fn review(&self, profile: &SaveProfileRequest) -> ClientResult<AiFeedback>;
}

/// Reads back the feedback the server attached to the stored profile.
pub struct SavedFeedbackReviewer {
    profiles: ProfileService,
}

impl SavedFeedbackReviewer {
    pub fn new(profiles: ProfileService) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl ProfileReviewer for SavedFeedbackReviewer {
    async fn review(&self, profile: &SaveProfileRequest) -> ClientResult<AiFeedback> {
        let envelope = self.profiles.get_profile(profile.user_id).await?;
        envelope
            .into_data()
            .and_then(|p| p.ai_feedback)
            .ok_or_else(|| ClientError::validation("No AI feedback is available for this profile yet"))
    }
}

pub struct SeekerProfileController {
    ctx: AppContext,
    scope: ScreenScope,
    reviewer: Arc<dyn ProfileReviewer>,
    pub bio: String,
    /// Free text as typed; parsed on save.
    pub skills_text: String,
    pub resume_url: String,
    pub avatar_url: String,
    pub ai_feedback: Option<AiFeedback>,
    pub is_loading: bool,
    pub is_saving: bool,
    pub is_reviewing: bool,
    pub error_message: Option<String>,
}

impl SeekerProfileController {
    pub fn new(ctx: AppContext, reviewer: Arc<dyn ProfileReviewer>) -> Self {
        Self {
            ctx,
            scope: ScreenScope::new(),
            reviewer,
            bio: String::new(),
            skills_text: String::new(),
            resume_url: String::new(),
            avatar_url: String::new(),
            ai_feedback: None,
            is_loading: false,
            is_saving: false,
            is_reviewing: false,
            error_message: None,
        }
    }

    pub fn with_saved_feedback(ctx: AppContext) -> Self {
        let reviewer = Arc::new(SavedFeedbackReviewer::new(ctx.services.profile.clone()));
        Self::new(ctx, reviewer)
    }

    /// A seeker without a stored profile gets an empty form, not an error.
    pub async fn activate(&mut self) -> ClientResult<()> {
        let user = match self.ctx.session.require_user() {
            Ok(user) => user,
            Err(e) => {
                self.error_message = Some(e.user_message());
                return Ok(());
            }
        };

        self.is_loading = true;
        self.error_message = None;
        let result = self
            .scope
            .guard(self.ctx.services.profile.get_profile(user.id))
            .await;
        if matches!(result, Err(ClientError::Cancelled)) {
            return Err(ClientError::Cancelled);
        }
        self.is_loading = false;

        match result {
            Ok(envelope) => match envelope.into_data() {
                Some(profile) => {
                    self.bio = profile.bio;
                    self.skills_text = comma_list::join(&profile.skills);
                    self.resume_url = profile.resume_url;
                    self.avatar_url = profile.avatar_url;
                    self.ai_feedback = profile.ai_feedback;
                }
                None => app_log!(info, "No profile yet for user {}", user.id),
            },
            Err(e) if e.is_not_found() => app_log!(info, "No profile yet for user {}", user.id),
            Err(e) => {
                app_log!(error, "Failed to load profile: {}", e);
                self.error_message = Some(e.user_message());
            }
        }
        Ok(())
    }

    pub fn skills(&self) -> Vec<String> {
        parse_skills(&self.skills_text)
    }

    pub fn is_complete(&self) -> bool {
        is_complete(&self.bio, &self.skills(), &self.resume_url)
    }

    pub fn avatar(&self) -> String {
        let seed = self.ctx.session.current_user().map(|u| u.id).unwrap_or_default();
        avatar_or_placeholder(&self.avatar_url, seed)
    }

    fn request(&self, user_id: i64) -> SaveProfileRequest {
        SaveProfileRequest {
            user_id,
            bio: self.bio.trim().to_string(),
            skills: self.skills(),
            resume_url: self.resume_url.clone(),
            avatar_url: self.avatar_url.clone(),
            ai_feedback: self.ai_feedback.clone(),
        }
    }

    pub async fn upload_resume(&mut self, file: UploadFile) -> ClientResult<bool> {
        self.upload(UploadKind::Resume, file).await
    }

    pub async fn upload_avatar(&mut self, file: UploadFile) -> ClientResult<bool> {
        self.upload(UploadKind::Avatar, file).await
    }

    /// Stores the returned URL in the form; persisted by the next save.
    async fn upload(&mut self, kind: UploadKind, file: UploadFile) -> ClientResult<bool> {
        let result = self
            .scope
            .guard(self.ctx.services.upload.upload(kind, file))
            .await;

        match result {
            Ok(envelope) => {
                let message = envelope.message_or("Upload failed");
                match envelope.into_data() {
                    Some(uploaded) => {
                        match kind {
                            UploadKind::Resume => self.resume_url = uploaded.url,
                            UploadKind::Avatar => self.avatar_url = uploaded.url,
                        }
                        self.error_message = None;
                        self.ctx.notifier.success("File uploaded successfully!");
                        Ok(true)
                    }
                    None => {
                        self.ctx.notifier.error(message.clone());
                        self.error_message = Some(message);
                        Ok(false)
                    }
                }
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                if !e.is_pre_dispatch() {
                    app_log!(error, "Upload failed: {}", e);
                }
                let message = e.user_message();
                self.ctx.notifier.error(message.clone());
                self.error_message = Some(message);
                Ok(false)
            }
        }
    }

    pub async fn save(&mut self) -> ClientResult<bool> {
        let user = match self.ctx.session.require_user() {
            Ok(user) => user,
            Err(e) => {
                app_log!(warn, "Profile save without a session");
                self.ctx.notifier.warning(e.user_message());
                return Ok(false);
            }
        };

        self.is_saving = true;
        let request = self.request(user.id);
        let result = self
            .scope
            .guard(self.ctx.services.profile.save_profile(request))
            .await;
        if matches!(result, Err(ClientError::Cancelled)) {
            return Err(ClientError::Cancelled);
        }
        self.is_saving = false;

        match result {
            Ok(envelope) if envelope.success => {
                self.skills_text = comma_list::join(&self.skills());
                self.ctx
                    .notifier
                    .success(envelope.message_or("Profile saved successfully!"));
                app_log!(info, "Profile saved for user {}", user.id);
                Ok(true)
            }
            Ok(envelope) => {
                self.ctx.notifier.error(envelope.message_or("Failed to save profile"));
                Ok(false)
            }
            Err(e) => {
                app_log!(error, "Failed to save profile: {}", e);
                self.ctx.notifier.error(e.user_message());
                Ok(false)
            }
        }
    }

    pub async fn run_review(&mut self) -> ClientResult<()> {
        if self.is_reviewing {
            return Ok(());
        }
        let Some(user) = self.ctx.session.current_user() else {
            self.ctx.notifier.warning("Please log in to review your profile");
            return Ok(());
        };

        self.is_reviewing = true;
        let request = self.request(user.id);
        let reviewer = Arc::clone(&self.reviewer);
        let result = self.scope.guard(reviewer.review(&request)).await;
        if matches!(result, Err(ClientError::Cancelled)) {
            return Err(ClientError::Cancelled);
        }
        self.is_reviewing = false;

        match result {
            Ok(feedback) => self.ai_feedback = Some(feedback),
            Err(e) => {
                app_log!(warn, "Profile review unavailable: {}", e);
                self.error_message = Some(e.user_message());
            }
        }
        Ok(())
    }

    pub fn reset_review(&mut self) {
        self.ai_feedback = None;
    }
}

impl Drop for SeekerProfileController {
    fn drop(&mut self) {
        self.scope.close();
    }
}
