// src/controllers/job_details.rs
//! Job details screen: load, apply, compatibility check and bookmark.

use crate::app::AppContext;
use crate::app_log;
use crate::error::{ClientError, ClientResult};
use crate::scope::ScreenScope;
use crate::types::{ApplicationRequest, Job, JobId, MatchLabel, MatchResult};

pub const NO_LONGER_AVAILABLE: &str = "This job is no longer available";
const REQUIRED_FIELDS: &str = "Please fill in all required fields";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsState {
    Loading,
    /// Only open (ACTIVE) jobs are ever loaded.
    Loaded(Job),
    NotFound,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Viewing,
    ApplicationFormOpen,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchState {
    Idle,
    Checking,
    Shown(MatchResult),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The form is not open.
    NotAvailable,
    /// Required fields left blank; nothing was sent.
    Invalid(Vec<&'static str>),
    /// No signed-in user; nothing was sent.
    SignInRequired,
    Submitted,
    /// The server refused (e.g. duplicate application). The form is closed.
    Rejected(String),
    /// The exchange failed. The form stays open; when `draft_saved` the
    /// request was also kept locally for a manual retry.
    Failed { message: String, draft_saved: bool },
}

pub struct JobDetailsController {
    ctx: AppContext,
    scope: ScreenScope,
    pub state: DetailsState,
    pub panel: Panel,
    pub form: ApplicationRequest,
    pub form_error: Option<String>,
    pub is_submitting: bool,
    pub is_bookmarked: bool,
    pub match_state: MatchState,
    pub match_error: Option<String>,
}

impl JobDetailsController {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            scope: ScreenScope::new(),
            state: DetailsState::Loading,
            panel: Panel::Viewing,
            form: ApplicationRequest::default(),
            form_error: None,
            is_submitting: false,
            is_bookmarked: false,
            match_state: MatchState::Idle,
            match_error: None,
        }
    }

    pub fn scope(&self) -> &ScreenScope {
        &self.scope
    }

    pub fn job(&self) -> Option<&Job> {
        match &self.state {
            DetailsState::Loaded(job) => Some(job),
            _ => None,
        }
    }

    pub async fn activate(&mut self, job_id: JobId) -> ClientResult<()> {
        self.state = DetailsState::Loading;
        self.panel = Panel::Viewing;
        self.match_state = MatchState::Idle;
        self.match_error = None;

        let result = self
            .scope
            .guard(self.ctx.services.jobs.get_job_by_id(job_id))
            .await;

        self.state = match result {
            Ok(envelope) => match envelope.into_data() {
                Some(job) if job.status.is_open() => DetailsState::Loaded(job),
                Some(job) => {
                    app_log!(info, "Job {} is {}, not accepting applications", job.id, job.status);
                    DetailsState::Error(NO_LONGER_AVAILABLE.to_string())
                }
                None => DetailsState::NotFound,
            },
            Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
            Err(e) if e.is_not_found() => DetailsState::NotFound,
            Err(e) => {
                app_log!(error, "Failed to load job {}: {}", job_id, e);
                DetailsState::Error(e.user_message())
            }
        };

        if let DetailsState::Loaded(job) = &self.state {
            self.is_bookmarked = match self.ctx.store().saved_jobs().contains(job.id).await {
                Ok(saved) => saved,
                Err(e) => {
                    app_log!(warn, "Could not read saved jobs: {}", e);
                    false
                }
            };
        }
        Ok(())
    }

    /// Open the application form, prefilled from the profile when it can be
    /// read and from the session otherwise. Returns whether the form opened.
    pub async fn apply_now(&mut self) -> ClientResult<bool> {
        let Some(job_id) = self.job().map(|j| j.id) else {
            return Ok(false);
        };
        if self.panel != Panel::Viewing {
            return Ok(false);
        }

        let user = self.ctx.session.current_user();
        self.form = ApplicationRequest {
            job_id,
            user_id: user.as_ref().map(|u| u.id).unwrap_or_default(),
            full_name: user.as_ref().map(|u| u.name.clone()).unwrap_or_default(),
            email: user.as_ref().map(|u| u.email.clone()).unwrap_or_default(),
            ..Default::default()
        };
        self.form_error = None;
        self.panel = Panel::ApplicationFormOpen;

        if let Some(user) = user {
            let profile = self
                .scope
                .guard(self.ctx.services.profile.get_profile(user.id))
                .await;
            match profile {
                Ok(envelope) => {
                    if let Some(profile) = envelope.into_data() {
                        if !profile.user.name.trim().is_empty() {
                            self.form.full_name = profile.user.name;
                        }
                        if !profile.user.email.trim().is_empty() {
                            self.form.email = profile.user.email;
                        }
                        self.form.resume_url = profile.resume_url;
                    }
                }
                Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
                Err(e) => app_log!(debug, "Profile prefill skipped: {}", e),
            }
        }
        Ok(true)
    }

    pub fn cancel_application(&mut self) {
        self.panel = Panel::Viewing;
        self.form_error = None;
    }

    pub async fn submit_application(&mut self) -> ClientResult<SubmitOutcome> {
        if self.panel != Panel::ApplicationFormOpen {
            return Ok(SubmitOutcome::NotAvailable);
        }
        let Some(job_id) = self.job().map(|j| j.id) else {
            return Ok(SubmitOutcome::NotAvailable);
        };

        let missing = self.form.missing_required();
        if !missing.is_empty() {
            app_log!(warn, "Application form missing: {}", missing.join(", "));
            self.form_error = Some(REQUIRED_FIELDS.to_string());
            return Ok(SubmitOutcome::Invalid(missing));
        }

        let Some(user) = self.ctx.session.current_user() else {
            app_log!(warn, "Application attempted without a session");
            self.ctx.notifier.warning("Please log in to apply for this job");
            return Ok(SubmitOutcome::SignInRequired);
        };

        self.form.user_id = user.id;
        self.form.job_id = job_id;
        self.form_error = None;
        self.is_submitting = true;

        let result = self
            .scope
            .guard(self.ctx.services.applications.submit_application(&self.form))
            .await;
        if matches!(result, Err(ClientError::Cancelled)) {
            return Err(ClientError::Cancelled);
        }
        self.is_submitting = false;

        match result {
            Ok(envelope) if envelope.success => {
                self.panel = Panel::Viewing;
                self.ctx
                    .notifier
                    .success(envelope.message_or("Application submitted successfully!"));
                app_log!(info, "Application for job {} submitted", job_id);
                Ok(SubmitOutcome::Submitted)
            }
            Ok(envelope) => {
                let message = envelope.message_or("Could not submit your application");
                self.panel = Panel::Viewing;
                self.ctx.notifier.error(message.clone());
                Ok(SubmitOutcome::Rejected(message))
            }
            Err(e) => {
                app_log!(error, "Application for job {} failed: {}", job_id, e);
                let message = e.user_message();
                self.form_error = Some(message.clone());

                let draft_saved = matches!(e, ClientError::Transport(_))
                    && match self.ctx.store().drafts().save(&self.form).await {
                        Ok(_) => true,
                        Err(store_err) => {
                            app_log!(warn, "Could not keep draft: {}", store_err);
                            false
                        }
                    };
                Ok(SubmitOutcome::Failed {
                    message,
                    draft_saved,
                })
            }
        }
    }

    /// No-op while a check is already running.
    pub async fn check_compatibility(&mut self) -> ClientResult<()> {
        if self.match_state == MatchState::Checking {
            return Ok(());
        }
        let Some(job_id) = self.job().map(|j| j.id) else {
            return Ok(());
        };
        let Some(user) = self.ctx.session.current_user() else {
            app_log!(warn, "Compatibility check attempted without a session");
            self.ctx.notifier.warning("Please log in to check compatibility");
            return Ok(());
        };

        self.match_state = MatchState::Checking;
        self.match_error = None;

        let result = self
            .scope
            .guard(self.ctx.services.matching.check_compatibility(user.id, job_id))
            .await;

        self.match_state = match result {
            Ok(envelope) => match (envelope.success, envelope.data) {
                (true, Some(result)) => MatchState::Shown(result),
                _ => {
                    let message = if envelope.message.trim().is_empty() {
                        "Could not check compatibility".to_string()
                    } else {
                        envelope.message
                    };
                    self.ctx.notifier.error(message.clone());
                    self.match_error = Some(message);
                    MatchState::Idle
                }
            },
            Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
            Err(e) => {
                app_log!(error, "Compatibility check for job {} failed: {}", job_id, e);
                let message = e.user_message();
                self.ctx.notifier.error(message.clone());
                self.match_error = Some(message);
                MatchState::Idle
            }
        };
        Ok(())
    }

    pub fn can_check_compatibility(&self) -> bool {
        self.job().is_some() && self.match_state != MatchState::Checking
    }

    pub fn match_label(&self) -> Option<MatchLabel> {
        match &self.match_state {
            MatchState::Shown(result) => Some(result.label()),
            _ => None,
        }
    }

    /// Local only. `None` when there is no open job to bookmark.
    pub async fn toggle_bookmark(&mut self) -> ClientResult<Option<bool>> {
        let Some(job) = self.job().cloned() else {
            return Ok(None);
        };
        let saved = self.ctx.store().saved_jobs().toggle(&job).await?;
        self.is_bookmarked = saved;
        if saved {
            self.ctx.notifier.info("Job saved");
        } else {
            self.ctx.notifier.info("Job removed from saved jobs");
        }
        Ok(Some(saved))
    }
}

impl Drop for JobDetailsController {
    fn drop(&mut self) {
        self.scope.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::Method;
    use crate::test_support::{fail, job_json, ok, ok_message, Harness};
    use crate::types::{JobStatus, Role};
    use crate::widgets::ToastKind;
    use serde_json::json;
    use std::time::Duration;

    async fn loaded(h: &Harness, id: i64) -> JobDetailsController {
        h.mock.on(Method::Get, &format!("/jobs/{}", id), 200, ok(job_json(id, "ACTIVE")));
        let mut details = JobDetailsController::new(h.ctx.clone());
        details.activate(id).await.unwrap();
        assert!(matches!(details.state, DetailsState::Loaded(_)));
        details
    }

    #[tokio::test]
    async fn test_closed_job_is_unavailable() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        h.mock.on(Method::Get, "/jobs/9", 200, ok(job_json(9, "CLOSED")));

        let mut details = JobDetailsController::new(h.ctx.clone());
        details.activate(9).await.unwrap();

        assert_eq!(details.state, DetailsState::Error(NO_LONGER_AVAILABLE.to_string()));
        assert!(!details.apply_now().await.unwrap());
        assert_eq!(details.toggle_bookmark().await.unwrap(), None);
        assert!(h.store.saved_jobs().list().await.unwrap().is_empty());
        assert_eq!(h.mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_not_found_variants() {
        let replies = [
            (404, json!({"message": "Job not found"})),
            (200, fail("Job not found")),
            (200, json!({"success": true, "data": null})),
        ];
        for (status, body) in replies {
            let h = Harness::signed_in(3, Role::Seeker).await;
            h.mock.push_json(status, body);
            let mut details = JobDetailsController::new(h.ctx.clone());
            details.activate(5).await.unwrap();
            assert_eq!(details.state, DetailsState::NotFound);
        }
    }

    #[tokio::test]
    async fn test_transport_failure_on_load_is_error() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        h.mock.push_failure("connection refused");
        let mut details = JobDetailsController::new(h.ctx.clone());
        details.activate(5).await.unwrap();
        assert!(matches!(details.state, DetailsState::Error(_)));
    }

    #[tokio::test]
    async fn test_bookmark_job_42_twice() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        let mut details = loaded(&h, 42).await;
        let before = h.mock.request_count();

        assert_eq!(details.toggle_bookmark().await.unwrap(), Some(true));
        let saved: Vec<_> = h.store.saved_jobs().list().await.unwrap().iter().map(|j| j.id).collect();
        assert_eq!(saved, vec![42]);

        assert_eq!(details.toggle_bookmark().await.unwrap(), Some(false));
        assert!(h.store.saved_jobs().list().await.unwrap().is_empty());
        assert_eq!(h.mock.request_count(), before);
    }

    #[tokio::test]
    async fn test_bookmark_state_read_on_load() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        h.store
            .saved_jobs()
            .toggle(&crate::test_support::sample_job(42, JobStatus::Active))
            .await
            .unwrap();
        let details = loaded(&h, 42).await;
        assert!(details.is_bookmarked);
    }

    #[tokio::test]
    async fn test_blank_required_fields_send_nothing() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        let mut details = loaded(&h, 42).await;
        h.mock.push_failure("profile unavailable");
        assert!(details.apply_now().await.unwrap());
        let before = h.mock.request_count();

        details.form.phone = "   ".into();
        let outcome = details.submit_application().await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Invalid(vec!["phone"]));
        assert_eq!(details.panel, Panel::ApplicationFormOpen);
        assert_eq!(h.mock.request_count(), before);
    }

    #[tokio::test]
    async fn test_prefill_from_profile() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        let mut details = loaded(&h, 42).await;
        h.mock.on(
            Method::Get,
            "/profile/3",
            200,
            ok(json!({
                "id": 1,
                "user": {"id": 3, "name": "Ada King", "email": "ada@king.dev", "role": "SEEKER"},
                "resumeUrl": "https://cdn/cv.pdf"
            })),
        );
        details.apply_now().await.unwrap();
        assert_eq!(details.form.full_name, "Ada King");
        assert_eq!(details.form.resume_url, "https://cdn/cv.pdf");
        assert_eq!(details.form.job_id, 42);
    }

    #[tokio::test]
    async fn test_signed_out_submit_sends_nothing() {
        let h = Harness::signed_out();
        let mut details = loaded(&h, 42).await;
        details.apply_now().await.unwrap();
        details.form.full_name = "Ada".into();
        details.form.email = "ada@example.com".into();
        details.form.phone = "555".into();
        let mut toasts = h.ctx.notifier.subscribe();

        assert_eq!(details.submit_application().await.unwrap(), SubmitOutcome::SignInRequired);
        assert_eq!(toasts.try_recv().unwrap().kind, ToastKind::Warning);
        assert_eq!(h.mock.request_count(), 1);
    }

    async fn filled_form(h: &Harness) -> JobDetailsController {
        let mut details = loaded(h, 42).await;
        h.mock.on_failure(Method::Get, "/profile/3", "skip");
        details.apply_now().await.unwrap();
        details.form.phone = "555-0100".into();
        details
    }

    #[tokio::test]
    async fn test_successful_submit_closes_form() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        let mut details = filled_form(&h).await;
        h.mock.on(Method::Post, "/applications/apply", 201, ok_message("Application submitted"));
        let mut toasts = h.ctx.notifier.subscribe();

        assert_eq!(details.submit_application().await.unwrap(), SubmitOutcome::Submitted);
        assert_eq!(details.panel, Panel::Viewing);
        let toast = toasts.try_recv().unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.message, "Application submitted");
    }

    #[tokio::test]
    async fn test_duplicate_application_shows_server_message() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        let mut details = filled_form(&h).await;
        h.mock.on(Method::Post, "/applications/apply", 409, fail("You have already applied"));

        let outcome = details.submit_application().await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Rejected("You have already applied".into()));
        assert_eq!(details.panel, Panel::Viewing);
        assert!(h.store.drafts().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_form_and_draft() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        let mut details = filled_form(&h).await;
        h.mock.on_failure(Method::Post, "/applications/apply", "connection reset");

        let outcome = details.submit_application().await.unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: "Something went wrong. Please try again.".into(),
                draft_saved: true
            }
        );
        assert_eq!(details.panel, Panel::ApplicationFormOpen);
        let drafts = h.store.drafts().list_for_user(3).await.unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].request.job_id, 42);
    }

    #[tokio::test]
    async fn test_compatibility_check() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        let mut details = loaded(&h, 42).await;
        h.mock.on(
            Method::Post,
            "/match/check",
            200,
            ok(json!({"matchScore": 74, "skillScore": 80, "experienceScore": 60, "profileScore": 70, "feedback": "Close"})),
        );

        assert!(details.can_check_compatibility());
        details.check_compatibility().await.unwrap();
        assert_eq!(details.match_label(), Some(MatchLabel::Good));
    }

    #[tokio::test]
    async fn test_fractional_compatibility_scores() {
        for (score, expected) in [(72.5, MatchLabel::Good), (74.9, MatchLabel::Good), (75.0, MatchLabel::Excellent)] {
            let h = Harness::signed_in(3, Role::Seeker).await;
            let mut details = loaded(&h, 42).await;
            h.mock.on(
                Method::Post,
                "/match/check",
                200,
                ok(json!({"matchScore": score, "skillScore": 81.5, "feedback": "Close"})),
            );

            details.check_compatibility().await.unwrap();
            assert_eq!(details.match_label(), Some(expected), "score {}", score);
        }
    }

    #[tokio::test]
    async fn test_compatibility_requires_session() {
        let h = Harness::signed_out();
        let mut details = loaded(&h, 42).await;
        details.check_compatibility().await.unwrap();
        assert_eq!(details.match_state, MatchState::Idle);
        assert_eq!(h.mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_closed_scope_leaves_state_alone() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        h.mock.push_slow(Duration::from_secs(5), 200, ok(job_json(42, "ACTIVE")));
        let mut details = JobDetailsController::new(h.ctx.clone());

        let scope = details.scope().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            scope.close();
        });

        let err = details.activate(42).await.unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(details.state, DetailsState::Loading);
    }
}
