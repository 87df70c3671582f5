// src/controllers/applications.rs
use std::collections::HashMap;

use crate::app::AppContext;
use crate::app_log;
use crate::error::{ClientError, ClientResult};
use crate::scope::ScreenScope;
use crate::storage::DraftApplication;
use crate::types::{Application, ApplicationStatus, JobId};

#[derive(Debug, Clone, PartialEq)]
pub enum DraftOutcome {
    /// No draft for that job.
    Missing,
    Submitted,
    /// The server refused it; the draft is gone either way.
    Rejected(String),
    /// Still unreachable; the draft stays.
    Kept(String),
}

/// The seeker's applications plus any drafts kept on this device.
pub struct ApplicationsController {
    ctx: AppContext,
    scope: ScreenScope,
    applications: Vec<Application>,
    pub drafts: Vec<DraftApplication>,
    pub status_filter: Option<ApplicationStatus>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl ApplicationsController {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            scope: ScreenScope::new(),
            applications: Vec::new(),
            drafts: Vec::new(),
            status_filter: None,
            is_loading: false,
            error_message: None,
        }
    }

    pub async fn activate(&mut self) -> ClientResult<()> {
        let Some(user) = self.ctx.session.current_user() else {
            app_log!(warn, "Applications screen opened without a session");
            self.error_message = Some("Please log in to view your applications".to_string());
            return Ok(());
        };

        self.is_loading = true;
        self.error_message = None;
        let result = self
            .scope
            .guard(self.ctx.services.applications.get_user_applications(user.id))
            .await;
        if matches!(result, Err(ClientError::Cancelled)) {
            return Err(ClientError::Cancelled);
        }
        self.is_loading = false;

        match result {
            Ok(envelope) if envelope.success => self.applications = envelope.into_list(),
            Ok(envelope) => {
                self.error_message = Some(envelope.message_or("Failed to load applications"))
            }
            Err(e) => {
                app_log!(error, "Failed to load applications: {}", e);
                self.error_message = Some(e.user_message());
            }
        }

        self.drafts = self
            .ctx
            .store()
            .drafts()
            .list_for_user(user.id)
            .await
            .unwrap_or_else(|e| {
                app_log!(warn, "Could not read drafts: {}", e);
                Vec::new()
            });
        Ok(())
    }

    pub fn all(&self) -> &[Application] {
        &self.applications
    }

    pub fn visible(&self) -> Vec<&Application> {
        self.applications
            .iter()
            .filter(|a| self.status_filter.map_or(true, |status| a.status == status))
            .collect()
    }

    pub fn counts(&self) -> HashMap<ApplicationStatus, usize> {
        let mut counts: HashMap<_, _> = ApplicationStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for application in &self.applications {
            *counts.entry(application.status).or_default() += 1;
        }
        counts
    }

    pub fn count(&self, status: ApplicationStatus) -> usize {
        self.applications.iter().filter(|a| a.status == status).count()
    }

    pub async fn resubmit_draft(&mut self, job_id: JobId) -> ClientResult<DraftOutcome> {
        let Some(draft) = self
            .drafts
            .iter()
            .find(|d| d.request.job_id == job_id)
            .cloned()
        else {
            return Ok(DraftOutcome::Missing);
        };
        let request = draft.request;

        let result = self
            .scope
            .guard(self.ctx.services.applications.submit_application(&request))
            .await;

        let outcome = match result {
            Ok(envelope) if envelope.success => {
                self.ctx
                    .notifier
                    .success(envelope.message_or("Application submitted successfully!"));
                if let Some(application) = envelope.data {
                    self.applications.push(application);
                }
                DraftOutcome::Submitted
            }
            Ok(envelope) => {
                let message = envelope.message_or("Could not submit your application");
                self.ctx.notifier.error(message.clone());
                DraftOutcome::Rejected(message)
            }
            Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
            Err(e) => {
                app_log!(error, "Draft for job {} still not sent: {}", job_id, e);
                let message = e.user_message();
                self.ctx.notifier.error(message.clone());
                return Ok(DraftOutcome::Kept(message));
            }
        };

        self.ctx
            .store()
            .drafts()
            .remove(request.user_id, request.job_id)
            .await?;
        self.drafts.retain(|d| d.request.job_id != job_id);
        Ok(outcome)
    }

    pub async fn discard_draft(&mut self, job_id: JobId) -> ClientResult<bool> {
        let Some(user) = self.ctx.session.current_user() else {
            return Ok(false);
        };
        let removed = self.ctx.store().drafts().remove(user.id, job_id).await?;
        self.drafts.retain(|d| d.request.job_id != job_id);
        Ok(removed)
    }
}

impl Drop for ApplicationsController {
    fn drop(&mut self) {
        self.scope.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::Method;
    use crate::services::applications::tests::application_json;
    use crate::test_support::{fail, job_json, ok, Harness};
    use crate::types::{ApplicationRequest, Role};
    use serde_json::json;

    fn draft_request(job_id: i64) -> ApplicationRequest {
        ApplicationRequest {
            user_id: 3,
            job_id,
            full_name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: "555".into(),
            ..Default::default()
        }
    }

    async fn with_applications(h: &Harness) -> ApplicationsController {
        h.mock.on(
            Method::Get,
            "/applications/user/3",
            200,
            ok(json!([
                application_json(1, 10, "APPLIED"),
                application_json(2, 11, "SHORTLISTED"),
                application_json(3, 12, "NEW")
            ])),
        );
        for id in [10, 11, 12] {
            h.mock.on(Method::Get, &format!("/jobs/{}", id), 200, ok(job_json(id, "ACTIVE")));
        }
        let mut screen = ApplicationsController::new(h.ctx.clone());
        screen.activate().await.unwrap();
        screen
    }

    #[tokio::test]
    async fn test_counts_and_filter() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        let mut screen = with_applications(&h).await;

        assert_eq!(screen.count(ApplicationStatus::Applied), 2);
        assert_eq!(screen.counts()[&ApplicationStatus::Shortlisted], 1);
        assert_eq!(screen.counts()[&ApplicationStatus::Hired], 0);

        screen.status_filter = Some(ApplicationStatus::Shortlisted);
        let visible = screen.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].job_title.as_deref(), Some("Job 11"));
    }

    #[tokio::test]
    async fn test_signed_out_sends_nothing() {
        let h = Harness::signed_out();
        let mut screen = ApplicationsController::new(h.ctx.clone());
        screen.activate().await.unwrap();
        assert!(screen.error_message.is_some());
        assert_eq!(h.mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_resubmit_draft_removes_it_on_success() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        h.store.drafts().save(&draft_request(20)).await.unwrap();
        let mut screen = with_applications(&h).await;
        assert_eq!(screen.drafts.len(), 1);

        h.mock.on(Method::Post, "/applications/apply", 201, ok(application_json(9, 20, "APPLIED")));
        assert_eq!(screen.resubmit_draft(20).await.unwrap(), DraftOutcome::Submitted);
        assert!(screen.drafts.is_empty());
        assert!(h.store.drafts().list().await.unwrap().is_empty());
        assert_eq!(screen.all().len(), 4);
    }

    #[tokio::test]
    async fn test_resubmit_draft_dropped_on_structured_failure() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        h.store.drafts().save(&draft_request(20)).await.unwrap();
        let mut screen = with_applications(&h).await;

        h.mock.on(Method::Post, "/applications/apply", 409, fail("You have already applied"));
        assert_eq!(
            screen.resubmit_draft(20).await.unwrap(),
            DraftOutcome::Rejected("You have already applied".into())
        );
        assert!(h.store.drafts().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resubmit_draft_kept_when_unreachable() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        h.store.drafts().save(&draft_request(20)).await.unwrap();
        let mut screen = with_applications(&h).await;

        h.mock.on_failure(Method::Post, "/applications/apply", "connection refused");
        assert!(matches!(screen.resubmit_draft(20).await.unwrap(), DraftOutcome::Kept(_)));
        assert_eq!(screen.drafts.len(), 1);
        assert_eq!(h.store.drafts().list().await.unwrap().len(), 1);
        assert_eq!(screen.resubmit_draft(99).await.unwrap(), DraftOutcome::Missing);
    }
}
