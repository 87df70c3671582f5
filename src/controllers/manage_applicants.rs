// src/controllers/manage_applicants.rs
use std::sync::Arc;

use super::{confirmed_mutation, Confirm, MutationOutcome};
use crate::app::AppContext;
use crate::app_log;
use crate::error::{ClientError, ClientResult};
use crate::scope::ScreenScope;
use crate::types::{Application, ApplicationId, ApplicationStatus, JobId, Role};
use crate::utils::initials;

/// Counters shown above the applicant table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplicantCounts {
    pub applied: usize,
    pub shortlisted: usize,
    pub interview: usize,
    pub hired: usize,
}

pub struct ManageApplicantsController {
    ctx: AppContext,
    scope: ScreenScope,
    confirm: Arc<dyn Confirm>,
    applicants: Vec<Application>,
    /// `(id, title)` of the recruiter's postings, for the filter dropdown.
    pub job_options: Vec<(JobId, String)>,
    /// `None` shows every posting.
    pub job_filter: Option<JobId>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl ManageApplicantsController {
    pub fn new(ctx: AppContext, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            ctx,
            scope: ScreenScope::new(),
            confirm,
            applicants: Vec::new(),
            job_options: Vec::new(),
            job_filter: None,
            is_loading: false,
            error_message: None,
        }
    }

    /// Accepts the `jobId` query value; `"all"` or garbage clears the filter.
    pub fn set_job_filter(&mut self, raw: &str) {
        self.job_filter = raw.trim().parse().ok();
    }

    pub async fn activate(&mut self) -> ClientResult<()> {
        let recruiter = match self.ctx.session.require_role(Role::Recruiter) {
            Ok(user) => user,
            Err(e) => {
                self.error_message = Some(e.user_message());
                return Ok(());
            }
        };

        let jobs = self
            .scope
            .guard(self.ctx.services.jobs.get_recruiter_jobs(recruiter.id))
            .await;
        match jobs {
            Ok(envelope) => {
                self.job_options = envelope
                    .into_list()
                    .into_iter()
                    .map(|job| (job.id, job.title))
                    .collect();
            }
            Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
            Err(e) => app_log!(warn, "Job filter options unavailable: {}", e),
        }

        self.refresh().await
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        let Some(recruiter) = self.ctx.session.current_user() else {
            return Ok(());
        };

        self.is_loading = true;
        let result = self
            .scope
            .guard(self.ctx.services.applications.get_recruiter_applicants(recruiter.id))
            .await;
        if matches!(result, Err(ClientError::Cancelled)) {
            return Err(ClientError::Cancelled);
        }
        self.is_loading = false;

        match result {
            Ok(envelope) if envelope.success => {
                self.applicants = envelope.into_list();
                self.error_message = None;
            }
            Ok(envelope) => self.error_message = Some(envelope.message_or("Failed to load applicants")),
            Err(e) => {
                app_log!(error, "Failed to load applicants: {}", e);
                self.error_message = Some(e.user_message());
            }
        }
        Ok(())
    }

    pub fn visible(&self) -> Vec<&Application> {
        self.applicants
            .iter()
            .filter(|a| self.job_filter.map_or(true, |job_id| a.job_id == job_id))
            .collect()
    }

    pub fn counts(&self) -> ApplicantCounts {
        let count = |status| self.applicants.iter().filter(|a| a.status == status).count();
        ApplicantCounts {
            applied: count(ApplicationStatus::Applied),
            shortlisted: count(ApplicationStatus::Shortlisted),
            interview: count(ApplicationStatus::Interview),
            hired: count(ApplicationStatus::Hired),
        }
    }

    pub fn initials(applicant: &Application) -> String {
        initials(&applicant.full_name)
    }

    pub async fn update_status(
        &mut self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> ClientResult<MutationOutcome<Application>> {
        let prompt = format!("Change this application's status to {}?", status.label());
        let outcome = confirmed_mutation(
            self.confirm.as_ref(),
            &prompt,
            &self.scope,
            &self.ctx.notifier,
            "Application status updated",
            self.ctx.services.applications.update_application_status(id, status),
        )
        .await?;

        if outcome.is_applied() {
            app_log!(info, "Application {} -> {}", id, status);
            self.refresh().await?;
        }
        Ok(outcome)
    }

    pub async fn reset_status(&mut self, id: ApplicationId) -> ClientResult<MutationOutcome<Application>> {
        let outcome = confirmed_mutation(
            self.confirm.as_ref(),
            "Reset this application's status?",
            &self.scope,
            &self.ctx.notifier,
            "Application status reset",
            self.ctx.services.applications.reset_application_status(id),
        )
        .await?;

        if outcome.is_applied() {
            self.refresh().await?;
        }
        Ok(outcome)
    }
}

impl Drop for ManageApplicantsController {
    fn drop(&mut self) {
        self.scope.close();
    }
}
