// src/controllers/recruiter_listings.rs
use std::sync::Arc;

use super::{confirmed_mutation, Confirm, MutationOutcome};
use crate::app::AppContext;
use crate::app_log;
use crate::error::{ClientError, ClientResult};
use crate::scope::ScreenScope;
use crate::services::jobs::JobAction;
use crate::types::{Job, JobId, JobStatus, Role, StatusTone};
use crate::utils::average_rounded;
use crate::widgets::StatCard;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this job posting?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListingStats {
    pub total: usize,
    pub active: usize,
    pub total_applicants: u64,
    pub average_applicants: u64,
}

/// The recruiter's postings. Status changes are confirmed, sent, then
/// re-read from the server; a delete only drops the row locally.
pub struct RecruiterListingsController {
    ctx: AppContext,
    scope: ScreenScope,
    confirm: Arc<dyn Confirm>,
    pub jobs: Vec<Job>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl RecruiterListingsController {
    pub fn new(ctx: AppContext, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            ctx,
            scope: ScreenScope::new(),
            confirm,
            jobs: Vec::new(),
            is_loading: false,
            error_message: None,
        }
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        let recruiter = match self.ctx.session.require_role(Role::Recruiter) {
            Ok(user) => user,
            Err(e) => {
                self.error_message = Some(e.user_message());
                return Ok(());
            }
        };

        self.is_loading = true;
        let result = self
            .scope
            .guard(self.ctx.services.jobs.get_recruiter_jobs(recruiter.id))
            .await;
        if matches!(result, Err(ClientError::Cancelled)) {
            return Err(ClientError::Cancelled);
        }
        self.is_loading = false;

        match result {
            Ok(envelope) if envelope.success => {
                self.jobs = envelope.into_list();
                self.error_message = None;
            }
            Ok(envelope) => self.error_message = Some(envelope.message_or("Failed to load job listings")),
            Err(e) => {
                app_log!(error, "Failed to load listings: {}", e);
                self.error_message = Some(e.user_message());
            }
        }
        Ok(())
    }

    /// Actions offered for a posting in its current status.
    pub fn actions_for(status: JobStatus) -> &'static [JobAction] {
        match status {
            JobStatus::Active => &[JobAction::Pause, JobAction::Close],
            JobStatus::Paused => &[JobAction::Resume, JobAction::Close],
            JobStatus::Closed => &[JobAction::Reopen],
            JobStatus::Draft => &[],
        }
    }

    pub async fn apply_action(&mut self, job_id: JobId, action: JobAction) -> ClientResult<MutationOutcome<Job>> {
        let prompt = format!(
            "Are you sure you want to {} this job posting?",
            action.path_segment()
        );
        let success = format!("Job {} successfully", action.verb());
        let outcome = confirmed_mutation(
            self.confirm.as_ref(),
            &prompt,
            &self.scope,
            &self.ctx.notifier,
            &success,
            self.ctx.services.jobs.apply_action(job_id, action),
        )
        .await?;

        if outcome.is_applied() {
            app_log!(info, "Job {} {}", job_id, action.verb());
            self.refresh().await?;
        }
        Ok(outcome)
    }

    pub async fn delete(&mut self, job_id: JobId) -> ClientResult<bool> {
        let outcome = confirmed_mutation(
            self.confirm.as_ref(),
            DELETE_PROMPT,
            &self.scope,
            &self.ctx.notifier,
            "Job deleted successfully",
            self.ctx.services.jobs.delete_job(job_id),
        )
        .await?;

        if outcome.is_applied() {
            self.jobs.retain(|job| job.id != job_id);
            app_log!(info, "Job {} deleted", job_id);
        }
        Ok(outcome.is_applied())
    }

    pub fn stats(&self) -> ListingStats {
        let total_applicants = self.jobs.iter().map(|j| u64::from(j.applicants_count)).sum();
        ListingStats {
            total: self.jobs.len(),
            active: self.jobs.iter().filter(|j| j.status == JobStatus::Active).count(),
            total_applicants,
            average_applicants: average_rounded(total_applicants, self.jobs.len()),
        }
    }

    pub fn stat_cards(&self) -> Vec<StatCard> {
        let stats = self.stats();
        vec![
            StatCard::new("Active Jobs", stats.active)
                .icon("fas fa-briefcase")
                .tone(StatusTone::Positive),
            StatCard::new("Total Applicants", stats.total_applicants)
                .icon("fas fa-users")
                .tone(StatusTone::Informative),
            StatCard::new("Avg. Applicants", stats.average_applicants)
                .icon("fas fa-chart-line")
                .tone(StatusTone::Highlight),
        ]
    }

    pub fn applicants_route(job_id: JobId) -> String {
        format!("/dashboard/recruiter/applicants?jobId={}", job_id)
    }

    pub fn edit_route(job_id: JobId) -> String {
        format!("/dashboard/recruiter/post-job?id={}", job_id)
    }

    pub fn new_job_route() -> &'static str {
        "/dashboard/recruiter/post-job"
    }
}

impl Drop for RecruiterListingsController {
    fn drop(&mut self) {
        self.scope.close();
    }
}
