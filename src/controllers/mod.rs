// src/controllers/mod.rs
//! Per-screen state holders. A controller owns its copy of server data for
//! its lifetime, runs every remote call through its [`ScreenScope`] and
//! closes that scope when dropped.

pub mod applications;
pub mod find_jobs;
pub mod job_details;
pub mod login;
pub mod manage_applicants;
pub mod post_job;
pub mod recruiter_listings;
pub mod recruiter_profile;
pub mod saved_jobs;
pub mod seeker_profile;
pub mod signup;

use std::future::Future;

use async_trait::async_trait;

use crate::app_log;
use crate::error::{ClientError, ClientResult};
use crate::scope::ScreenScope;
use crate::types::Envelope;
use crate::widgets::Notifier;

pub use applications::{ApplicationsController, DraftOutcome};
pub use find_jobs::{FindJobsController, RecommendationState};
pub use job_details::{DetailsState, JobDetailsController, MatchState, Panel, SubmitOutcome};
pub use login::LoginController;
pub use manage_applicants::{ApplicantCounts, ManageApplicantsController};
pub use post_job::{Currency, PostJobController, PostJobForm};
pub use recruiter_listings::{ListingStats, RecruiterListingsController};
pub use recruiter_profile::RecruiterProfileController;
pub use saved_jobs::SavedJobsController;
pub use seeker_profile::{ProfileReviewer, SavedFeedbackReviewer, SeekerProfileController};
pub use signup::SignupController;

/// Asks the user before a destructive or state-changing action.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Approves everything, for `--yes`.
pub struct AlwaysConfirm;

#[async_trait]
impl Confirm for AlwaysConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome<T> {
    /// The user said no; nothing was sent.
    Declined,
    Applied(Option<T>),
    /// Structured failure or failed exchange; already toasted.
    Rejected(String),
}

impl<T> MutationOutcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Confirm, call, toast. Only a closed scope surfaces as an error; every
/// other failure is reported through the notifier and returned as
/// [`MutationOutcome::Rejected`] so callers leave their state alone.
pub(crate) async fn confirmed_mutation<T, Fut>(
    confirm: &dyn Confirm,
    prompt: &str,
    scope: &ScreenScope,
    notifier: &Notifier,
    success_message: &str,
    call: Fut,
) -> ClientResult<MutationOutcome<T>>
where
    Fut: Future<Output = ClientResult<Envelope<T>>>,
{
    if !confirm.confirm(prompt).await {
        app_log!(debug, "Declined: {}", prompt);
        return Ok(MutationOutcome::Declined);
    }

    match scope.guard(call).await {
        Ok(envelope) if envelope.success => {
            notifier.success(envelope.message_or(success_message));
            Ok(MutationOutcome::Applied(envelope.data))
        }
        Ok(envelope) => {
            let message = envelope.message_or("The request was rejected");
            notifier.error(message.clone());
            Ok(MutationOutcome::Rejected(message))
        }
        Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
        Err(e) => {
            app_log!(error, "{} failed: {}", prompt, e);
            let message = e.user_message();
            notifier.error(message.clone());
            Ok(MutationOutcome::Rejected(message))
        }
    }
}
