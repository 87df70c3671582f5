// src/controllers/saved_jobs.rs
use crate::app::AppContext;
use crate::app_log;
use crate::error::ClientResult;
use crate::types::{Job, JobId};

/// Bookmarks kept on this device. Nothing here talks to the server.
pub struct SavedJobsController {
    ctx: AppContext,
    pub jobs: Vec<Job>,
    pub error_message: Option<String>,
}

impl SavedJobsController {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            jobs: Vec::new(),
            error_message: None,
        }
    }

    pub async fn activate(&mut self) -> ClientResult<()> {
        match self.ctx.store().saved_jobs().list().await {
            Ok(jobs) => {
                self.jobs = jobs;
                self.error_message = None;
            }
            Err(e) => {
                app_log!(error, "Could not read saved jobs: {}", e);
                self.jobs.clear();
                self.error_message = Some(e.user_message());
            }
        }
        Ok(())
    }

    pub async fn remove(&mut self, job_id: JobId) -> ClientResult<bool> {
        let removed = self.ctx.store().saved_jobs().remove(job_id).await?;
        if removed {
            self.jobs.retain(|job| job.id != job_id);
            self.ctx.notifier.info("Job removed from saved jobs");
        }
        Ok(removed)
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn job_route(id: JobId) -> String {
        format!("/dashboard/seeker/find-jobs/{}", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_job, Harness};
    use crate::types::{JobStatus, Role};

    #[tokio::test]
    async fn test_lists_and_removes_locally() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        let saved = h.store.saved_jobs();
        saved.toggle(&sample_job(1, JobStatus::Active)).await.unwrap();
        saved.toggle(&sample_job(2, JobStatus::Active)).await.unwrap();

        let mut screen = SavedJobsController::new(h.ctx.clone());
        screen.activate().await.unwrap();
        assert_eq!(screen.jobs.len(), 2);

        assert!(screen.remove(1).await.unwrap());
        assert!(!screen.remove(1).await.unwrap());
        assert_eq!(screen.jobs.iter().map(|j| j.id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(saved.list().await.unwrap().len(), 1);
        assert_eq!(h.mock.request_count(), 0);
    }
}
