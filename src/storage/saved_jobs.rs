// src/storage/saved_jobs.rs
//! Bookmarked jobs. Client-only; there is no server mirror.

use std::collections::HashSet;

use super::{LocalStore, SAVED_JOBS_KEY};
use crate::app_log;
use crate::error::ClientResult;
use crate::types::{Job, JobId};

#[derive(Clone, Debug)]
pub struct SavedJobs {
    store: LocalStore,
}

impl SavedJobs {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Saved snapshots in insertion order, one per job id.
    pub async fn list(&self) -> ClientResult<Vec<Job>> {
        let jobs: Vec<Job> = self.store.get_or_default(SAVED_JOBS_KEY).await?;
        Ok(dedupe_by_id(jobs))
    }

    pub async fn contains(&self, job_id: JobId) -> ClientResult<bool> {
        Ok(self.list().await?.iter().any(|job| job.id == job_id))
    }

    /// Remove the job if saved, otherwise append its snapshot. Returns
    /// whether the job is saved afterwards.
    pub async fn toggle(&self, job: &Job) -> ClientResult<bool> {
        let saved = self
            .store
            .update(SAVED_JOBS_KEY, |jobs: &mut Vec<Job>| {
                *jobs = dedupe_by_id(std::mem::take(jobs));
                if let Some(index) = jobs.iter().position(|saved| saved.id == job.id) {
                    jobs.remove(index);
                    false
                } else {
                    jobs.push(job.clone());
                    true
                }
            })
            .await?;

        app_log!(debug, "Job {} bookmark -> {}", job.id, saved);
        Ok(saved)
    }

    /// Returns whether anything was removed.
    pub async fn remove(&self, job_id: JobId) -> ClientResult<bool> {
        self.store
            .update(SAVED_JOBS_KEY, |jobs: &mut Vec<Job>| {
                let before = jobs.len();
                jobs.retain(|saved| saved.id != job_id);
                jobs.len() != before
            })
            .await
    }
}

fn dedupe_by_id(jobs: Vec<Job>) -> Vec<Job> {
    let mut seen = HashSet::new();
    jobs.into_iter().filter(|job| seen.insert(job.id)).collect()
}
