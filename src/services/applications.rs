// src/services/applications.rs
use futures::future::join_all;

use super::jobs::JobService;
use crate::app_log;
use crate::core::ApiClient;
use crate::error::ClientResult;
use crate::types::application::StatusUpdate;
use crate::types::user::UserId;
use crate::types::{Application, ApplicationId, ApplicationRequest, ApplicationStatus, Envelope};

#[derive(Clone)]
pub struct ApplicationService {
    api: ApiClient,
    jobs: JobService,
}

impl ApplicationService {
    pub fn new(api: ApiClient, jobs: JobService) -> Self {
        Self { api, jobs }
    }

    pub async fn submit_application(
        &self,
        request: &ApplicationRequest,
    ) -> ClientResult<Envelope<Application>> {
        self.api.post_json("/applications/apply", request).await
    }

    /// The seeker's applications, each carrying its job's display fields.
    /// Job lookups run concurrently; one that fails leaves that entry's
    /// fields empty instead of failing the list.
    pub async fn get_user_applications(
        &self,
        user_id: UserId,
    ) -> ClientResult<Envelope<Vec<Application>>> {
        let mut envelope: Envelope<Vec<Application>> =
            self.api.get(&format!("/applications/user/{}", user_id)).await?;

        if !envelope.success {
            return Ok(envelope);
        }
        if let Some(applications) = envelope.data.as_mut() {
            self.enrich(applications).await;
        }
        Ok(envelope)
    }

    async fn enrich(&self, applications: &mut [Application]) {
        let lookups = applications
            .iter()
            .map(|application| self.jobs.get_job_by_id(application.job_id));
        let results = join_all(lookups).await;

        for (application, result) in applications.iter_mut().zip(results) {
            match result.map(Envelope::into_data) {
                Ok(Some(job)) => application.attach_job(&job),
                Ok(None) => {
                    app_log!(debug, "Job {} not available for application {}", application.job_id, application.id)
                }
                Err(e) => app_log!(
                    warn,
                    "Could not load job {} for application {}: {}",
                    application.job_id,
                    application.id,
                    e
                ),
            }
        }
    }

    pub async fn get_recruiter_applicants(
        &self,
        recruiter_id: UserId,
    ) -> ClientResult<Envelope<Vec<Application>>> {
        self.api
            .get(&format!("/applications/recruiter/{}", recruiter_id))
            .await
    }

    pub async fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> ClientResult<Envelope<Application>> {
        self.api
            .put_json(&format!("/applications/{}/status", id), &StatusUpdate { status })
            .await
    }

    pub async fn reset_application_status(
        &self,
        id: ApplicationId,
    ) -> ClientResult<Envelope<Application>> {
        self.api.put(&format!("/applications/{}/reset", id)).await
    }
}
