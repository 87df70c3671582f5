// src/services/jobs.rs
use crate::core::ApiClient;
use crate::error::ClientResult;
use crate::types::response::Empty;
use crate::types::user::UserId;
use crate::types::{Envelope, Job, JobDraft, JobId, JobSearch};

/// Recruiter-driven status changes of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobAction {
    Pause,
    Resume,
    Close,
    Reopen,
}

impl JobAction {
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Close => "close",
            Self::Reopen => "reopen",
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Pause => "paused",
            Self::Resume => "resumed",
            Self::Close => "closed",
            Self::Reopen => "reopened",
        }
    }
}

#[derive(Clone)]
pub struct JobService {
    api: ApiClient,
}

impl JobService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_jobs(&self, search: &JobSearch) -> ClientResult<Envelope<Vec<Job>>> {
        self.api.get_with_query("/jobs", search.query_pairs()).await
    }

    pub async fn get_job_by_id(&self, id: JobId) -> ClientResult<Envelope<Job>> {
        self.api.get(&format!("/jobs/{}", id)).await
    }

    pub async fn get_recruiter_jobs(&self, recruiter_id: UserId) -> ClientResult<Envelope<Vec<Job>>> {
        self.api.get(&format!("/jobs/recruiter/{}", recruiter_id)).await
    }

    pub async fn post_job(&self, recruiter_id: UserId, draft: &JobDraft) -> ClientResult<Envelope<Job>> {
        self.api
            .post_json(&format!("/jobs/recruiter/{}", recruiter_id), draft)
            .await
    }

    pub async fn update_job(&self, id: JobId, draft: &JobDraft) -> ClientResult<Envelope<Job>> {
        self.api.put_json(&format!("/jobs/{}", id), draft).await
    }

    pub async fn apply_action(&self, id: JobId, action: JobAction) -> ClientResult<Envelope<Job>> {
        self.api
            .put(&format!("/jobs/{}/{}", id, action.path_segment()))
            .await
    }

    pub async fn pause_job(&self, id: JobId) -> ClientResult<Envelope<Job>> {
        self.apply_action(id, JobAction::Pause).await
    }

    pub async fn resume_job(&self, id: JobId) -> ClientResult<Envelope<Job>> {
        self.apply_action(id, JobAction::Resume).await
    }

    pub async fn close_job(&self, id: JobId) -> ClientResult<Envelope<Job>> {
        self.apply_action(id, JobAction::Close).await
    }

    pub async fn reopen_job(&self, id: JobId) -> ClientResult<Envelope<Job>> {
        self.apply_action(id, JobAction::Reopen).await
    }

    pub async fn delete_job(&self, id: JobId) -> ClientResult<Envelope<Empty>> {
        self.api.delete(&format!("/jobs/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::{Method, RequestBody};
    use crate::test_support::{job_json, ok, Harness};
    use crate::types::{JobStatus, Role};
    use serde_json::json;

    #[tokio::test]
    async fn test_search_sends_only_filled_params() {
        let h = Harness::signed_out();
        h.mock.push_json(200, ok(json!([job_json(1, "ACTIVE")])));

        let jobs = JobService::new(h.api.clone());
        let search = JobSearch {
            keyword: Some("rust".into()),
            job_type: Some(String::new()),
            location: Some("Remote".into()),
        };
        let list = jobs.get_jobs(&search).await.unwrap().into_list();
        assert_eq!(list.len(), 1);

        let request = &h.mock.requests()[0];
        assert_eq!(request.path, "/jobs");
        assert_eq!(
            request.query,
            vec![
                ("keyword".to_string(), "rust".to_string()),
                ("location".to_string(), "Remote".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_status_actions_hit_their_paths() {
        let h = Harness::signed_in(5, Role::Recruiter).await;
        for _ in 0..4 {
            h.mock.push_json(200, ok(job_json(8, "PAUSED")));
        }
        let jobs = JobService::new(h.api.clone());
        let paused = jobs.pause_job(8).await.unwrap().into_data().unwrap();
        assert_eq!(paused.status, JobStatus::Paused);
        jobs.resume_job(8).await.unwrap();
        jobs.close_job(8).await.unwrap();
        jobs.reopen_job(8).await.unwrap();

        assert_eq!(
            h.mock.paths(),
            vec![
                "PUT /jobs/8/pause",
                "PUT /jobs/8/resume",
                "PUT /jobs/8/close",
                "PUT /jobs/8/reopen"
            ]
        );
    }

    #[tokio::test]
    async fn test_post_job_body() {
        let h = Harness::signed_in(5, Role::Recruiter).await;
        h.mock.on(Method::Post, "/jobs/recruiter/5", 201, ok(job_json(30, "ACTIVE")));

        let draft = JobDraft {
            title: "Platform Engineer".into(),
            salary: "₹20L".into(),
            job_type: "CONTRACT".into(),
            ..Default::default()
        };
        JobService::new(h.api.clone()).post_job(5, &draft).await.unwrap();

        match &h.mock.requests()[0].body {
            RequestBody::Json(body) => {
                assert_eq!(body["type"], "CONTRACT");
                assert_eq!(body["salary"], "₹20L");
            }
            other => panic!("unexpected body {:?}", other),
        }
    }
}
