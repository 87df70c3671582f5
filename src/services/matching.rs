// src/services/matching.rs
use crate::core::ApiClient;
use crate::error::ClientResult;
use crate::types::match_result::MatchRequest;
use crate::types::user::UserId;
use crate::types::{Envelope, JobId, MatchResult};

#[derive(Clone)]
pub struct MatchService {
    api: ApiClient,
}

impl MatchService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn check_compatibility(
        &self,
        user_id: UserId,
        job_id: JobId,
    ) -> ClientResult<Envelope<MatchResult>> {
        self.api
            .post_json("/match/check", &MatchRequest { user_id, job_id })
            .await
    }
}
