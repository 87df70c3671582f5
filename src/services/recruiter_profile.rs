// src/services/recruiter_profile.rs
use crate::core::ApiClient;
use crate::error::ClientResult;
use crate::types::user::UserId;
use crate::types::{Envelope, RecruiterProfile};

#[derive(Clone)]
pub struct RecruiterProfileService {
    api: ApiClient,
}

impl RecruiterProfileService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `data` is null for a recruiter who never saved a profile.
    pub async fn get_recruiter_profile(
        &self,
        user_id: UserId,
    ) -> ClientResult<Envelope<RecruiterProfile>> {
        self.api.get(&format!("/recruiter/profile/{}", user_id)).await
    }

    pub async fn save_recruiter_profile(
        &self,
        user_id: UserId,
        profile: &RecruiterProfile,
    ) -> ClientResult<Envelope<RecruiterProfile>> {
        self.api
            .post_json(&format!("/recruiter/profile/{}", user_id), profile)
            .await
    }
}
