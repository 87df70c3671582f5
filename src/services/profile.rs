// src/services/profile.rs
use crate::core::ApiClient;
use crate::error::ClientResult;
use crate::types::user::UserId;
use crate::types::{Envelope, Profile, SaveProfileRequest};

#[derive(Clone)]
pub struct ProfileService {
    api: ApiClient,
}

impl ProfileService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_profile(&self, user_id: UserId) -> ClientResult<Envelope<Profile>> {
        self.api.get(&format!("/profile/{}", user_id)).await
    }

    /// Skills are de-duplicated before the request is built.
    pub async fn save_profile(&self, request: SaveProfileRequest) -> ClientResult<Envelope<Profile>> {
        self.api.post_json("/profile/save", &request.normalized()).await
    }
}
