// src/services/recommendations.rs
use crate::core::ApiClient;
use crate::error::ClientResult;
use crate::types::user::UserId;
use crate::types::{Envelope, Recommendation};

#[derive(Clone)]
pub struct RecommendationService {
    api: ApiClient,
}

impl RecommendationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Ranked by the server. An empty list is a normal answer.
    pub async fn get_user_recommendations(
        &self,
        user_id: UserId,
    ) -> ClientResult<Envelope<Vec<Recommendation>>> {
        self.api
            .get(&format!("/recommendations/user/{}", user_id))
            .await
    }
}
