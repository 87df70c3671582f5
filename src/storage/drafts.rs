// src/storage/drafts.rs
//! Applications kept on this device after a submission could not reach the
//! server. The user re-submits them by hand from the applications screen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LocalStore, APPLICATIONS_KEY};
use crate::app_log;
use crate::error::ClientResult;
use crate::types::{ApplicationRequest, JobId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftApplication {
    #[serde(flatten)]
    pub request: ApplicationRequest,
    pub saved_at: DateTime<Utc>,
}

impl DraftApplication {
    pub fn belongs_to(&self, user_id: UserId, job_id: JobId) -> bool {
        self.request.user_id == user_id && self.request.job_id == job_id
    }
}

#[derive(Clone, Debug)]
pub struct DraftApplications {
    store: LocalStore,
}

impl DraftApplications {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> ClientResult<Vec<DraftApplication>> {
        self.store.get_or_default(APPLICATIONS_KEY).await
    }

    pub async fn list_for_user(&self, user_id: UserId) -> ClientResult<Vec<DraftApplication>> {
        let mut drafts = self.list().await?;
        drafts.retain(|d| d.request.user_id == user_id);
        Ok(drafts)
    }

    /// Keep `request` as the only draft for its (user, job) pair.
    pub async fn save(&self, request: &ApplicationRequest) -> ClientResult<DraftApplication> {
        let draft = DraftApplication {
            request: request.clone(),
            saved_at: Utc::now(),
        };

        let stored = draft.clone();
        self.store
            .update(APPLICATIONS_KEY, move |drafts: &mut Vec<DraftApplication>| {
                drafts.retain(|d| !d.belongs_to(stored.request.user_id, stored.request.job_id));
                drafts.push(stored);
            })
            .await?;

        app_log!(
            info,
            "Kept draft application for job {} (user {})",
            request.job_id,
            request.user_id
        );
        Ok(draft)
    }

    pub async fn remove(&self, user_id: UserId, job_id: JobId) -> ClientResult<bool> {
        self.store
            .update(APPLICATIONS_KEY, |drafts: &mut Vec<DraftApplication>| {
                let before = drafts.len();
                drafts.retain(|d| !d.belongs_to(user_id, job_id));
                drafts.len() != before
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user_id: UserId, job_id: JobId, phone: &str) -> ApplicationRequest {
        ApplicationRequest {
            user_id,
            job_id,
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: phone.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_one_draft_per_user_and_job() {
        let drafts = LocalStore::in_memory().drafts();
        drafts.save(&request(1, 10, "111")).await.unwrap();
        drafts.save(&request(1, 10, "222")).await.unwrap();
        drafts.save(&request(1, 11, "333")).await.unwrap();
        drafts.save(&request(2, 10, "444")).await.unwrap();

        let mine = drafts.list_for_user(1).await.unwrap();
        assert_eq!(mine.len(), 2);
        let for_job_10 = mine.iter().find(|d| d.request.job_id == 10).unwrap();
        assert_eq!(for_job_10.request.phone, "222");
        assert_eq!(drafts.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_remove_only_matching_pair() {
        let drafts = LocalStore::in_memory().drafts();
        drafts.save(&request(1, 10, "111")).await.unwrap();
        drafts.save(&request(2, 10, "222")).await.unwrap();

        assert!(drafts.remove(1, 10).await.unwrap());
        assert!(!drafts.remove(1, 10).await.unwrap());
        assert_eq!(drafts.list_for_user(2).await.unwrap().len(), 1);
    }

    #[test]
    fn test_draft_wire_shape_is_flat() {
        let draft = DraftApplication {
            request: request(1, 10, "111"),
            saved_at: Utc::now(),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["jobId"], 10);
        assert!(json.get("savedAt").is_some());
        assert!(json.get("request").is_none());
    }
}
