// src/types/profile.rs
use serde::{Deserialize, Serialize};

use super::user::UserId;
use super::wire::{comma_list, dedupe_case_insensitive, json_blob, lenient_id};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiFeedback {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub market_fit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileUser {
    #[serde(deserialize_with = "lenient_id::deserialize")]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub id: i64,
    pub user: ProfileUser,
    #[serde(default)]
    pub bio: String,
    #[serde(with = "comma_list", default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub resume_url: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(with = "json_blob", default)]
    pub ai_feedback: Option<AiFeedback>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Profile {
    /// Recommendations are only worth asking for when this holds.
    pub fn is_complete(&self) -> bool {
        is_complete(&self.bio, &self.skills, &self.resume_url)
    }
}

pub fn is_complete(bio: &str, skills: &[String], resume_url: &str) -> bool {
    !bio.trim().is_empty()
        && skills.iter().any(|s| !s.trim().is_empty())
        && !resume_url.trim().is_empty()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProfileRequest {
    pub user_id: UserId,
    pub bio: String,
    #[serde(with = "comma_list")]
    pub skills: Vec<String>,
    pub resume_url: String,
    pub avatar_url: String,
    #[serde(with = "json_blob")]
    pub ai_feedback: Option<AiFeedback>,
}

impl SaveProfileRequest {
    /// Skills are de-duplicated case-insensitively before they leave the client.
    pub fn normalized(mut self) -> Self {
        self.skills = dedupe_case_insensitive(&self.skills);
        self
    }
}
