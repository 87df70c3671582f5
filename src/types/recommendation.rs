// src/types/recommendation.rs
use serde::{Deserialize, Serialize};

use super::job::JobId;
use super::wire::score;

/// A server-ranked job suggestion. The ranking itself is opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub job_id: JobId,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub skills: Vec<String>,
    /// 0-100.
    #[serde(rename = "match", deserialize_with = "score::deserialize", default)]
    pub match_score: f64,
}
