// src/types/match_result.rs
use std::fmt;

use serde::{Deserialize, Serialize};

use super::job::JobId;
use super::tone::StatusTone;
use super::user::UserId;
use super::wire::score;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub user_id: UserId,
    pub job_id: JobId,
}

/// Compatibility breakdown computed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    #[serde(deserialize_with = "score::deserialize")]
    pub match_score: f64,
    #[serde(deserialize_with = "score::deserialize", default)]
    pub skill_score: f64,
    #[serde(deserialize_with = "score::deserialize", default)]
    pub experience_score: f64,
    #[serde(deserialize_with = "score::deserialize", default)]
    pub profile_score: f64,
    #[serde(default)]
    pub feedback: String,
}

impl MatchResult {
    pub fn label(&self) -> MatchLabel {
        MatchLabel::from_score(self.match_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchLabel {
    Low,
    Fair,
    Good,
    Excellent,
}

impl MatchLabel {
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            Self::Excellent
        } else if score >= 50.0 {
            Self::Good
        } else if score >= 25.0 {
            Self::Fair
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Low => "Low",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            Self::Excellent => StatusTone::Positive,
            Self::Good => StatusTone::Informative,
            Self::Fair => StatusTone::Caution,
            Self::Low => StatusTone::Negative,
        }
    }
}

impl fmt::Display for MatchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
