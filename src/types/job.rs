// src/types/job.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::tone::StatusTone;
use super::wire::comma_list;

pub type JobId = i64;

/// Employment types offered by the post-job form.
pub const JOB_TYPES: [&str; 4] = ["FULL-TIME", "PART-TIME", "CONTRACT", "INTERNSHIP"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    #[default]
    Active,
    Paused,
    Closed,
    Draft,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Paused => "PAUSED",
            Self::Closed => "CLOSED",
            Self::Draft => "DRAFT",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            Self::Active => StatusTone::Positive,
            Self::Paused => StatusTone::Caution,
            Self::Closed => StatusTone::Negative,
            Self::Draft => StatusTone::Neutral,
        }
    }

    /// Only active postings accept applications and bookmarks.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "PAUSED" => Ok(Self::Paused),
            "CLOSED" => Ok(Self::Closed),
            "DRAFT" => Ok(Self::Draft),
            other => Err(format!("Unknown job status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    /// Display string with the currency prefix, e.g. `$120k - $150k`.
    #[serde(default)]
    pub salary: String,
    #[serde(rename = "type", default)]
    pub job_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub department: String,
    /// Comma-joined on the wire; see [`Job::requirement_list`].
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub applicants_count: u32,
    #[serde(default)]
    pub posted_date: String,
}

impl Job {
    pub fn requirement_list(&self) -> Vec<String> {
        comma_list::split(&self.requirements)
    }
}

/// Query parameters for `GET /jobs`. Empty fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobSearch {
    pub keyword: Option<String>,
    pub job_type: Option<String>,
    pub location: Option<String>,
}

impl JobSearch {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        [
            ("keyword", &self.keyword),
            ("type", &self.job_type),
            ("location", &self.location),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key.to_string(), v.to_string()))
        })
        .collect()
    }
}

/// Body of `post_job` / `update_job`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub description: String,
    pub requirements: String,
    pub department: String,
}
