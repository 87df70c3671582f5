// src/types/application.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::job::{Job, JobId};
use super::tone::StatusTone;
use super::user::UserId;

pub type ApplicationId = i64;

/// Pipeline position of an application. The server owns transitions; the
/// client only reflects what it confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[default]
    #[serde(alias = "NEW")]
    Applied,
    #[serde(alias = "UNDER REVIEW")]
    UnderReview,
    Shortlisted,
    #[serde(alias = "INTERVIEWED")]
    Interview,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 6] = [
        Self::Applied,
        Self::UnderReview,
        Self::Shortlisted,
        Self::Interview,
        Self::Hired,
        Self::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "APPLIED",
            Self::UnderReview => "UNDER_REVIEW",
            Self::Shortlisted => "SHORTLISTED",
            Self::Interview => "INTERVIEW",
            Self::Hired => "HIRED",
            Self::Rejected => "REJECTED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::UnderReview => "Under review",
            Self::Shortlisted => "Shortlisted",
            Self::Interview => "Interview",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            Self::Applied => StatusTone::Neutral,
            Self::UnderReview => StatusTone::Caution,
            Self::Shortlisted => StatusTone::Informative,
            Self::Interview => StatusTone::Highlight,
            Self::Hired => StatusTone::Celebrate,
            Self::Rejected => StatusTone::Negative,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Hired | Self::Rejected)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace([' ', '-'], "_");
        if normalized == "NEW" {
            return Ok(Self::Applied);
        }
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("Unknown application status: {}", s.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub user_id: UserId,
    pub job_id: JobId,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub years_of_experience: u32,
    #[serde(default)]
    pub current_company: String,
    #[serde(default)]
    pub resume_url: String,
    #[serde(default)]
    pub cover_letter: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub applied_date: String,

    // Display fields filled from the job when listing a seeker's applications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
}

impl Application {
    pub fn attach_job(&mut self, job: &Job) {
        self.job_title = Some(job.title.clone());
        self.company = Some(job.company.clone());
        self.location = Some(job.location.clone());
        self.salary = Some(job.salary.clone());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub user_id: UserId,
    pub job_id: JobId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub years_of_experience: u32,
    pub current_company: String,
    pub resume_url: String,
    pub cover_letter: String,
}

impl ApplicationRequest {
    /// Names of the required fields that are blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}
