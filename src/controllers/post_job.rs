// src/controllers/post_job.rs
//! Create and edit a posting. Salary is entered without its currency
//! symbol; the symbol is prefixed on the way out and split off on the way in.

use std::fmt;
use std::str::FromStr;

use crate::app::AppContext;
use crate::app_log;
use crate::error::{ClientError, ClientResult};
use crate::scope::ScreenScope;
use crate::types::job::JOB_TYPES;
use crate::types::{Job, JobDraft, JobId, Role};

pub const LISTINGS_ROUTE: &str = "/dashboard/recruiter/listings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Currency {
    Inr,
    #[default]
    Usd,
    Aud,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Self::Inr, Self::Usd, Self::Aud];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Inr => "INR",
            Self::Usd => "USD",
            Self::Aud => "AUD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Inr => "₹",
            Self::Usd => "$",
            Self::Aud => "A$",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Inr => "Indian Rupee",
            Self::Usd => "US Dollar",
            Self::Aud => "Australian Dollar",
        }
    }

    /// Split a stored salary into currency and amount. `A$` is checked
    /// before `$`; an unknown prefix is kept in the amount as USD.
    pub fn split_salary(salary: &str) -> (Currency, String) {
        for currency in [Self::Inr, Self::Aud, Self::Usd] {
            if let Some(rest) = salary.strip_prefix(currency.symbol()) {
                return (currency, rest.to_string());
            }
        }
        (Self::Usd, salary.to_string())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.symbol())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(wanted) || c.symbol() == wanted)
            .ok_or_else(|| format!("Unknown currency: {}", wanted))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostJobForm {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Amount only, e.g. `120k - 150k`.
    pub salary: String,
    pub currency: Currency,
    pub job_type: String,
    pub description: String,
    pub requirements: String,
    pub department: String,
}

impl Default for PostJobForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            company: String::new(),
            location: String::new(),
            salary: String::new(),
            currency: Currency::default(),
            job_type: JOB_TYPES[0].to_string(),
            description: String::new(),
            requirements: String::new(),
            department: String::new(),
        }
    }
}

impl PostJobForm {
    pub fn from_job(job: &Job) -> Self {
        let (currency, salary) = Currency::split_salary(&job.salary);
        Self {
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            salary,
            currency,
            job_type: if job.job_type.is_empty() {
                JOB_TYPES[0].to_string()
            } else {
                job.job_type.clone()
            },
            description: job.description.clone(),
            requirements: job.requirements.clone(),
            department: job.department.clone(),
        }
    }

    pub fn has_required_fields(&self) -> bool {
        [&self.title, &self.company, &self.location, &self.salary]
            .iter()
            .all(|value| !value.trim().is_empty())
    }

    pub fn to_draft(&self) -> JobDraft {
        JobDraft {
            title: self.title.trim().to_string(),
            company: self.company.trim().to_string(),
            location: self.location.trim().to_string(),
            salary: format!("{}{}", self.currency.symbol(), self.salary.trim()),
            job_type: self.job_type.clone(),
            description: self.description.clone(),
            requirements: self.requirements.clone(),
            department: self.department.trim().to_string(),
        }
    }
}

pub struct PostJobController {
    ctx: AppContext,
    scope: ScreenScope,
    edit_job_id: Option<JobId>,
    pub form: PostJobForm,
    pub is_loading_job: bool,
    pub is_posting: bool,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

impl PostJobController {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            scope: ScreenScope::new(),
            edit_job_id: None,
            form: PostJobForm::default(),
            is_loading_job: false,
            is_posting: false,
            success_message: None,
            error_message: None,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_job_id.is_some()
    }

    /// Switch to edit mode and fill the form from the stored posting.
    pub async fn load_for_edit(&mut self, job_id: JobId) -> ClientResult<()> {
        self.edit_job_id = Some(job_id);
        self.is_loading_job = true;

        let result = self
            .scope
            .guard(self.ctx.services.jobs.get_job_by_id(job_id))
            .await;
        if matches!(result, Err(ClientError::Cancelled)) {
            return Err(ClientError::Cancelled);
        }
        self.is_loading_job = false;

        match result {
            Ok(envelope) => {
                if let Some(job) = envelope.into_data() {
                    self.form = PostJobForm::from_job(&job);
                }
            }
            Err(e) => {
                app_log!(error, "Error loading job {}: {}", job_id, e);
                self.error_message = Some("Failed to load job data. Please try again.".to_string());
            }
        }
        Ok(())
    }

    /// Returns the route to navigate to when the posting was stored.
    pub async fn submit(&mut self) -> ClientResult<Option<&'static str>> {
        let recruiter = match self.ctx.session.require_role(Role::Recruiter) {
            Ok(user) => user,
            Err(_) => {
                app_log!(warn, "Job post attempted without a recruiter session");
                self.error_message = Some("User not authenticated. Please log in again.".to_string());
                return Ok(None);
            }
        };

        if !self.form.has_required_fields() {
            self.error_message = Some("Please fill in all required fields".to_string());
            return Ok(None);
        }

        self.is_posting = true;
        self.error_message = None;
        self.success_message = None;

        let draft = self.form.to_draft();
        let (done, failed) = if self.is_edit_mode() {
            ("Job updated successfully!", "Failed to update job")
        } else {
            ("Job posted successfully!", "Failed to post job")
        };

        let result = match self.edit_job_id {
            Some(id) => {
                app_log!(info, "Updating job {}", id);
                self.scope
                    .guard(self.ctx.services.jobs.update_job(id, &draft))
                    .await
            }
            None => {
                app_log!(info, "Posting job for recruiter {}", recruiter.id);
                self.scope
                    .guard(self.ctx.services.jobs.post_job(recruiter.id, &draft))
                    .await
            }
        };
        if matches!(result, Err(ClientError::Cancelled)) {
            return Err(ClientError::Cancelled);
        }
        self.is_posting = false;

        match result {
            Ok(envelope) if envelope.success => {
                self.success_message = Some(done.to_string());
                self.ctx.notifier.success(done);
                Ok(Some(LISTINGS_ROUTE))
            }
            Ok(envelope) => {
                self.error_message = Some(envelope.message_or(failed));
                Ok(None)
            }
            Err(e) => {
                app_log!(error, "{}: {}", failed, e);
                let detail = match &e {
                    ClientError::Http { message, .. } if !message.is_empty() => message.clone(),
                    _ => "Please try again.".to_string(),
                };
                self.error_message = Some(format!("{}: {}", failed, detail));
                Ok(None)
            }
        }
    }

    pub fn cancel(&self) -> &'static str {
        LISTINGS_ROUTE
    }
}

impl Drop for PostJobController {
    fn drop(&mut self) {
        self.scope.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::{Method, RequestBody};
    use crate::test_support::{fail, job_json, ok, Harness};
    use serde_json::json;

    #[test]
    fn test_split_salary_prefixes() {
        assert_eq!(Currency::split_salary("₹12L - 18L"), (Currency::Inr, "12L - 18L".into()));
        assert_eq!(Currency::split_salary("A$90k"), (Currency::Aud, "90k".into()));
        assert_eq!(Currency::split_salary("$120k - $150k"), (Currency::Usd, "120k - $150k".into()));
        assert_eq!(Currency::split_salary("€80"), (Currency::Usd, "€80".into()));
        assert_eq!("inr".parse::<Currency>().unwrap(), Currency::Inr);
        assert_eq!("A$".parse::<Currency>().unwrap(), Currency::Aud);
    }

    fn filled() -> PostJobForm {
        PostJobForm {
            title: "Platform Engineer".into(),
            company: "ServerSide".into(),
            location: "Remote".into(),
            salary: "90k".into(),
            currency: Currency::Aud,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_prefixes_currency() {
        let h = Harness::signed_in(5, Role::Recruiter).await;
        h.mock.on(Method::Post, "/jobs/recruiter/5", 201, ok(job_json(30, "ACTIVE")));
        let mut screen = PostJobController::new(h.ctx.clone());
        screen.form = filled();

        assert_eq!(screen.submit().await.unwrap(), Some(LISTINGS_ROUTE));
        assert_eq!(screen.success_message.as_deref(), Some("Job posted successfully!"));
        match &h.mock.requests()[0].body {
            RequestBody::Json(body) => {
                assert_eq!(body["salary"], "A$90k");
                assert_eq!(body["type"], "FULL-TIME");
            }
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_edit_loads_and_updates() {
        let h = Harness::signed_in(5, Role::Recruiter).await;
        h.mock.on(Method::Get, "/jobs/1", 200, ok(job_json(1, "ACTIVE")));
        h.mock.on(Method::Put, "/jobs/1", 400, fail("Title already used"));
        let mut screen = PostJobController::new(h.ctx.clone());

        screen.load_for_edit(1).await.unwrap();
        assert!(screen.is_edit_mode());
        assert_eq!(screen.form.currency, Currency::Usd);
        assert_eq!(screen.form.salary, "120k - $150k");

        assert_eq!(screen.submit().await.unwrap(), None);
        assert_eq!(screen.error_message.as_deref(), Some("Title already used"));
    }

    #[tokio::test]
    async fn test_missing_fields_send_nothing() {
        let h = Harness::signed_in(5, Role::Recruiter).await;
        let mut screen = PostJobController::new(h.ctx.clone());
        screen.form = PostJobForm { salary: " ".into(), ..filled() };

        assert_eq!(screen.submit().await.unwrap(), None);
        assert_eq!(screen.error_message.as_deref(), Some("Please fill in all required fields"));
        assert_eq!(h.mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_requires_recruiter_session() {
        let h = Harness::signed_in(3, Role::Seeker).await;
        let mut screen = PostJobController::new(h.ctx.clone());
        screen.form = filled();

        assert_eq!(screen.submit().await.unwrap(), None);
        assert_eq!(
            screen.error_message.as_deref(),
            Some("User not authenticated. Please log in again.")
        );
        assert_eq!(h.mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_error_message() {
        let h = Harness::signed_in(5, Role::Recruiter).await;
        h.mock.on(Method::Post, "/jobs/recruiter/5", 500, json!({"message": "Database down"}));
        let mut screen = PostJobController::new(h.ctx.clone());
        screen.form = filled();

        screen.submit().await.unwrap();
        assert_eq!(screen.error_message.as_deref(), Some("Failed to post job: Database down"));
    }
}
