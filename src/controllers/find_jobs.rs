// src/controllers/find_jobs.rs
use crate::app::AppContext;
use crate::app_log;
use crate::error::{ClientError, ClientResult};
use crate::scope::ScreenScope;
use crate::types::job::JOB_TYPES;
use crate::types::{Job, JobId, JobSearch, Recommendation};

pub const ALL_TYPES: &str = "All Types";
pub const ALL_LOCATIONS: &str = "All Locations";
const TOP_RECOMMENDATIONS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationState {
    Idle,
    Loading,
    /// Show the "complete your profile" prompt. No recommendation request
    /// was made.
    ProfileIncomplete,
    /// Best matches, at most three. May be empty.
    Ready(Vec<Recommendation>),
    Failed(String),
}

pub struct FindJobsController {
    ctx: AppContext,
    scope: ScreenScope,
    all_jobs: Vec<Job>,
    pub keyword: String,
    pub job_type: String,
    pub location: String,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub recommendations: RecommendationState,
}

impl FindJobsController {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            scope: ScreenScope::new(),
            all_jobs: Vec::new(),
            keyword: String::new(),
            job_type: String::new(),
            location: String::new(),
            is_loading: false,
            error_message: None,
            recommendations: RecommendationState::Idle,
        }
    }

    pub async fn activate(&mut self) -> ClientResult<()> {
        self.load_jobs().await?;
        self.load_recommendations().await
    }

    pub fn search(&self) -> JobSearch {
        JobSearch {
            keyword: Some(self.keyword.clone()),
            job_type: filter_value(&self.job_type, ALL_TYPES),
            location: filter_value(&self.location, ALL_LOCATIONS),
        }
    }

    pub async fn load_jobs(&mut self) -> ClientResult<()> {
        self.is_loading = true;
        self.error_message = None;

        let search = self.search();
        let result = self.scope.guard(self.ctx.services.jobs.get_jobs(&search)).await;
        if matches!(result, Err(ClientError::Cancelled)) {
            return Err(ClientError::Cancelled);
        }
        self.is_loading = false;

        match result {
            Ok(envelope) if envelope.success => {
                self.all_jobs = envelope.into_list();
                app_log!(debug, "Loaded {} jobs", self.all_jobs.len());
            }
            Ok(envelope) => {
                self.error_message = Some(envelope.message_or("Failed to load jobs"));
            }
            Err(e) => {
                app_log!(error, "Failed to load jobs: {}", e);
                self.error_message = Some(e.user_message());
            }
        }
        Ok(())
    }

    /// Profile first; recommendations only for a complete profile. Any
    /// failure while reading the profile counts as incomplete.
    pub async fn load_recommendations(&mut self) -> ClientResult<()> {
        let Some(user) = self.ctx.session.current_user() else {
            self.recommendations = RecommendationState::ProfileIncomplete;
            return Ok(());
        };
        self.recommendations = RecommendationState::Loading;

        let profile = self
            .scope
            .guard(self.ctx.services.profile.get_profile(user.id))
            .await;
        let complete = match profile {
            Ok(envelope) => envelope.into_data().map(|p| p.is_complete()).unwrap_or(false),
            Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
            Err(e) => {
                app_log!(warn, "Profile check failed, treating as incomplete: {}", e);
                false
            }
        };

        if !complete {
            self.recommendations = RecommendationState::ProfileIncomplete;
            return Ok(());
        }

        let result = self
            .scope
            .guard(self.ctx.services.recommendations.get_user_recommendations(user.id))
            .await;
        self.recommendations = match result {
            Ok(envelope) if envelope.success => {
                let mut list = envelope.into_list();
                list.truncate(TOP_RECOMMENDATIONS);
                RecommendationState::Ready(list)
            }
            Ok(envelope) => RecommendationState::Failed(envelope.message_or("No recommendations available")),
            Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
            Err(e) => {
                app_log!(error, "Failed to load recommendations: {}", e);
                RecommendationState::Failed(e.user_message())
            }
        };
        Ok(())
    }

    /// Jobs matching the current filters. Keyword matches title, company or
    /// location, ignoring case.
    pub fn jobs(&self) -> Vec<&Job> {
        let keyword = self.keyword.trim().to_lowercase();
        let job_type = filter_value(&self.job_type, ALL_TYPES);
        let location = filter_value(&self.location, ALL_LOCATIONS);

        self.all_jobs
            .iter()
            .filter(|job| {
                keyword.is_empty()
                    || [&job.title, &job.company, &job.location]
                        .iter()
                        .any(|field| field.to_lowercase().contains(&keyword))
            })
            .filter(|job| job_type.as_deref().map_or(true, |t| job.job_type == t))
            .filter(|job| location.as_deref().map_or(true, |l| job.location == l))
            .collect()
    }

    pub fn clear_filters(&mut self) {
        self.keyword.clear();
        self.job_type.clear();
        self.location.clear();
    }

    pub fn job_type_options(&self) -> Vec<&'static str> {
        std::iter::once(ALL_TYPES).chain(JOB_TYPES).collect()
    }

    /// "All Locations" followed by each distinct location in load order.
    pub fn location_options(&self) -> Vec<String> {
        let mut options = vec![ALL_LOCATIONS.to_string()];
        for job in &self.all_jobs {
            if !job.location.is_empty() && !options.contains(&job.location) {
                options.push(job.location.clone());
            }
        }
        options
    }

    pub fn job_route(id: JobId) -> String {
        format!("/dashboard/seeker/find-jobs/{}", id)
    }
}

fn filter_value(value: &str, all: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == all {
        None
    } else {
        Some(value.to_string())
    }
}

impl Drop for FindJobsController {
    fn drop(&mut self) {
        self.scope.close();
    }
}
