// src/services/mod.rs
//! One service per API resource. Each method sends a single request and
//! answers with an [`Envelope`]; the enriched applications list is the one
//! exception.
//!
//! [`Envelope`]: crate::types::Envelope

pub mod applications;
pub mod auth;
pub mod jobs;
pub mod matching;
pub mod profile;
pub mod recommendations;
pub mod recruiter_profile;
pub mod upload;

pub use applications::ApplicationService;
pub use auth::AuthService;
pub use jobs::JobService;
pub use matching::MatchService;
pub use profile::ProfileService;
pub use recommendations::RecommendationService;
pub use recruiter_profile::RecruiterProfileService;
pub use upload::UploadService;

use crate::core::ApiClient;

/// Every service, built over one shared client.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub jobs: JobService,
    pub applications: ApplicationService,
    pub profile: ProfileService,
    pub recruiter_profile: RecruiterProfileService,
    pub recommendations: RecommendationService,
    pub matching: MatchService,
    pub upload: UploadService,
}

impl Services {
    pub fn new(api: ApiClient) -> Self {
        let jobs = JobService::new(api.clone());
        Self {
            auth: AuthService::new(api.clone()),
            applications: ApplicationService::new(api.clone(), jobs.clone()),
            jobs,
            profile: ProfileService::new(api.clone()),
            recruiter_profile: RecruiterProfileService::new(api.clone()),
            recommendations: RecommendationService::new(api.clone()),
            matching: MatchService::new(api.clone()),
            upload: UploadService::new(api),
        }
    }
}
