// src/types/mod.rs
pub mod application;
pub mod job;
pub mod match_result;
pub mod profile;
pub mod recommendation;
pub mod recruiter_profile;
pub mod response;
pub mod tone;
pub mod user;
pub mod wire;

pub use application::{Application, ApplicationId, ApplicationRequest, ApplicationStatus};
pub use job::{Job, JobDraft, JobId, JobSearch, JobStatus};
pub use match_result::{MatchLabel, MatchResult};
pub use profile::{AiFeedback, Profile, SaveProfileRequest};
pub use recommendation::Recommendation;
pub use recruiter_profile::{HiringPreferences, PreferenceGroup, RecruiterProfile};
pub use response::Envelope;
pub use tone::StatusTone;
pub use user::{Role, User, UserId};
