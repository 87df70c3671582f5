// src/lib.rs
//! Client-side state and sync layer for the job board: typed API services,
//! session and local persistence, and per-screen controllers for seekers and
//! recruiters.

pub mod logging;

pub mod app;
pub mod cli;
pub mod controllers;
pub mod core;
pub mod error;
pub mod scope;
pub mod services;
pub mod session;
pub mod storage;
pub mod types;
pub mod upload_validator;
pub mod utils;
pub mod widgets;

#[cfg(test)]
mod test_support;

pub use app::AppContext;
pub use error::{ClientError, ClientResult};
pub use session::SessionContext;
