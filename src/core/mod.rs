// src/core/mod.rs
//! Plumbing shared by every service: configuration, the durable store, the
//! transport seam and the envelope-decoding client.

pub mod config_manager;
pub mod database;
pub mod service_client;
pub mod transport;

pub use config_manager::ClientConfig;
pub use database::SqliteStore;
pub use service_client::ApiClient;
