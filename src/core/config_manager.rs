// src/core/config_manager.rs
//! Client configuration: API location, local store path and request timeout.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::app_log;

pub const DEFAULT_CONFIG_FILE: &str = "jobboard.yaml";
pub const DEFAULT_BASE_URL: &str = "http://localhost:9090/api";
pub const DEFAULT_STORE_PATH: &str = "./jobboard.db";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub store_path: PathBuf,
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    development: ClientConfig,
    production: ClientConfig,
}

impl ClientConfig {
    /// Load `jobboard.yaml` from the working directory for the selected
    /// environment. A missing file yields the built-in defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let environment = Self::environment();
        app_log!(info, "Loading client configuration for environment: {}", environment);

        let file = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            app_log!(debug, "{} not found, using defaults", path.display());
            ConfigFile::default()
        };

        let base_url_override = std::env::var("BASE_URL").ok();
        let config = Self::select(file, &environment, base_url_override.as_deref());
        config.resolved()
    }

    fn parse(content: &str) -> Result<ConfigFile> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn environment() -> String {
        std::env::var("JOBBOARD_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "development".to_string())
    }

    fn select(file: ConfigFile, environment: &str, base_url_override: Option<&str>) -> Self {
        match environment {
            "production" => {
                let mut config = file.production;
                if let Some(url) = base_url_override.filter(|u| !u.trim().is_empty()) {
                    config.base_url = url.trim().to_string();
                }
                config
            }
            _ => file.development,
        }
    }

    fn resolved(mut self) -> Result<Self> {
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        if self.store_path.is_relative() {
            let current_dir =
                std::env::current_dir().context("Failed to get current directory")?;
            self.store_path = current_dir.join(&self.store_path);
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
