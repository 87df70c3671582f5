// src/app.rs
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::app_log;
use crate::core::database::SqliteStore;
use crate::core::transport::{HttpTransport, Transport};
use crate::core::{ApiClient, ClientConfig};
use crate::services::Services;
use crate::session::SessionContext;
use crate::storage::LocalStore;
use crate::widgets::Notifier;

/// Everything a controller needs from the outside world.
#[derive(Clone)]
pub struct AppContext {
    pub services: Services,
    pub session: SessionContext,
    pub notifier: Notifier,
}

impl AppContext {
    pub fn new(transport: Arc<dyn Transport>, session: SessionContext) -> Self {
        let api = ApiClient::new(transport, session.clone());
        Self {
            services: Services::new(api),
            session,
            notifier: Notifier::default(),
        }
    }

    /// Open the durable store, restore the previous session and point the
    /// HTTP transport at the configured API.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let store = LocalStore::new(SqliteStore::open(&config.store_path).await?);
        let session = SessionContext::restore(store)
            .await
            .context("Failed to restore session")?;
        let transport = HttpTransport::new(config.base_url.clone(), config.timeout())?;

        app_log!(info, "API base URL: {}", config.base_url);
        Ok(Self::new(Arc::new(transport), session))
    }

    pub fn store(&self) -> &LocalStore {
        self.session.store()
    }
}
