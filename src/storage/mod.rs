// src/storage/mod.rs
//! Local key-value persistence that survives restarts: session identity,
//! saved jobs and locally kept draft applications.
//!
//! Values are stored as JSON text under fixed keys. Backends only move
//! strings; typing happens in [`LocalStore`].

pub mod drafts;
pub mod memory;
pub mod saved_jobs;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::app_log;
use crate::error::{ClientError, ClientResult};

pub use drafts::{DraftApplication, DraftApplications};
pub use memory::MemoryStore;
pub use saved_jobs::SavedJobs;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const SAVED_JOBS_KEY: &str = "savedJobs";
pub const APPLICATIONS_KEY: &str = "applications";

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> ClientResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    async fn remove(&self, key: &str) -> ClientResult<()>;
}

/// Typed handle over a [`KeyValueStore`]. Cheap to clone; clones share the
/// backend and the write lock.
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl LocalStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> ClientResult<Option<T>> {
        match self.read(key).await? {
            Some(Ok(value)) => Ok(Some(value)),
            Some(Err(e)) => Err(ClientError::storage(format!(
                "corrupt value under '{}': {}",
                key, e
            ))),
            None => Ok(None),
        }
    }

    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> ClientResult<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw).await
    }

    pub async fn remove(&self, key: &str) -> ClientResult<()> {
        self.backend.remove(key).await
    }

    /// Collection read that never fails on bad data: a corrupt value is
    /// logged and read as the default. Backend failures still surface.
    pub async fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> ClientResult<T> {
        match self.read(key).await? {
            Some(Ok(value)) => Ok(value),
            Some(Err(e)) => {
                app_log!(warn, "Discarding unreadable local value under '{}': {}", key, e);
                Ok(T::default())
            }
            None => Ok(T::default()),
        }
    }

    /// Backend errors in the outer result, parse errors in the inner one.
    async fn read<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> ClientResult<Option<Result<T, serde_json::Error>>> {
        Ok(self
            .backend
            .get(key)
            .await?
            .map(|raw| serde_json::from_str(&raw)))
    }

    /// Read-modify-write of a whole value under the store's write lock.
    pub async fn update<T, R>(&self, key: &str, f: impl FnOnce(&mut T) -> R) -> ClientResult<R>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        let _guard = self.write_lock.lock().await;
        let mut value: T = self.get_or_default(key).await?;
        let result = f(&mut value);
        self.set(key, &value).await?;
        Ok(result)
    }

    pub fn saved_jobs(&self) -> SavedJobs {
        SavedJobs::new(self.clone())
    }

    pub fn drafts(&self) -> DraftApplications {
        DraftApplications::new(self.clone())
    }
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore").finish_non_exhaustive()
    }
}
