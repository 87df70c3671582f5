// src/scope.rs
//! Lifetime of a screen's in-flight work.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::{ClientError, ClientResult};

/// Each controller owns one. Once closed, every guarded call resolves to
/// [`ClientError::Cancelled`] and the caller must leave its state alone.
#[derive(Debug, Clone, Default)]
pub struct ScreenScope {
    token: CancellationToken,
}

impl ScreenScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Await `fut` unless the scope closes first. A result that arrives
    /// after closing is dropped.
    pub async fn guard<T, F>(&self, fut: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        if self.is_closed() {
            return Err(ClientError::Cancelled);
        }

        let result = tokio::select! {
            biased;
            _ = self.token.cancelled() => return Err(ClientError::Cancelled),
            result = fut => result,
        };

        if self.is_closed() {
            Err(ClientError::Cancelled)
        } else {
            result
        }
    }

    /// A scope that closes together with this one.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }
}
