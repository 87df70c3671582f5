// src/error.rs
//! Error taxonomy for the client.
//!
//! Structured API failures (`success: false` in the envelope) are *not*
//! errors: services return them as `Ok(Envelope)` and callers branch on
//! `success`. Everything here is either caught before dispatch (validation,
//! missing session, rejected upload) or a failure of the exchange itself.

use thiserror::Error;

use crate::upload_validator::UploadValidationError;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Input rejected locally; never reached the network.
    #[error("{0}")]
    Validation(String),

    /// The action needs a signed-in user.
    #[error("You need to be signed in to do that")]
    Unauthenticated,

    /// Connection refused, DNS, timeout, TLS...
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx response whose body was not a failure envelope.
    #[error("Server returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Failed to decode {context}: {message}")]
    Decode { context: String, message: String },

    #[error("Local storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Upload(#[from] UploadValidationError),

    /// The owning screen was closed before the result arrived.
    #[error("Request abandoned because the screen was closed")]
    Cancelled,
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn decode(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            context: context.into(),
            message: message.into(),
        }
    }

    /// True for errors that were raised before any request was sent.
    pub fn is_pre_dispatch(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Unauthenticated | Self::Upload(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Message suitable for a banner. Transport-level detail stays in the
    /// logs; the user gets a generic retry hint.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Unauthenticated => self.to_string(),
            Self::Upload(err) => err.message.clone(),
            Self::Http { message, .. } if !message.is_empty() => message.clone(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<sqlx::Error> for ClientError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode("JSON payload", err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
