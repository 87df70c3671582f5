// src/widgets/toast.rs
use std::time::Duration;

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::app_log;
use crate::types::StatusTone;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn tone(&self) -> StatusTone {
        match self {
            Self::Success => StatusTone::Positive,
            Self::Error => StatusTone::Negative,
            Self::Warning => StatusTone::Caution,
            Self::Info => StatusTone::Informative,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "fas fa-check-circle",
            Self::Error => "fas fa-times-circle",
            Self::Warning => "fas fa-exclamation-triangle",
            Self::Info => "fas fa-info-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
}

/// Fan-out of transient messages. Toasts sent while nobody listens are
/// dropped.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Toast>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(32)
    }
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.sender.subscribe()
    }

    pub fn show(&self, message: impl Into<String>, kind: ToastKind, duration: Duration) -> Toast {
        let toast = Toast {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
            duration,
        };
        if self.sender.send(toast.clone()).is_err() {
            app_log!(trace, "Toast dropped, no listener: {}", toast.message);
        }
        toast
    }

    pub fn success(&self, message: impl Into<String>) -> Toast {
        self.show(message, ToastKind::Success, DEFAULT_TOAST_DURATION)
    }

    pub fn error(&self, message: impl Into<String>) -> Toast {
        self.show(message, ToastKind::Error, DEFAULT_TOAST_DURATION)
    }

    pub fn warning(&self, message: impl Into<String>) -> Toast {
        self.show(message, ToastKind::Warning, DEFAULT_TOAST_DURATION)
    }

    pub fn info(&self, message: impl Into<String>) -> Toast {
        self.show(message, ToastKind::Info, DEFAULT_TOAST_DURATION)
    }
}
