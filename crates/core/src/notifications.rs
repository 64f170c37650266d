use serde::{Deserialize, Serialize};

/// How prominently a notification should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Success,
    Warning,
    /// Shown as a destructive toast
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "Info"),
            Severity::Success => write!(f, "Success"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Error => write!(f, "Error"),
        }
    }
}

/// A user-facing message as handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }
}

/// Toast/alert capability injected into the store and dashboard.
///
/// Fire-and-forget: callers never wait on or inspect the outcome.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, title: &str, message: &str, severity: Severity);
}

/// Sink that forwards every notification to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, title: &str, message: &str, severity: Severity) {
        match severity {
            Severity::Error => log::error!("{title}: {message}"),
            Severity::Warning => log::warn!("{title}: {message}"),
            Severity::Info | Severity::Success => log::info!("{title}: {message}"),
        }
    }
}
