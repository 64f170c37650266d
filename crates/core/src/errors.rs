use thiserror::Error;

/// Advisory shown when a request went out but nothing came back.
pub const NO_RESPONSE_MESSAGE: &str = "No response from server. Please check your connection.";

/// Fallback text when the service rejects a request without a `detail` field.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Failed to fetch stock data";

/// Errors raised by a persistence adapter.
///
/// The portfolio store recovers from all of these locally (it starts empty or
/// keeps its in-memory state), so none of them ever reach the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("No saved portfolio found")]
    NotFound,

    #[error("Saved portfolio is malformed: {0}")]
    Malformed(String),

    #[error("Storage I/O error: {0}")]
    Io(String),
}

/// Normalized failure of a call to the prediction service.
///
/// `Display` is the user-facing message: server rejections show the
/// service's own text verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    /// The service answered with a non-success status.
    #[error("{0}")]
    ServerRejected(String),

    /// The request was sent but no response arrived (connectivity, timeout).
    #[error("{}", NO_RESPONSE_MESSAGE)]
    NoResponse,

    /// The request could not be built or sent at all.
    #[error("{0}")]
    RequestSetupFailed(String),

    /// The service answered 2xx but the body does not match the expected shape.
    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),
}

/// Umbrella error for facade and configuration operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error("Configuration error: {0}")]
    Config(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for PersistenceError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            PersistenceError::NotFound
        } else {
            PersistenceError::Io(e.to_string())
        }
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        PersistenceError::Malformed(e.to_string())
    }
}

impl From<reqwest::Error> for PredictionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            return PredictionError::RequestSetupFailed(sanitize(&e));
        }
        if e.is_decode() {
            return PredictionError::InvalidResponse(sanitize(&e));
        }
        // Anything else happened after the request left: connect, timeout,
        // reset or truncated body. The raw transport text is not surfaced.
        PredictionError::NoResponse
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(e: toml::de::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for CoreError {
    fn from(e: toml::ser::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}

/// Strip query parameters from URLs embedded in reqwest error text.
fn sanitize(e: &reqwest::Error) -> String {
    let msg = e.to_string();
    if let Some(idx) = msg.find('?') {
        format!("{}?<query redacted>", &msg[..idx])
    } else {
        msg
    }
}
