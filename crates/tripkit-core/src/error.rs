// ── Core error types ──
//
// User-facing errors from tripkit-core. Consumers never see raw HTTP or
// JSON failures; `From<tripkit_api::Error>` translates transport-layer
// errors into domain variants, and `user_message()` is the one place a
// failure is turned into the string stored in a cache error field.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    /// `{ success: false, message }` from the backend.
    #[error("{message}")]
    Rejected { message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // ── Local errors ─────────────────────────────────────────────────
    #[error("Session storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The human-readable message stored in a category's error field and
    /// shown in notifications.
    ///
    /// Backend-supplied messages pass through verbatim; everything else
    /// uses the `Display` form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message }
            | Self::ValidationFailed { message }
            | Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the backend reported the addressed record as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Api { status: 404, .. })
    }

    pub fn not_found(entity_type: &str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_owned(),
            identifier: identifier.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<tripkit_api::Error> for CoreError {
    fn from(err: tripkit_api::Error) -> Self {
        match err {
            tripkit_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            tripkit_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        status: e.status().map_or(0, |s| s.as_u16()),
                        message: e.to_string(),
                    }
                }
            }
            tripkit_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            tripkit_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            tripkit_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            tripkit_api::Error::Api { status: 400 | 422, message } => {
                CoreError::ValidationFailed { message }
            }
            tripkit_api::Error::Api { status, message } => CoreError::Api { status, message },
            tripkit_api::Error::Rejected { message } => CoreError::Rejected { message },
            tripkit_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            tripkit_api::Error::InvalidRequest(message) => CoreError::ValidationFailed { message },
        }
    }
}
