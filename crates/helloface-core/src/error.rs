// ── Core error types ──
//
// User-facing errors from helloface-core. Consumers never see reqwest
// errors or JSON parse failures directly: the `From<helloface_api::Error>`
// impl folds transport-layer failures into this taxonomy.

use thiserror::Error;

/// Unified error type for the core crate.
///
/// `Clone` so a failure can live inside a published workflow state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Capture ─────────────────────────────────────────────────────
    /// Camera or image source could not be opened or produced no frame.
    #[error("Camera unavailable: {reason}")]
    DeviceUnavailable { reason: String },

    // ── Local input ─────────────────────────────────────────────────
    /// Submission refused before any request was made.
    #[error("{message}")]
    Validation { message: String },

    // ── Service ─────────────────────────────────────────────────────
    /// Non-success response from the service.
    #[error("{message}")]
    Server { status: Option<u16>, message: String },

    #[error("{message}")]
    NotFound { message: String },

    /// Network failure or a response body that could not be decoded.
    #[error("Network error: {message}")]
    Transport { message: String },

    // ── Configuration errors ────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ─────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn device(reason: impl Into<String>) -> Self {
        Self::DeviceUnavailable {
            reason: reason.into(),
        }
    }

    /// Text suitable for showing an end user next to a failure marker.
    ///
    /// Server-supplied messages pass through untouched; local failures keep
    /// their prefix so "Camera unavailable" reads as such.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Server { message, .. }
            | Self::NotFound { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns `true` when the failure happened before reaching the service.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::DeviceUnavailable { .. } | Self::Validation { .. } | Self::Config { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<helloface_api::Error> for CoreError {
    fn from(err: helloface_api::Error) -> Self {
        match err {
            helloface_api::Error::Transport(ref e) => {
                let message = if e.is_timeout() {
                    "request timed out".to_owned()
                } else if e.is_connect() {
                    let url = e.url().map_or_else(|| "<unknown>".into(), ToString::to_string);
                    format!("cannot connect to {url}")
                } else {
                    e.to_string()
                };
                CoreError::Transport { message }
            }
            helloface_api::Error::Deserialization { message, .. } => CoreError::Transport {
                message: format!("malformed response: {message}"),
            },
            helloface_api::Error::Api { status, message } => CoreError::Server {
                status: Some(status),
                message,
            },
            helloface_api::Error::NotFound { message } => CoreError::NotFound { message },
            helloface_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid service URL: {e}"),
            },
            helloface_api::Error::ClientBuild(reason) => CoreError::Config { message: reason },
        }
    }
}
