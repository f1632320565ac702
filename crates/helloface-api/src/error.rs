use thiserror::Error;

/// Top-level error type for the `helloface-api` crate.
///
/// Covers every failure mode of the HTTP surface: transport, non-success
/// responses, and malformed bodies. `helloface-core` maps these into the
/// user-facing error taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Service ─────────────────────────────────────────────────────
    /// Non-success response. `message` is the server's `detail` when it
    /// sent one, otherwise the operation's generic fallback.
    #[error("Service error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP 404 -- the targeted resource no longer exists.
    #[error("Not found: {message}")]
    NotFound { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Returns `true` if the request never produced a usable response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Deserialization { .. })
    }

    /// HTTP status code of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The human-readable message, without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. }
            | Self::NotFound { message }
            | Self::Deserialization { message, .. } => message.clone(),
            Self::ClientBuild(reason) => reason.clone(),
            Self::Transport(e) => e.to_string(),
            Self::InvalidUrl(e) => e.to_string(),
        }
    }
}
