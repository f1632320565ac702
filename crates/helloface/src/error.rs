//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use helloface_config::ConfigError;
use helloface_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const DEVICE: i32 = 9;
    pub const SERVICE: i32 = 10;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the HelloFace service: {reason}")]
    #[diagnostic(
        code(helloface::connection_failed),
        help(
            "Check that the service is running and the URL is right.\n\
             Try: helloface status --url http://localhost:8000"
        )
    )]
    ConnectionFailed { reason: String },

    // ── Capture ──────────────────────────────────────────────────────
    #[error("Camera unavailable: {reason}")]
    #[diagnostic(
        code(helloface::device_unavailable),
        help("Pass a readable JPEG, PNG or WebP file with --image.")
    )]
    DeviceUnavailable { reason: String },

    // ── Service ──────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(helloface::service_error))]
    Service { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(helloface::not_found),
        help("Run: helloface users list to see enrolled users")
    )]
    NotFound { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(helloface::invalid_input))]
    InvalidInput { message: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(helloface::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(helloface::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: helloface config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(helloface::config))]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(helloface::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("Internal error: {0}")]
    #[diagnostic(code(helloface::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(Box::new(other)),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::DeviceUnavailable { .. } => exit_code::DEVICE,
            Self::Service { .. } => exit_code::SERVICE,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::InvalidInput { .. }
            | Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::ProfileNotFound { .. } | Self::Config(_) | Self::Internal(_) | Self::Io(_) => {
                exit_code::GENERAL
            }
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DeviceUnavailable { reason } => Self::DeviceUnavailable { reason },
            CoreError::Validation { message } => Self::InvalidInput { message },
            CoreError::Server { message, .. } => Self::Service { message },
            CoreError::NotFound { message } => Self::NotFound { message },
            CoreError::Transport { message } => Self::ConnectionFailed { reason: message },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}
