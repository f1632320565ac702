// ── Runtime client configuration ──
//
// These types describe *how* to reach a HelloFace service and how the
// capture workflows behave. They never touch disk: the CLI resolves a
// profile into a `ClientConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CoreError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Which way the camera should face when a device offers a choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    #[default]
    User,
    Environment,
}

/// Preferred capture resolution and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConstraints {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub facing: Facing,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            facing: Facing::User,
        }
    }
}

/// Configuration for one HelloFace service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service root (e.g., `http://localhost:8000`).
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// How long a successful enrollment stays on screen before the
    /// workflow returns to idle.
    pub auto_reset_after: Duration,
    pub capture: CaptureConstraints,
    /// Optional bearer token for deployments behind an auth proxy.
    pub api_token: Option<SecretString>,
}

impl ClientConfig {
    /// Settings for a service on this machine at [`DEFAULT_BASE_URL`].
    pub fn local() -> Result<Self, CoreError> {
        let base_url = Url::parse(DEFAULT_BASE_URL).map_err(|e| CoreError::Config {
            message: format!("invalid default base URL '{DEFAULT_BASE_URL}': {e}"),
        })?;
        Ok(Self::new(base_url))
    }

    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
            auto_reset_after: Duration::from_secs(3),
            capture: CaptureConstraints::default(),
            api_token: None,
        }
    }
}
