// ── Service overview ──
//
// Stats and health are fetched concurrently and kept as separate results:
// one failing never hides the other.

use tracing::warn;

use crate::error::CoreError;
use crate::model::{HealthStatus, SystemStats};
use crate::service::FaceService;

/// Landing-page summary of the service.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub stats: Result<SystemStats, CoreError>,
    pub health: Result<HealthStatus, CoreError>,
}

impl Overview {
    /// Fetch stats and health in parallel.
    pub async fn fetch<S: FaceService>(service: &S) -> Self {
        let (stats, health) = tokio::join!(service.stats(), service.health());

        if let Err(e) = &stats {
            warn!(error = %e, "stats unavailable");
        }
        if let Err(e) = &health {
            warn!(error = %e, "health check unavailable");
        }
        Self { stats, health }
    }

    /// `true` only when health was fetched and reports healthy.
    pub fn is_healthy(&self) -> bool {
        self.health.as_ref().is_ok_and(HealthStatus::is_healthy)
    }
}
