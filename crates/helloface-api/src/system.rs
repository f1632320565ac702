// System endpoints: banner, statistics, health.

use tracing::debug;

use crate::client::FaceClient;
use crate::error::Error;
use crate::types::{HealthResponse, ServiceInfo, StatsResponse};

impl FaceClient {
    /// Service banner.
    ///
    /// `GET /`
    pub async fn service_info(&self) -> Result<ServiceInfo, Error> {
        debug!("fetching service info");
        self.get("", "Failed to reach service").await
    }

    /// Enrollment counts and the recognition threshold.
    ///
    /// `GET /stats`
    pub async fn stats(&self) -> Result<StatsResponse, Error> {
        debug!("fetching stats");
        self.get("stats", "Failed to fetch stats").await
    }

    /// Backend health probe.
    ///
    /// `GET /health`
    pub async fn health(&self) -> Result<HealthResponse, Error> {
        debug!("health check");
        self.get("health", "Health check failed").await
    }
}
