use serde::Serialize;

/// Service banner from the root endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: Option<String>,
}

/// Enrollment counts and the active recognition threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemStats {
    pub total_users: u64,
    pub total_embeddings: Option<u64>,
    pub recognition_threshold: f64,
    pub embedding_dimension: Option<u32>,
}

/// Backend health as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub models_loaded: Option<bool>,
    pub database_connected: Option<bool>,
    pub vector_store_ready: Option<bool>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
