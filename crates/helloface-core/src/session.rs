// ── Session ──
//
// Entry point for consumers: owns the resolved configuration and the
// shared service handle, and hands out workflows, directories and
// capture providers wired to both.

use std::sync::Arc;

use helloface_api::{FaceClient, TransportConfig};
use tracing::debug;

use crate::capture::{CameraSource, CaptureProvider};
use crate::config::ClientConfig;
use crate::directory::{ConfirmDelete, UserDirectory};
use crate::error::CoreError;
use crate::model::ServiceInfo;
use crate::overview::Overview;
use crate::service::FaceService;
use crate::workflow::{EnrollmentWorkflow, RecognitionWorkflow, WorkflowController};

/// Cheaply cloneable handle to one configured service.
pub struct Session<S: FaceService = FaceClient> {
    config: Arc<ClientConfig>,
    service: Arc<S>,
}

impl<S: FaceService> Clone for Session<S> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            service: Arc::clone(&self.service),
        }
    }
}

impl Session<FaceClient> {
    /// Build the HTTP client. Nothing is sent until an operation runs.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let client = FaceClient::new(config.base_url.clone(), &build_transport(&config))?;
        debug!(base_url = %client.base_url(), "session created");
        Ok(Self::with_service(config, Arc::new(client)))
    }
}

impl<S: FaceService> Session<S> {
    pub fn with_service(config: ClientConfig, service: Arc<S>) -> Self {
        Self {
            config: Arc::new(config),
            service,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    /// A fresh enrollment workflow that clears itself after success.
    pub fn enrollment(&self) -> EnrollmentWorkflow<S> {
        WorkflowController::new(Arc::clone(&self.service), self.config.auto_reset_after)
    }

    pub fn recognition(&self) -> RecognitionWorkflow<S> {
        WorkflowController::new(Arc::clone(&self.service), self.config.auto_reset_after)
    }

    pub fn directory(&self, confirm: ConfirmDelete) -> UserDirectory<S> {
        UserDirectory::new(Arc::clone(&self.service), confirm)
    }

    /// A capture provider using the configured constraints.
    pub fn capture<C: CameraSource>(&self, source: C) -> CaptureProvider<C> {
        CaptureProvider::new(source, self.config.capture)
    }

    pub async fn overview(&self) -> Overview {
        Overview::fetch(self.service.as_ref()).await
    }

    pub async fn service_info(&self) -> Result<ServiceInfo, CoreError> {
        self.service.service_info().await
    }
}

fn build_transport(config: &ClientConfig) -> TransportConfig {
    TransportConfig {
        timeout: config.timeout,
        api_token: config.api_token.clone(),
    }
}
