// ── Service port ──
//
// Everything above the transport talks to the recognition backend through
// `FaceService`. `FaceClient` is the production implementation; tests plug
// in scripted fakes to control response ordering.

use std::future::Future;

use helloface_api::FaceClient;
use helloface_api::types::{EnrollRequest, RecognizeRequest};

use crate::error::CoreError;
use crate::model::{
    CaptureFrame, EnrollmentForm, EnrollmentReceipt, HealthStatus, RecognitionOutcome,
    ServiceInfo, SystemStats, UserId, UserRecord,
};

/// The six operations the recognition backend offers.
pub trait FaceService: Send + Sync + 'static {
    fn service_info(&self) -> impl Future<Output = Result<ServiceInfo, CoreError>> + Send;

    /// Enroll one person from a form and a frame.
    fn enroll(
        &self,
        form: EnrollmentForm,
        frame: CaptureFrame,
    ) -> impl Future<Output = Result<EnrollmentReceipt, CoreError>> + Send;

    /// Identify whoever is in the frame.
    fn recognize(
        &self,
        frame: CaptureFrame,
    ) -> impl Future<Output = Result<RecognitionOutcome, CoreError>> + Send;

    /// All enrolled users, in service order.
    fn list_users(&self) -> impl Future<Output = Result<Vec<UserRecord>, CoreError>> + Send;

    /// Delete one user, returning the service's confirmation text.
    fn delete_user(&self, id: UserId) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn stats(&self) -> impl Future<Output = Result<SystemStats, CoreError>> + Send;

    fn health(&self) -> impl Future<Output = Result<HealthStatus, CoreError>> + Send;
}

impl FaceService for FaceClient {
    async fn service_info(&self) -> Result<ServiceInfo, CoreError> {
        Ok(FaceClient::service_info(self).await?.into())
    }

    async fn enroll(
        &self,
        form: EnrollmentForm,
        frame: CaptureFrame,
    ) -> Result<EnrollmentReceipt, CoreError> {
        let request = EnrollRequest {
            name: form.display_name.trim().to_owned(),
            email: form.contact_email.trim().to_owned(),
            image: frame.to_data_url(),
        };
        Ok(FaceClient::enroll(self, &request).await?.into())
    }

    async fn recognize(&self, frame: CaptureFrame) -> Result<RecognitionOutcome, CoreError> {
        let request = RecognizeRequest {
            image: frame.to_data_url(),
        };
        FaceClient::recognize(self, &request).await?.try_into()
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, CoreError> {
        let resp = FaceClient::list_users(self).await?;
        Ok(resp.users.into_iter().map(UserRecord::from).collect())
    }

    async fn delete_user(&self, id: UserId) -> Result<String, CoreError> {
        Ok(FaceClient::delete_user(self, id).await?.message)
    }

    async fn stats(&self) -> Result<SystemStats, CoreError> {
        Ok(FaceClient::stats(self).await?.into())
    }

    async fn health(&self) -> Result<HealthStatus, CoreError> {
        Ok(FaceClient::health(self).await?.into())
    }
}
