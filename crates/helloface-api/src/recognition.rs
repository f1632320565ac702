// Enrollment and recognition endpoints.

use tracing::debug;

use crate::client::FaceClient;
use crate::error::Error;
use crate::types::{EnrollRequest, EnrollResponse, RecognizeRequest, RecognizeResponse};

impl FaceClient {
    /// Enroll a new user from a captured frame.
    ///
    /// `POST /enroll`
    pub async fn enroll(&self, request: &EnrollRequest) -> Result<EnrollResponse, Error> {
        debug!(name = %request.name, "enrolling user");
        self.post("enroll", request, "Enrollment failed").await
    }

    /// Ask the service to identify the face in a frame.
    ///
    /// `POST /recognize`
    ///
    /// A face that matches nobody is still a successful response with
    /// `recognized: false`.
    pub async fn recognize(&self, request: &RecognizeRequest) -> Result<RecognizeResponse, Error> {
        debug!("recognizing face");
        self.post("recognize", request, "Recognition failed").await
    }
}
