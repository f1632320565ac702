// ── Workflow operations ──
//
// The two workflows share one state machine and differ only in what they
// validate, which endpoint they call and whether success clears itself.

use std::future::Future;

use crate::error::CoreError;
use crate::model::{CaptureFrame, EnrollmentForm, Verdict};
use crate::service::FaceService;

use super::state::WorkflowKind;

pub(crate) const FILL_IN_ALL_FIELDS: &str = "Please fill in all fields";
pub(crate) const CAPTURE_FIRST: &str = "Please capture a photo";

/// One capture-and-submit operation.
pub trait WorkflowOperation: Send + Sync + 'static {
    /// Non-image input collected alongside the frame.
    type Input: Send + 'static;

    const KIND: WorkflowKind;

    /// Return to idle on its own after a success.
    const AUTO_RESET: bool = false;

    /// Local checks run before anything is sent.
    fn validate(input: &Self::Input) -> Result<(), CoreError>;

    fn call<S: FaceService>(
        service: &S,
        input: Self::Input,
        frame: CaptureFrame,
    ) -> impl Future<Output = Result<Verdict, CoreError>> + Send;
}

/// Register a new person.
#[derive(Debug, Clone, Copy)]
pub struct Enrollment;

/// Identify whoever is in front of the camera.
#[derive(Debug, Clone, Copy)]
pub struct Recognition;

impl WorkflowOperation for Enrollment {
    type Input = EnrollmentForm;

    const KIND: WorkflowKind = WorkflowKind::Enrollment;
    const AUTO_RESET: bool = true;

    fn validate(form: &EnrollmentForm) -> Result<(), CoreError> {
        if form.is_complete() {
            Ok(())
        } else {
            Err(CoreError::validation(FILL_IN_ALL_FIELDS))
        }
    }

    async fn call<S: FaceService>(
        service: &S,
        form: EnrollmentForm,
        frame: CaptureFrame,
    ) -> Result<Verdict, CoreError> {
        service.enroll(form, frame).await.map(Verdict::Enrolled)
    }
}

impl WorkflowOperation for Recognition {
    type Input = ();

    const KIND: WorkflowKind = WorkflowKind::Recognition;

    fn validate(_: &()) -> Result<(), CoreError> {
        Ok(())
    }

    async fn call<S: FaceService>(
        service: &S,
        (): (),
        frame: CaptureFrame,
    ) -> Result<Verdict, CoreError> {
        service.recognize(frame).await.map(Verdict::Recognized)
    }
}
