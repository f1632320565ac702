// helloface-core: Capture, submit and render workflows between helloface-api and consumers.

pub mod capture;
pub mod config;
pub mod convert;
pub mod directory;
pub mod error;
pub mod model;
pub mod overview;
pub mod presenter;
pub mod service;
pub mod session;
pub mod workflow;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use capture::{CameraDevice, CameraSource, CaptureProvider, StillImageSource};
pub use config::{CaptureConstraints, ClientConfig, Facing};
pub use directory::{ConfirmDelete, DeleteOutcome, LoadState, UserDirectory, UserFilter};
pub use error::CoreError;
pub use overview::Overview;
pub use presenter::{Confidence, Presentation, Tone};
pub use service::FaceService;
pub use session::Session;
pub use workflow::{
    Enrollment, EnrollmentWorkflow, Recognition, RecognitionWorkflow, Submission, WorkflowController,
    WorkflowKind, WorkflowOperation, WorkflowSnapshot, WorkflowState,
};

pub use model::{
    CaptureFrame, EnrollmentForm, EnrollmentReceipt, HealthStatus, MatchedUser, RecognitionOutcome,
    ServiceInfo, SystemStats, UserId, UserRecord, Verdict,
};
