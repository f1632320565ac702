// ── Domain model ──
//
// Canonical representations of what the client captures, submits and
// displays. Wire types from helloface-api are converted into these in
// `crate::convert`; nothing above this crate sees raw response shapes.

pub mod frame;
pub mod outcome;
pub mod system;
pub mod user;

pub use frame::CaptureFrame;
pub use outcome::{EnrollmentForm, EnrollmentReceipt, MatchedUser, RecognitionOutcome, Verdict};
pub use system::{HealthStatus, ServiceInfo, SystemStats};
pub use user::{UserId, UserRecord};
