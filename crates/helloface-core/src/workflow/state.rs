use std::fmt;

use serde::Serialize;

use crate::error::CoreError;
use crate::model::{CaptureFrame, Verdict};

/// Which backend operation a workflow drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowKind {
    Enrollment,
    Recognition,
}

impl WorkflowKind {
    /// Shown while a submission is outstanding.
    pub fn busy_label(self) -> &'static str {
        match self {
            Self::Enrollment => "Enrolling...",
            Self::Recognition => "Recognizing...",
        }
    }

    /// Shown before anything has been captured.
    pub fn idle_prompt(self) -> &'static str {
        match self {
            Self::Enrollment => "Capture a photo and fill in name and email to enroll",
            Self::Recognition => "Capture a photo to identify a person",
        }
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enrollment => f.write_str("enrollment"),
            Self::Recognition => f.write_str("recognition"),
        }
    }
}

/// Where a workflow currently stands.
///
/// ```text
/// Idle ──capture──▶ Ready ──submit──▶ Submitting ──▶ Succeeded ──reset──▶ Idle
///   ▲                 │                    │
///   └─────retake──────┘                    └──▶ Failed ──submit──▶ Submitting
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    Idle,
    Ready(CaptureFrame),
    Submitting(CaptureFrame),
    Succeeded(Verdict),
    /// `frame` is kept so the same capture can be resubmitted.
    Failed {
        error: CoreError,
        frame: Option<CaptureFrame>,
    },
}

impl WorkflowState {
    /// The frame this state holds, if any.
    pub fn frame(&self) -> Option<&CaptureFrame> {
        match self {
            Self::Ready(frame) | Self::Submitting(frame) => Some(frame),
            Self::Failed { frame, .. } => frame.as_ref(),
            Self::Idle | Self::Succeeded(_) => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting(_))
    }

    /// Whether a new frame may replace whatever is held now.
    pub fn accepts_capture(&self) -> bool {
        matches!(self, Self::Idle | Self::Failed { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Ready(_) => "ready",
            Self::Submitting(_) => "submitting",
            Self::Succeeded(_) => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }
}

/// A state tagged with the generation it was entered at.
///
/// The generation advances on every transition; a response or timer that
/// carries an older generation no longer applies.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSnapshot {
    pub generation: u64,
    pub state: WorkflowState,
}

/// How a `submit` call ended, when it did not fail validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The response was applied; carries the resulting state.
    Applied(WorkflowState),
    /// Another submission was already outstanding. Nothing was sent.
    InFlight,
    /// The workflow moved on while the request was outstanding and the
    /// response was dropped.
    Stale,
}
