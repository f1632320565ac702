// ── Submission inputs and results ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{UserId, UserRecord};

/// Text fields an enrollment needs alongside the captured frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentForm {
    pub display_name: String,
    pub contact_email: String,
}

impl EnrollmentForm {
    pub fn new(display_name: impl Into<String>, contact_email: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            contact_email: contact_email.into(),
        }
    }

    /// Both fields present once surrounding whitespace is ignored.
    pub fn is_complete(&self) -> bool {
        !self.display_name.trim().is_empty() && !self.contact_email.trim().is_empty()
    }
}

/// Server acknowledgement of an enrollment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrollmentReceipt {
    pub message: String,
    /// The stored record, when the service echoed it back.
    pub user: Option<UserRecord>,
}

/// The best match for a recognized face.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedUser {
    pub id: UserId,
    pub display_name: String,
    pub contact_email: String,
    /// Similarity in `[0, 1]`.
    pub confidence: f64,
}

/// Result of a recognition request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecognitionOutcome {
    Matched {
        message: String,
        #[serde(flatten)]
        user: MatchedUser,
    },
    NotMatched {
        message: String,
    },
}

impl RecognitionOutcome {
    pub fn message(&self) -> &str {
        match self {
            Self::Matched { message, .. } | Self::NotMatched { message } => message,
        }
    }
}

/// What a workflow submission produced on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum Verdict {
    Enrolled(EnrollmentReceipt),
    Recognized(RecognitionOutcome),
}

impl Verdict {
    pub fn message(&self) -> &str {
        match self {
            Self::Enrolled(receipt) => &receipt.message,
            Self::Recognized(outcome) => outcome.message(),
        }
    }

    pub fn enrolled_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Enrolled(EnrollmentReceipt {
                user: Some(user), ..
            }) => Some(user.enrolled_at),
            _ => None,
        }
    }
}
