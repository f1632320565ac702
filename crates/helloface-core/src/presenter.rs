// ── Result presenter ──
//
// Pure functions from workflow state to a display payload. No I/O, no
// timers: whatever renders the payload (terminal, GUI) decides colors and
// layout from `Tone`.

use serde::Serialize;

use crate::error::CoreError;
use crate::model::{EnrollmentReceipt, RecognitionOutcome, Verdict};
use crate::overview::Overview;
use crate::workflow::{WorkflowKind, WorkflowState};

const SUCCESS_MARK: &str = "✅";
const FAILURE_MARK: &str = "❌";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Busy,
    Success,
    Failure,
}

/// A match score ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Confidence {
    pub score: f64,
    /// One decimal place, e.g. `"83.0%"`.
    pub percent: String,
}

impl Confidence {
    pub fn new(score: f64) -> Self {
        let score = score.clamp(0.0, 1.0);
        Self {
            score,
            percent: format!("{:.1}%", score * 100.0),
        }
    }

    /// Fixed-width bar, `width` cells wide.
    pub fn bar(&self, width: usize) -> String {
        #[allow(
            clippy::as_conversions,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let filled = ((self.score * width as f64).round() as usize).min(width);
        format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
    }
}

/// What to show for one piece of state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub tone: Tone,
    pub headline: String,
    pub details: Vec<String>,
    pub confidence: Option<Confidence>,
}

impl Presentation {
    fn new(tone: Tone, headline: impl Into<String>) -> Self {
        Self {
            tone,
            headline: headline.into(),
            details: Vec::new(),
            confidence: None,
        }
    }

    fn detail(mut self, line: impl Into<String>) -> Self {
        self.details.push(line.into());
        self
    }
}

/// Render a workflow state.
pub fn present(kind: WorkflowKind, state: &WorkflowState) -> Presentation {
    match state {
        WorkflowState::Idle => Presentation::new(Tone::Neutral, kind.idle_prompt()),
        WorkflowState::Ready(frame) => Presentation::new(Tone::Neutral, "Photo captured")
            .detail(format!(
                "{}x{} {}, {} bytes",
                frame.width(),
                frame.height(),
                frame.mime(),
                frame.len()
            )),
        WorkflowState::Submitting(_) => Presentation::new(Tone::Busy, kind.busy_label()),
        WorkflowState::Succeeded(verdict) => present_verdict(verdict),
        WorkflowState::Failed { error, .. } => present_error(error),
    }
}

/// Render a successful submission.
pub fn present_verdict(verdict: &Verdict) -> Presentation {
    match verdict {
        Verdict::Enrolled(EnrollmentReceipt { message, user }) => {
            let p = Presentation::new(Tone::Success, format!("{SUCCESS_MARK} {message}"));
            match user {
                Some(user) => p
                    .detail(format!("User ID: #{}", user.id))
                    .detail(format!(
                        "Enrolled at: {}",
                        user.enrolled_at.format("%Y-%m-%d %H:%M:%S UTC")
                    )),
                None => p,
            }
        }
        Verdict::Recognized(RecognitionOutcome::Matched { message, user }) => {
            let mut p = Presentation::new(Tone::Success, format!("{SUCCESS_MARK} {message}"))
                .detail(user.display_name.clone())
                .detail(user.contact_email.clone())
                .detail(format!("User ID: #{}", user.id));
            p.confidence = Some(Confidence::new(user.confidence));
            p
        }
        Verdict::Recognized(RecognitionOutcome::NotMatched { message }) => {
            Presentation::new(Tone::Failure, format!("{FAILURE_MARK} {message}"))
        }
    }
}

/// Render any error as user-facing text.
pub fn present_error(error: &CoreError) -> Presentation {
    Presentation::new(
        Tone::Failure,
        format!("{FAILURE_MARK} {}", error.user_message()),
    )
}

/// Render the overview, one entry per independently fetched part.
pub fn present_overview(overview: &Overview) -> Vec<Presentation> {
    let health = match &overview.health {
        Ok(h) if h.is_healthy() => {
            Presentation::new(Tone::Success, format!("System Status: {SUCCESS_MARK} Healthy"))
        }
        Ok(h) => Presentation::new(
            Tone::Failure,
            format!("System Status: {FAILURE_MARK} Unhealthy"),
        )
        .detail(format!("reported: {}", h.status)),
        Err(e) => Presentation::new(Tone::Failure, "System Status: unavailable")
            .detail(e.user_message()),
    };

    let stats = match &overview.stats {
        Ok(s) => Presentation::new(Tone::Neutral, format!("Enrolled Users: {}", s.total_users))
            .detail(format!(
                "Recognition Threshold: {:.0}%",
                s.recognition_threshold * 100.0
            )),
        Err(e) => Presentation::new(Tone::Failure, "Statistics unavailable").detail(e.user_message()),
    };

    vec![health, stats]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{HealthStatus, SystemStats};
    use crate::testing::{frame, matched, receipt, user};

    #[test]
    fn matched_renders_one_decimal_confidence() {
        let state = WorkflowState::Succeeded(Verdict::Recognized(matched("Ada", 0.83)));
        let p = present(WorkflowKind::Recognition, &state);

        assert_eq!(p.tone, Tone::Success);
        assert_eq!(p.headline, "✅ Recognized: Ada");
        assert_eq!(p.confidence.as_ref().map(|c| c.percent.as_str()), Some("83.0%"));
        assert!(p.details.contains(&"User ID: #1".to_owned()));
    }

    #[test]
    fn not_matched_has_no_confidence() {
        let state = WorkflowState::Succeeded(Verdict::Recognized(RecognitionOutcome::NotMatched {
            message: "no match".into(),
        }));
        let p = present(WorkflowKind::Recognition, &state);

        assert_eq!(p.tone, Tone::Failure);
        assert_eq!(p.headline, "❌ no match");
        assert_eq!(p.confidence, None);
    }

    #[test]
    fn enrolled_renders_check_mark() {
        let state = WorkflowState::Succeeded(Verdict::Enrolled(receipt("enrolled")));
        let p = present(WorkflowKind::Enrollment, &state);
        assert_eq!(p.headline, "✅ enrolled");
        assert!(p.details.is_empty());
    }

    #[test]
    fn enrolled_with_record_lists_id() {
        let verdict = Verdict::Enrolled(EnrollmentReceipt {
            message: "User Ada enrolled successfully!".into(),
            user: Some(user(9, "Ada", "ada@example.com")),
        });
        let p = present_verdict(&verdict);
        assert_eq!(p.details[0], "User ID: #9");
        assert_eq!(p.details[1], "Enrolled at: 2024-06-15 10:30:00 UTC");
    }

    #[test]
    fn busy_label_follows_kind() {
        let state = WorkflowState::Submitting(frame());
        assert_eq!(present(WorkflowKind::Enrollment, &state).headline, "Enrolling...");
        assert_eq!(present(WorkflowKind::Recognition, &state).headline, "Recognizing...");
        assert_eq!(present(WorkflowKind::Recognition, &state).tone, Tone::Busy);
    }

    #[test]
    fn idle_and_ready_are_prompts() {
        let idle = present(WorkflowKind::Recognition, &WorkflowState::Idle);
        assert_eq!(idle.tone, Tone::Neutral);
        assert_eq!(idle.headline, "Capture a photo to identify a person");

        let ready = present(WorkflowKind::Enrollment, &WorkflowState::Ready(frame()));
        assert_eq!(ready.headline, "Photo captured");
        assert_eq!(ready.details, vec!["1280x720 image/jpeg, 4 bytes".to_owned()]);
    }

    #[test]
    fn failure_shows_server_text() {
        let state = WorkflowState::Failed {
            error: CoreError::Server {
                status: Some(400),
                message: "No face detected in image".into(),
            },
            frame: Some(frame()),
        };
        let p = present(WorkflowKind::Enrollment, &state);
        assert_eq!(p.tone, Tone::Failure);
        assert_eq!(p.headline, "❌ No face detected in image");
    }

    #[test]
    fn confidence_bar_scales() {
        assert_eq!(Confidence::new(0.5).bar(10), "█████░░░░░");
        assert_eq!(Confidence::new(1.4).bar(4), "████");
        assert_eq!(Confidence::new(0.0).bar(3), "░░░");
    }

    #[test]
    fn overview_parts_render_independently() {
        let overview = Overview {
            stats: Ok(SystemStats {
                total_users: 3,
                total_embeddings: None,
                recognition_threshold: 0.55,
                embedding_dimension: None,
            }),
            health: Err(CoreError::Transport {
                message: "request timed out".into(),
            }),
        };
        let parts = present_overview(&overview);

        assert_eq!(parts[0].tone, Tone::Failure);
        assert_eq!(parts[0].details, vec!["Network error: request timed out".to_owned()]);
        assert_eq!(parts[1].headline, "Enrolled Users: 3");
        assert_eq!(parts[1].details, vec!["Recognition Threshold: 55%".to_owned()]);
    }

    #[test]
    fn unhealthy_status_is_flagged() {
        let overview = Overview {
            stats: Err(CoreError::Internal("x".into())),
            health: Ok(HealthStatus {
                status: "degraded".into(),
                models_loaded: Some(false),
                database_connected: Some(true),
                vector_store_ready: Some(true),
            }),
        };
        let parts = present_overview(&overview);
        assert_eq!(parts[0].headline, "System Status: ❌ Unhealthy");
        assert_eq!(parts[1].headline, "Statistics unavailable");
    }
}
