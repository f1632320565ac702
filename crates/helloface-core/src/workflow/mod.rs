// ── Workflow controller ──
//
// One state machine drives both capture-and-submit flows. Every transition
// advances a generation counter; in-flight responses and the enrollment
// auto-reset timer carry the generation they started from and are dropped
// if the workflow has moved on by the time they land.

pub mod operation;
pub mod state;

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::capture::{CameraSource, CaptureProvider};
use crate::error::CoreError;
use crate::model::CaptureFrame;
use crate::service::FaceService;

pub use operation::{Enrollment, Recognition, WorkflowOperation};
pub use state::{Submission, WorkflowKind, WorkflowSnapshot, WorkflowState};

use operation::CAPTURE_FIRST;

pub type EnrollmentWorkflow<S> = WorkflowController<S, Enrollment>;
pub type RecognitionWorkflow<S> = WorkflowController<S, Recognition>;

/// Capture-and-submit state machine for one view.
///
/// Cheaply cloneable; clones share state. State changes are published
/// through a `watch` channel so a UI can re-render on every transition.
pub struct WorkflowController<S: FaceService, Op: WorkflowOperation> {
    inner: Arc<Inner<S>>,
    _op: PhantomData<fn() -> Op>,
}

struct Inner<S> {
    service: Arc<S>,
    auto_reset_after: Duration,
    state: watch::Sender<WorkflowSnapshot>,
    /// Parent of every auto-reset timer. Replaced with a fresh token on
    /// close so the controller stays usable afterwards.
    cancel: Mutex<CancellationToken>,
}

impl<S> Inner<S> {
    /// Run `f` against the current snapshot under the channel lock. When it
    /// yields a next state, the generation advances and the new snapshot is
    /// returned.
    fn update<F>(&self, f: F) -> Option<WorkflowSnapshot>
    where
        F: FnOnce(&WorkflowSnapshot) -> Option<WorkflowState>,
    {
        let mut applied = None;
        self.state.send_if_modified(|snap| match f(snap) {
            Some(next) => {
                snap.generation += 1;
                snap.state = next;
                applied = Some(snap.clone());
                true
            }
            None => false,
        });
        applied
    }

    fn timer_token(&self) -> CancellationToken {
        self.cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .child_token()
    }

    /// Stop every pending timer and start over with a live token.
    fn cancel_timers(&self) {
        let mut token = self.cancel.lock().unwrap_or_else(PoisonError::into_inner);
        token.cancel();
        *token = CancellationToken::new();
    }
}

impl<S> Drop for Inner<S> {
    fn drop(&mut self) {
        self.cancel
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel();
    }
}

impl<S: FaceService, Op: WorkflowOperation> Clone for WorkflowController<S, Op> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _op: PhantomData,
        }
    }
}

impl<S: FaceService, Op: WorkflowOperation> WorkflowController<S, Op> {
    /// `auto_reset_after` only matters for operations that clear
    /// themselves after success.
    pub fn new(service: Arc<S>, auto_reset_after: Duration) -> Self {
        let (state, _) = watch::channel(WorkflowSnapshot {
            generation: 0,
            state: WorkflowState::Idle,
        });
        Self {
            inner: Arc::new(Inner {
                service,
                auto_reset_after,
                state,
                cancel: Mutex::new(CancellationToken::new()),
            }),
            _op: PhantomData,
        }
    }

    pub fn kind(&self) -> WorkflowKind {
        Op::KIND
    }

    // ── Observation ──────────────────────────────────────────────────

    pub fn snapshot(&self) -> WorkflowSnapshot {
        self.inner.state.borrow().clone()
    }

    pub fn state(&self) -> WorkflowState {
        self.inner.state.borrow().state.clone()
    }

    pub fn generation(&self) -> u64 {
        self.inner.state.borrow().generation
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkflowSnapshot> {
        self.inner.state.subscribe()
    }

    /// Current snapshot followed by every later change.
    pub fn changes(&self) -> WatchStream<WorkflowSnapshot> {
        WatchStream::new(self.subscribe())
    }

    // ── Capture ──────────────────────────────────────────────────────

    /// Take a frame from `provider` and move to `Ready`.
    ///
    /// A camera failure moves the workflow to `Failed` with no frame; the
    /// user retries by capturing again.
    pub async fn capture<C: CameraSource>(
        &self,
        provider: &mut CaptureProvider<C>,
    ) -> Result<CaptureFrame, CoreError> {
        if !self.state().accepts_capture() {
            return Err(CoreError::validation(
                "Retake or reset before capturing again",
            ));
        }
        match provider.snapshot().await {
            Ok(frame) => {
                self.accept_frame(frame.clone())?;
                Ok(frame)
            }
            Err(error) => {
                self.inner.update(|snap| {
                    snap.state.accepts_capture().then(|| WorkflowState::Failed {
                        error: error.clone(),
                        frame: None,
                    })
                });
                Err(error)
            }
        }
    }

    /// Move to `Ready` with an externally captured frame.
    pub fn accept_frame(&self, frame: CaptureFrame) -> Result<(), CoreError> {
        self.inner
            .update(|snap| {
                snap.state
                    .accepts_capture()
                    .then(|| WorkflowState::Ready(frame))
            })
            .map(|_| ())
            .ok_or_else(|| CoreError::validation("Retake or reset before capturing again"))
    }

    /// Discard the held frame and go back to `Idle`.
    ///
    /// Returns `false` when there was no frame to discard or a submission
    /// is outstanding.
    pub fn retake(&self) -> bool {
        self.inner
            .update(|snap| match &snap.state {
                WorkflowState::Ready(_) | WorkflowState::Failed { .. } => Some(WorkflowState::Idle),
                _ => None,
            })
            .is_some()
    }

    /// Return to `Idle` from anywhere. An outstanding request is abandoned
    /// and its response will be discarded.
    pub fn reset(&self) {
        if let Some(snap) = self.inner.update(|snap| {
            (snap.state != WorkflowState::Idle).then_some(WorkflowState::Idle)
        }) {
            debug!(kind = %Op::KIND, generation = snap.generation, "workflow reset");
        }
    }

    /// Leave the view: reset and stop any pending timer. The controller can
    /// be used again afterwards.
    pub fn close(&self) {
        self.inner.cancel_timers();
        self.reset();
    }

    // ── Submit ───────────────────────────────────────────────────────

    /// Validate, send the held frame, and apply the response.
    ///
    /// Local validation failures come back as `Err` and leave the state
    /// untouched. Everything the service reports, success or failure, is
    /// applied as a state and returned as `Ok(Submission::Applied)`.
    pub async fn submit(&self, input: Op::Input) -> Result<Submission, CoreError> {
        if self.state().is_submitting() {
            debug!(kind = %Op::KIND, "submission already in flight");
            return Ok(Submission::InFlight);
        }
        Op::validate(&input)?;

        let mut in_flight = false;
        let started = self.inner.update(|snap| match &snap.state {
            WorkflowState::Ready(frame)
            | WorkflowState::Failed {
                frame: Some(frame), ..
            } => Some(WorkflowState::Submitting(frame.clone())),
            WorkflowState::Submitting(_) => {
                in_flight = true;
                None
            }
            _ => None,
        });
        let Some(started) = started else {
            return if in_flight {
                Ok(Submission::InFlight)
            } else {
                Err(CoreError::validation(CAPTURE_FIRST))
            };
        };
        let WorkflowState::Submitting(frame) = started.state else {
            return Err(CoreError::Internal("submission did not start".into()));
        };
        let generation = started.generation;
        debug!(kind = %Op::KIND, generation, "submitting");

        let next = match Op::call(self.inner.service.as_ref(), input, frame.clone()).await {
            Ok(verdict) => WorkflowState::Succeeded(verdict),
            Err(error) => {
                warn!(kind = %Op::KIND, error = %error, "submission failed");
                WorkflowState::Failed {
                    error,
                    frame: Some(frame),
                }
            }
        };
        let succeeded = matches!(next, WorkflowState::Succeeded(_));

        let Some(applied) = self
            .inner
            .update(|snap| (snap.generation == generation).then_some(next))
        else {
            debug!(kind = %Op::KIND, generation, "discarding stale response");
            return Ok(Submission::Stale);
        };

        if succeeded && Op::AUTO_RESET {
            self.schedule_auto_reset(applied.generation);
        }
        Ok(Submission::Applied(applied.state))
    }

    fn schedule_auto_reset(&self, generation: u64) {
        let inner: Weak<Inner<S>> = Arc::downgrade(&self.inner);
        let cancel = self.inner.timer_token();
        let delay = self.inner.auto_reset_after;

        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    let Some(inner) = inner.upgrade() else { return };
                    let reset = inner.update(|snap| {
                        (snap.generation == generation
                            && matches!(snap.state, WorkflowState::Succeeded(_)))
                        .then_some(WorkflowState::Idle)
                    });
                    if reset.is_some() {
                        debug!(kind = %Op::KIND, generation, "auto-reset after success");
                    }
                }
            }
        });
    }
}
