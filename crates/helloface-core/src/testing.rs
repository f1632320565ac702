// Scripted fakes for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio::sync::oneshot;

use crate::capture::{CameraDevice, CameraSource};
use crate::config::CaptureConstraints;
use crate::error::CoreError;
use crate::model::{
    CaptureFrame, EnrollmentForm, EnrollmentReceipt, HealthStatus, MatchedUser,
    RecognitionOutcome, ServiceInfo, SystemStats, UserId, UserRecord,
};
use crate::service::FaceService;

pub(crate) type Reply<T> = Result<T, CoreError>;

enum Scripted<T> {
    Now(Reply<T>),
    Gated(oneshot::Receiver<Reply<T>>),
}

/// FIFO of replies for one endpoint.
pub(crate) struct Script<T>(Mutex<VecDeque<Scripted<T>>>);

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self(Mutex::new(VecDeque::new()))
    }
}

impl<T: Send> Script<T> {
    pub(crate) fn push(&self, reply: Reply<T>) {
        self.0.lock().unwrap().push_back(Scripted::Now(reply));
    }

    /// Queue a reply that is held until the returned sender fires.
    pub(crate) fn gate(&self) -> oneshot::Sender<Reply<T>> {
        let (tx, rx) = oneshot::channel();
        self.0.lock().unwrap().push_back(Scripted::Gated(rx));
        tx
    }

    async fn next(&self) -> Reply<T> {
        let scripted = self.0.lock().unwrap().pop_front();
        match scripted {
            Some(Scripted::Now(reply)) => reply,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(CoreError::Internal("gate dropped".into()))),
            None => Err(CoreError::Internal("no scripted reply".into())),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeService {
    pub(crate) info: Script<ServiceInfo>,
    pub(crate) enroll: Script<EnrollmentReceipt>,
    pub(crate) recognize: Script<RecognitionOutcome>,
    pub(crate) list: Script<Vec<UserRecord>>,
    pub(crate) delete: Script<String>,
    pub(crate) stats: Script<SystemStats>,
    pub(crate) health: Script<HealthStatus>,
    calls: Mutex<Vec<String>>,
}

impl FakeService {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    /// Every call made so far, e.g. `["enroll", "delete:7"]`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

impl FaceService for FakeService {
    async fn service_info(&self) -> Result<ServiceInfo, CoreError> {
        self.record("info".into());
        self.info.next().await
    }

    async fn enroll(
        &self,
        _form: EnrollmentForm,
        _frame: CaptureFrame,
    ) -> Result<EnrollmentReceipt, CoreError> {
        self.record("enroll".into());
        self.enroll.next().await
    }

    async fn recognize(&self, _frame: CaptureFrame) -> Result<RecognitionOutcome, CoreError> {
        self.record("recognize".into());
        self.recognize.next().await
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, CoreError> {
        self.record("list".into());
        self.list.next().await
    }

    async fn delete_user(&self, id: UserId) -> Result<String, CoreError> {
        self.record(format!("delete:{id}"));
        self.delete.next().await
    }

    async fn stats(&self) -> Result<SystemStats, CoreError> {
        self.record("stats".into());
        self.stats.next().await
    }

    async fn health(&self) -> Result<HealthStatus, CoreError> {
        self.record("health".into());
        self.health.next().await
    }
}

// ── Scripted camera ──────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct CameraCounters {
    pub(crate) opens: AtomicUsize,
    pub(crate) grabs: AtomicUsize,
    pub(crate) releases: AtomicUsize,
}

impl CameraCounters {
    pub(crate) fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// How a fake device answers `grab`.
#[derive(Clone, Copy)]
pub(crate) enum GrabMode {
    Frame,
    Fail,
    /// Never completes within a test's patience.
    Stall,
}

pub(crate) struct FakeCamera {
    pub(crate) counters: Arc<CameraCounters>,
    pub(crate) deny: bool,
    pub(crate) grab: GrabMode,
}

impl FakeCamera {
    pub(crate) fn new(deny: bool) -> (Self, Arc<CameraCounters>) {
        Self::with_grab(deny, GrabMode::Frame)
    }

    pub(crate) fn stalled() -> (Self, Arc<CameraCounters>) {
        Self::with_grab(false, GrabMode::Stall)
    }

    pub(crate) fn failing_grab() -> (Self, Arc<CameraCounters>) {
        Self::with_grab(false, GrabMode::Fail)
    }

    fn with_grab(deny: bool, grab: GrabMode) -> (Self, Arc<CameraCounters>) {
        let counters = Arc::new(CameraCounters::default());
        (
            Self {
                counters: Arc::clone(&counters),
                deny,
                grab,
            },
            counters,
        )
    }
}

pub(crate) struct FakeDevice {
    counters: Arc<CameraCounters>,
    grab: GrabMode,
}

impl CameraSource for FakeCamera {
    type Device = FakeDevice;

    async fn open(&self, _constraints: CaptureConstraints) -> Result<FakeDevice, CoreError> {
        self.counters.opens.fetch_add(1, Ordering::SeqCst);
        if self.deny {
            return Err(CoreError::device("permission denied"));
        }
        Ok(FakeDevice {
            counters: Arc::clone(&self.counters),
            grab: self.grab,
        })
    }
}

impl CameraDevice for FakeDevice {
    async fn grab(&mut self) -> Result<CaptureFrame, CoreError> {
        self.counters.grabs.fetch_add(1, Ordering::SeqCst);
        match self.grab {
            GrabMode::Frame => Ok(frame()),
            GrabMode::Fail => Err(CoreError::device("stream ended")),
            GrabMode::Stall => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(frame())
            }
        }
    }

    fn release(&mut self) {
        self.counters.releases.fetch_add(1, Ordering::SeqCst);
    }
}

// ── Builders ─────────────────────────────────────────────────────────

pub(crate) fn frame() -> CaptureFrame {
    CaptureFrame::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg", 1280, 720)
}

pub(crate) fn user(id: UserId, name: &str, email: &str) -> UserRecord {
    UserRecord {
        id,
        display_name: name.into(),
        contact_email: email.into(),
        enrolled_at: Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap(),
    }
}

pub(crate) fn receipt(message: &str) -> EnrollmentReceipt {
    EnrollmentReceipt {
        message: message.into(),
        user: None,
    }
}

pub(crate) fn matched(name: &str, confidence: f64) -> RecognitionOutcome {
    RecognitionOutcome::Matched {
        message: format!("Recognized: {name}"),
        user: MatchedUser {
            id: 1,
            display_name: name.into(),
            contact_email: format!("{}@example.com", name.to_lowercase()),
            confidence,
        },
    }
}
