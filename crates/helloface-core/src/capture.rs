// ── Capture provider ──
//
// Owns the camera for as long as a workflow view is open. The device is
// opened lazily on the first snapshot and released when the provider is
// released or dropped, so no stream outlives its view.

use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::CaptureConstraints;
use crate::error::CoreError;
use crate::model::CaptureFrame;

/// An open camera stream.
pub trait CameraDevice: Send {
    /// Grab one still from the live stream.
    fn grab(&mut self) -> impl Future<Output = Result<CaptureFrame, CoreError>> + Send;

    /// Stop the stream. Called at most once per device by the provider.
    fn release(&mut self) {}
}

/// Something that can open a camera stream under the given constraints.
pub trait CameraSource: Send + Sync {
    type Device: CameraDevice;

    fn open(
        &self,
        constraints: CaptureConstraints,
    ) -> impl Future<Output = Result<Self::Device, CoreError>> + Send;
}

/// Lazily-opened camera plus the last captured frame for preview.
pub struct CaptureProvider<C: CameraSource> {
    source: C,
    constraints: CaptureConstraints,
    device: Option<C::Device>,
    preview: Option<CaptureFrame>,
}

impl<C: CameraSource> CaptureProvider<C> {
    pub fn new(source: C, constraints: CaptureConstraints) -> Self {
        Self {
            source,
            constraints,
            device: None,
            preview: None,
        }
    }

    /// Capture one still frame, opening the device first if needed.
    ///
    /// Failures are reported once as `DeviceUnavailable`; nothing is
    /// retried. A device that fails mid-stream is released so the next
    /// call starts from a fresh open. The device stays owned by the
    /// provider while a grab is pending, so dropping this future still
    /// leaves it to be released.
    pub async fn snapshot(&mut self) -> Result<CaptureFrame, CoreError> {
        if self.device.is_none() {
            debug!(
                width = self.constraints.width,
                height = self.constraints.height,
                "opening camera"
            );
            let device = self
                .source
                .open(self.constraints)
                .await
                .map_err(into_device_error)
                .inspect_err(|e| warn!(error = %e, "camera open failed"))?;
            self.device = Some(device);
        }
        let Some(device) = self.device.as_mut() else {
            return Err(CoreError::Internal("camera closed before capture".into()));
        };

        let grabbed = device.grab().await;
        match grabbed {
            Ok(frame) => {
                debug!(?frame, "frame captured");
                self.preview = Some(frame.clone());
                Ok(frame)
            }
            Err(e) => {
                self.close_device();
                let err = into_device_error(e);
                warn!(error = %err, "frame capture failed");
                Err(err)
            }
        }
    }

    /// The most recent frame, if one is on screen.
    pub fn preview(&self) -> Option<&CaptureFrame> {
        self.preview.as_ref()
    }

    /// Discard the preview and go back to the live view.
    pub fn retake(&mut self) {
        self.preview = None;
    }

    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    pub fn constraints(&self) -> CaptureConstraints {
        self.constraints
    }

    /// Stop the stream. Safe to call repeatedly.
    pub fn release(&mut self) {
        self.close_device();
        self.preview = None;
    }

    fn close_device(&mut self) {
        if let Some(mut device) = self.device.take() {
            debug!("releasing camera");
            device.release();
        }
    }
}

impl<C: CameraSource> Drop for CaptureProvider<C> {
    fn drop(&mut self) {
        self.release();
    }
}

fn into_device_error(err: CoreError) -> CoreError {
    match err {
        CoreError::DeviceUnavailable { .. } => err,
        other => CoreError::device(other.to_string()),
    }
}

// ── Still images ─────────────────────────────────────────────────────

/// A "camera" backed by an image file on disk.
///
/// Each grab re-reads the file. Frames report the nominal constraint size
/// since the file is forwarded as-is without decoding.
#[derive(Debug, Clone)]
pub struct StillImageSource {
    path: PathBuf,
}

impl StillImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug)]
pub struct StillImage {
    path: PathBuf,
    constraints: CaptureConstraints,
}

impl CameraSource for StillImageSource {
    type Device = StillImage;

    async fn open(&self, constraints: CaptureConstraints) -> Result<StillImage, CoreError> {
        let meta = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| CoreError::device(format!("{}: {e}", self.path.display())))?;
        if !meta.is_file() {
            return Err(CoreError::device(format!(
                "{} is not a file",
                self.path.display()
            )));
        }
        Ok(StillImage {
            path: self.path.clone(),
            constraints,
        })
    }
}

impl CameraDevice for StillImage {
    async fn grab(&mut self) -> Result<CaptureFrame, CoreError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| CoreError::device(format!("{}: {e}", self.path.display())))?;
        if bytes.is_empty() {
            return Err(CoreError::device(format!(
                "{} is empty",
                self.path.display()
            )));
        }
        let mime = sniff_mime(&bytes)
            .or_else(|| mime_from_extension(&self.path))
            .ok_or_else(|| {
                CoreError::device(format!(
                    "{} is not a JPEG, PNG or WebP image",
                    self.path.display()
                ))
            })?;
        Ok(CaptureFrame::new(
            bytes,
            mime,
            self.constraints.width,
            self.constraints.height,
        ))
    }
}

/// Identify the image type from its leading magic bytes.
fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(b"RIFF") && bytes.get(8..12) == Some(&b"WEBP"[..]) {
        Some("image/webp")
    } else {
        None
    }
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
