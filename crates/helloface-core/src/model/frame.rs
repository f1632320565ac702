use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

/// One captured still image.
///
/// The pixel data is reference-counted, so clones are cheap and a frame
/// can sit in a workflow state and a preview at the same time.
#[derive(Clone, PartialEq, Eq)]
pub struct CaptureFrame {
    bytes: Bytes,
    mime: &'static str,
    width: u32,
    height: u32,
}

impl CaptureFrame {
    pub fn new(bytes: impl Into<Bytes>, mime: &'static str, width: u32, height: u32) -> Self {
        Self {
            bytes: bytes.into(),
            mime,
            width,
            height,
        }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Encode as a `data:<mime>;base64,...` URL, the form the service
    /// accepts in its `image` fields.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

// Keep megabytes of image data out of debug logs.
impl fmt::Debug for CaptureFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureFrame")
            .field("mime", &self.mime)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_carries_mime_and_payload() {
        let frame = CaptureFrame::new(vec![0xFF, 0xD8, 0xFF], "image/jpeg", 1280, 720);
        assert_eq!(frame.to_data_url(), "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn debug_omits_pixels() {
        let frame = CaptureFrame::new(vec![1_u8; 64], "image/png", 2, 2);
        let rendered = format!("{frame:?}");
        assert!(rendered.contains("len: 64"));
        assert!(!rendered.contains("[1, 1"));
    }
}
