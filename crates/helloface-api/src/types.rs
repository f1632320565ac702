//! Request and response types for the HelloFace HTTP API.
//!
//! Field names match the backend's snake_case JSON verbatim. Timestamps are
//! ISO 8601; the backend emits them without an offset, so those are read
//! as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Error body ───────────────────────────────────────────────────────

/// Error body for non-2xx responses.
///
/// `detail` is usually a string. Request validation failures carry a list
/// of `{ loc, msg, type }` objects instead.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorResponse {
    /// Flatten `detail` into one message, if it carries any text.
    pub(crate) fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let parts: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                (!parts.is_empty()).then(|| parts.join("; "))
            }
            _ => None,
        }
    }
}

// ── Root ─────────────────────────────────────────────────────────────

/// Service banner, from `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub docs: Option<String>,
}

// ── Enrollment ───────────────────────────────────────────────────────

/// Body for `POST /enroll`. `image` is a data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollRequest {
    pub name: String,
    pub email: String,
    pub image: String,
}

/// Successful enrollment, from `POST /enroll`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollResponse {
    pub message: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub enrolled_at: Option<DateTime<Utc>>,
}

// ── Recognition ──────────────────────────────────────────────────────

/// Body for `POST /recognize`. `image` is a data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecognizeRequest {
    pub image: String,
}

/// Recognition verdict, from `POST /recognize`.
///
/// `match` is present only when `recognized` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizeResponse {
    pub recognized: bool,
    pub message: String,
    #[serde(default, rename = "match")]
    pub face_match: Option<FaceMatch>,
}

/// Best match above the backend threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceMatch {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    /// Cosine similarity in `[0, 1]`.
    pub confidence: f64,
    /// Face bounding box in image coordinates -- opaque JSON.
    #[serde(default)]
    pub bounding_box: Option<Value>,
}

// ── Users ────────────────────────────────────────────────────────────

/// Enrolled user, one element of `GET /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub enrolled_at: DateTime<Utc>,
}

/// `GET /users` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersListResponse {
    pub users: Vec<UserResponse>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Successful deletion, from `DELETE /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    #[serde(default)]
    pub user_id: Option<i64>,
}

// ── System ───────────────────────────────────────────────────────────

/// System statistics, from `GET /stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_users: u64,
    pub recognition_threshold: f64,
    #[serde(default)]
    pub total_embeddings: Option<u64>,
    #[serde(default)]
    pub embedding_dimension: Option<u32>,
}

/// Health probe, from `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub models_loaded: Option<bool>,
    #[serde(default)]
    pub database_connected: Option<bool>,
    #[serde(default)]
    pub vector_store_ready: Option<bool>,
}

// ── Timestamp parsing ────────────────────────────────────────────────

/// Parse an ISO 8601 timestamp, with or without a UTC offset.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc()))
}

mod timestamp {
    use super::{DateTime, Deserialize, Deserializer, Utc, parse_timestamp};

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }

    pub(super) fn deserialize_opt<'de, D>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse_timestamp(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}
