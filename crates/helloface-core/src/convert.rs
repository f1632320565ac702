// ── API-to-domain type conversions ──
//
// Bridges raw `helloface_api::types` responses into `crate::model`. Field
// names are normalized and partial echoes are tolerated; a response that
// contradicts itself is a malformed response.

use helloface_api::types::{
    EnrollResponse, HealthResponse, RecognizeResponse, ServiceInfo as ApiServiceInfo,
    StatsResponse, UserResponse,
};

use crate::error::CoreError;
use crate::model::{
    EnrollmentReceipt, HealthStatus, MatchedUser, RecognitionOutcome, ServiceInfo, SystemStats,
    UserRecord,
};

impl From<UserResponse> for UserRecord {
    fn from(u: UserResponse) -> Self {
        Self {
            id: u.user_id,
            display_name: u.name,
            contact_email: u.email,
            enrolled_at: u.enrolled_at,
        }
    }
}

impl From<EnrollResponse> for EnrollmentReceipt {
    fn from(r: EnrollResponse) -> Self {
        // Only a complete echo becomes a record.
        let user = match (r.user_id, r.name, r.email, r.enrolled_at) {
            (Some(id), Some(display_name), Some(contact_email), Some(enrolled_at)) => {
                Some(UserRecord {
                    id,
                    display_name,
                    contact_email,
                    enrolled_at,
                })
            }
            _ => None,
        };
        Self {
            message: r.message,
            user,
        }
    }
}

impl TryFrom<RecognizeResponse> for RecognitionOutcome {
    type Error = CoreError;

    fn try_from(r: RecognizeResponse) -> Result<Self, Self::Error> {
        if !r.recognized {
            return Ok(Self::NotMatched { message: r.message });
        }
        let m = r.face_match.ok_or_else(|| CoreError::Transport {
            message: "malformed response: recognized without a match".into(),
        })?;
        Ok(Self::Matched {
            message: r.message,
            user: MatchedUser {
                id: m.user_id,
                display_name: m.name,
                contact_email: m.email,
                confidence: m.confidence.clamp(0.0, 1.0),
            },
        })
    }
}

impl From<StatsResponse> for SystemStats {
    fn from(s: StatsResponse) -> Self {
        Self {
            total_users: s.total_users,
            total_embeddings: s.total_embeddings,
            recognition_threshold: s.recognition_threshold,
            embedding_dimension: s.embedding_dimension,
        }
    }
}

impl From<HealthResponse> for HealthStatus {
    fn from(h: HealthResponse) -> Self {
        Self {
            status: h.status,
            models_loaded: h.models_loaded,
            database_connected: h.database_connected,
            vector_store_ready: h.vector_store_ready,
        }
    }
}

impl From<ApiServiceInfo> for ServiceInfo {
    fn from(i: ApiServiceInfo) -> Self {
        Self {
            message: i.message,
            version: i.version,
        }
    }
}
