use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Service-assigned user identifier.
pub type UserId = i64;

/// An enrolled user as listed by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub display_name: String,
    pub contact_email: String,
    pub enrolled_at: DateTime<Utc>,
}
