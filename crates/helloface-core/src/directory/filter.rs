use std::sync::Arc;

use crate::model::UserRecord;

/// Case-insensitive substring search over name and email.
///
/// Applied at read time; the collection itself is never narrowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    needle: String,
}

impl UserFilter {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// An empty query matches everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, user: &UserRecord) -> bool {
        self.is_empty()
            || user.display_name.to_lowercase().contains(&self.needle)
            || user.contact_email.to_lowercase().contains(&self.needle)
    }

    /// Matching users, order preserved.
    pub fn apply(&self, users: &[Arc<UserRecord>]) -> Vec<Arc<UserRecord>> {
        users
            .iter()
            .filter(|u| self.matches(u))
            .map(Arc::clone)
            .collect()
    }
}
