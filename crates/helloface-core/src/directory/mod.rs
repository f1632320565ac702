// ── User directory ──
//
// Cached, ordered copy of the enrolled users with search and per-row
// delete. The list only changes on an explicit refresh or after the
// service confirms a delete.

pub mod filter;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashSet;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{UserId, UserRecord};
use crate::service::FaceService;

pub use filter::UserFilter;

/// Asks the user to confirm a delete. `false` aborts without a request.
pub type ConfirmDelete = Arc<dyn Fn(&UserRecord) -> bool + Send + Sync>;

/// Progress of the last list fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Loaded { at: DateTime<Utc> },
    Failed(CoreError),
}

/// How a delete request ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Removed on the service and from the local list.
    Deleted { message: String },
    /// The confirmation hook said no.
    Declined,
    /// A delete for the same id is still outstanding.
    AlreadyInFlight,
}

pub struct UserDirectory<S: FaceService> {
    service: Arc<S>,
    confirm: ConfirmDelete,
    users: watch::Sender<Arc<Vec<Arc<UserRecord>>>>,
    load: watch::Sender<LoadState>,
    deleting: DashSet<UserId>,
}

impl<S: FaceService> fmt::Debug for UserDirectory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDirectory")
            .field("users", &self.users.borrow().len())
            .field("load", &*self.load.borrow())
            .field("deleting", &self.deleting.len())
            .finish_non_exhaustive()
    }
}

impl<S: FaceService> UserDirectory<S> {
    pub fn new(service: Arc<S>, confirm: ConfirmDelete) -> Self {
        let (users, _) = watch::channel(Arc::new(Vec::new()));
        let (load, _) = watch::channel(LoadState::NotLoaded);
        Self {
            service,
            confirm,
            users,
            load,
            deleting: DashSet::new(),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// All cached users, in service order.
    pub fn snapshot(&self) -> Arc<Vec<Arc<UserRecord>>> {
        Arc::clone(&self.users.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<UserRecord>>>> {
        self.users.subscribe()
    }

    pub fn load_state(&self) -> LoadState {
        self.load.borrow().clone()
    }

    /// Cached users matching `query`; see [`UserFilter`].
    pub fn filtered(&self, query: &str) -> Vec<Arc<UserRecord>> {
        UserFilter::new(query).apply(&self.snapshot())
    }

    pub fn get(&self, id: UserId) -> Option<Arc<UserRecord>> {
        self.users.borrow().iter().find(|u| u.id == id).map(Arc::clone)
    }

    pub fn len(&self) -> usize {
        self.users.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.borrow().is_empty()
    }

    pub fn is_deleting(&self, id: UserId) -> bool {
        self.deleting.contains(&id)
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Replace the cache with the service's current list.
    ///
    /// On failure the previous list stays in place.
    pub async fn refresh(&self) -> Result<usize, CoreError> {
        self.load.send_replace(LoadState::Loading);
        match self.service.list_users().await {
            Ok(users) => {
                let count = users.len();
                self.users
                    .send_replace(Arc::new(users.into_iter().map(Arc::new).collect()));
                self.load.send_replace(LoadState::Loaded { at: Utc::now() });
                debug!(count, "user list refreshed");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "user list refresh failed");
                self.load.send_replace(LoadState::Failed(e.clone()));
                Err(e)
            }
        }
    }

    /// Delete one cached user after confirmation.
    ///
    /// The record is removed locally only once the service confirms.
    pub async fn delete(&self, id: UserId) -> Result<DeleteOutcome, CoreError> {
        let record = self.get(id).ok_or_else(|| CoreError::NotFound {
            message: format!("User with ID {id} not found"),
        })?;
        if self.is_deleting(id) {
            return Ok(DeleteOutcome::AlreadyInFlight);
        }
        if !(self.confirm)(&record) {
            debug!(id, "delete declined");
            return Ok(DeleteOutcome::Declined);
        }
        let Some(_guard) = InFlight::claim(&self.deleting, id) else {
            return Ok(DeleteOutcome::AlreadyInFlight);
        };

        let message = self.service.delete_user(id).await.inspect_err(|e| {
            warn!(id, error = %e, "delete failed");
        })?;

        self.users.send_if_modified(|users| {
            let before = users.len();
            let kept: Vec<_> = users.iter().filter(|u| u.id != id).cloned().collect();
            let changed = kept.len() != before;
            if changed {
                *users = Arc::new(kept);
            }
            changed
        });
        info!(id, name = %record.display_name, "user deleted");
        Ok(DeleteOutcome::Deleted { message })
    }
}

/// Marks an id as being deleted until dropped.
struct InFlight<'a> {
    set: &'a DashSet<UserId>,
    id: UserId,
}

impl<'a> InFlight<'a> {
    fn claim(set: &'a DashSet<UserId>, id: UserId) -> Option<Self> {
        set.insert(id).then_some(Self { set, id })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.id);
    }
}
