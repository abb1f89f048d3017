use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::storage::SessionStorage;
use crate::models::User;

/// Storage key of the session snapshot
const SESSION_KEY: &str = "session";

/// Token and identity of the signed-in user. Both are always present
/// together; there is no partial session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub access_token: String,
    pub user: User,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(access_token: impl Into<String>, user: User) -> Self {
        Self {
            access_token: access_token.into(),
            user,
            created_at: Utc::now(),
        }
    }

    fn is_usable(&self) -> bool {
        !self.access_token.trim().is_empty()
    }
}

/// Single source of truth for "is a user authenticated, and as whom".
///
/// Shared as `Arc<SessionStore>`. Only `initialize`, `set_auth` and
/// `clear_auth` mutate it. None of the operations return errors: storage
/// problems are logged and the in-memory state stays authoritative.
pub struct SessionStore {
    data: RwLock<Option<SessionData>>,
    storage: Box<dyn SessionStorage>,
}

impl SessionStore {
    /// Create an empty store. Call `initialize` to recover a persisted session.
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self {
            data: RwLock::new(None),
            storage,
        }
    }

    /// Recover a previously persisted session. Returns whether one was restored.
    ///
    /// Missing, unreadable or malformed snapshots leave the session empty.
    /// A malformed snapshot is also removed so it is not retried next time.
    pub fn initialize(&self) -> bool {
        let restored = match self.storage.read(SESSION_KEY) {
            Ok(Some(contents)) => match serde_json::from_str::<SessionData>(&contents) {
                Ok(data) if data.is_usable() => Some(data),
                Ok(_) => {
                    warn!("Persisted session has an empty token, discarding");
                    self.discard_snapshot();
                    None
                }
                Err(e) => {
                    warn!(error = %e, "Persisted session is malformed, discarding");
                    self.discard_snapshot();
                    None
                }
            },
            Ok(None) => {
                debug!("No persisted session");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session");
                None
            }
        };

        let found = restored.is_some();
        if let Some(ref data) = restored {
            debug!(user_id = %data.user.id, "Session restored");
        }
        *self.write() = restored;
        found
    }

    /// Populate the session and persist the snapshot.
    ///
    /// The token is opaque and not inspected. An empty token is ignored and
    /// leaves the current session unchanged.
    pub fn set_auth(&self, token: impl Into<String>, user: User) {
        let data = SessionData::new(token, user);
        if !data.is_usable() {
            warn!("Refusing to store a session with an empty token");
            return;
        }

        match serde_json::to_string(&data) {
            Ok(snapshot) => {
                if let Err(e) = self.storage.write(SESSION_KEY, &snapshot) {
                    warn!(error = %e, "Failed to persist session, keeping it in memory only");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize session"),
        }

        debug!(user_id = %data.user.id, "Session established");
        *self.write() = Some(data);
    }

    /// Empty the session and remove the persisted snapshot. Idempotent.
    pub fn clear_auth(&self) {
        let previous = self.write().take();
        if let Some(data) = previous {
            debug!(user_id = %data.user.id, "Session cleared");
        }
        self.discard_snapshot();
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Current bearer token, read at the moment of the call
    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|d| d.access_token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.read().as_ref().map(|d| d.user.clone())
    }

    pub fn snapshot(&self) -> Option<SessionData> {
        self.read().clone()
    }

    fn discard_snapshot(&self) {
        if let Err(e) = self.storage.remove(SESSION_KEY) {
            warn!(error = %e, "Failed to remove persisted session");
        }
    }

    // A poisoned lock only means a panic happened while it was held; the
    // Option inside is always a whole value, so keep using it.
    fn read(&self) -> RwLockReadGuard<'_, Option<SessionData>> {
        self.data.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<SessionData>> {
        self.data.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for SessionData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionData")
            .field("access_token", &"[redacted]")
            .field("user", &self.user)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .field("user_id", &self.user().map(|u| u.id))
            .finish()
    }
}
