//! Authentication module for the client-held session.
//!
//! This module provides:
//! - `SessionStore`: the single source of truth for who is signed in
//! - `SessionStorage`: where the session snapshot is persisted between runs
//! - `KeyringStorage`: OS credential store backend
//! - `oauth`: the OAuth redirect/callback login flow
//!
//! There is no client-side expiry. A session ends on logout or when the
//! backend rejects the token with a 401.

pub mod credentials;
pub mod oauth;
pub mod session;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;

use crate::config::{Config, SessionPersistence};

pub use credentials::KeyringStorage;
pub use session::{SessionData, SessionStore};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};

/// Build the storage backend selected by the configuration.
pub fn storage_for(config: &Config) -> Result<Box<dyn SessionStorage>> {
    Ok(match config.session_persistence {
        SessionPersistence::Memory => Box::new(MemoryStorage::new()),
        SessionPersistence::Keyring => Box::new(KeyringStorage::new()),
        SessionPersistence::File => Box::new(FileStorage::new(config.cache_dir()?)),
    })
}

/// Create the session store for this configuration and recover any
/// persisted session.
pub fn open_session(config: &Config) -> Result<Arc<SessionStore>> {
    let store = Arc::new(SessionStore::new(storage_for(config)?));
    store.initialize();
    Ok(store)
}
