// libs/auth-cell/src/services/session.rs
use std::sync::Arc;

use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, StorageError};

/// Storage key holding the logged-in user's email.
pub const EMAIL_KEY: &str = "email";

/// Holds the identity of the logged-in user.
///
/// Cheap to clone; every clone shares the same backing store, so a value
/// written through one handle is visible to the others once `set` returns.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Arc::new(FileKeyValueStore::from_config(config)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKeyValueStore::new()))
    }

    /// Returns the cached email, or `None` when unset or unreadable.
    pub async fn get(&self) -> Option<String> {
        match self.store.get(EMAIL_KEY).await {
            Ok(email) => email.filter(|e| !e.is_empty()),
            Err(e) => {
                warn!("Failed to read session email: {}", e);
                None
            }
        }
    }

    pub async fn set(&self, email: &str) -> Result<(), StorageError> {
        self.store.set(EMAIL_KEY, email).await?;
        debug!("Session email updated");
        Ok(())
    }
}
