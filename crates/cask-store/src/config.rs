use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Configuration for a [`CollectionRegistry`](crate::CollectionRegistry).
///
/// Only `set_timeout_ms` affects behavior. The persistence-related fields are
/// recorded so that collaborators can report them, but the store is purely
/// in-memory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum time a set waits for an item's write lock, in milliseconds.
    pub set_timeout_ms: u64,
    /// Whether the store runs without any persistence.
    pub in_memory_only: bool,
    /// Upper bound on worker parallelism advertised to collaborators.
    pub max_parallelism: usize,
    /// Directory reserved for persisted collections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistence_folder: Option<PathBuf>,
    /// Whether persisted writes would be flushed before acknowledging.
    pub synchronous_persistence: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            set_timeout_ms: 50,
            in_memory_only: true,
            max_parallelism: 4,
            persistence_folder: None,
            synchronous_persistence: false,
        }
    }
}

impl StoreConfig {
    /// The bounded wait for an item's write lock.
    pub fn set_timeout(&self) -> Duration {
        Duration::from_millis(self.set_timeout_ms)
    }

    /// Replace the write-lock timeout.
    pub fn with_set_timeout(mut self, timeout: Duration) -> Self {
        self.set_timeout_ms = timeout.as_millis().min(u64::MAX as u128) as u64;
        self
    }

    /// Reject values the store cannot operate with.
    pub fn validate(&self) -> StoreResult<()> {
        if self.set_timeout_ms == 0 {
            return Err(StoreError::InvalidConfig(
                "set_timeout_ms must be greater than zero".into(),
            ));
        }
        if self.max_parallelism == 0 {
            return Err(StoreError::InvalidConfig(
                "max_parallelism must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
