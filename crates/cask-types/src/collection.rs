use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Metadata snapshot of a named collection.
///
/// Identity is by `name` alone: two snapshots of the same collection taken
/// at different times compare equal even if their `item_count` differs.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Unique name within the store. Immutable after creation.
    pub name: String,
    /// Number of successful writes (creates and updates) applied so far.
    pub item_count: u64,
    /// Recorded at creation. Has no effect on storage behavior.
    pub persistence_enabled: bool,
}

impl Collection {
    /// Metadata for a freshly created, empty collection.
    pub fn new(name: impl Into<String>, persistence_enabled: bool) -> Self {
        Self {
            name: name.into(),
            item_count: 0,
            persistence_enabled,
        }
    }
}

impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Collection {}

impl Hash for Collection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
