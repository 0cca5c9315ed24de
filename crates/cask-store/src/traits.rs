use cask_types::{CasToken, Collection, OperationResult};

/// The store surface consumed by request adapters.
///
/// Implementations must be thread-safe (`Send + Sync`) and report every
/// outcome of `get`/`set` through [`OperationResult`]:
/// - Collection names are unique; `create_collection` is insert-if-absent.
/// - An unknown collection yields `CollectionNotFound` with no side effects.
/// - A set on an absent key creates it regardless of the presented token.
/// - A set on an existing key applies only if the presented token is current,
///   and every applied set issues a new token.
pub trait CollectionStore: Send + Sync {
    /// The stored value type.
    type Value;

    /// Register an empty collection.
    ///
    /// Returns `false`, without any mutation, if the name is taken.
    fn create_collection(&self, name: &str, persistence_enabled: bool) -> bool;

    /// Snapshot of all collection metadata, in no particular order.
    fn list_collections(&self) -> Vec<Collection>;

    /// Metadata of one collection.
    fn get_collection(&self, name: &str) -> Option<Collection>;

    /// Read the current value and token of `key`.
    fn get(&self, collection: &str, key: &str) -> OperationResult<Self::Value>;

    /// Create or update `key` if `cas` is current.
    fn set(
        &self,
        collection: &str,
        key: &str,
        value: Self::Value,
        cas: CasToken,
    ) -> OperationResult<Self::Value>;

    /// Returns `true` if a collection with this name exists.
    fn contains_collection(&self, name: &str) -> bool {
        self.get_collection(name).is_some()
    }
}
