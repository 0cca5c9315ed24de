//! The collection registry: entry point to all collections.
//!
//! [`CollectionRegistry`] maps collection names to [`ItemStore`]s in a
//! sharded concurrent map. Creation uses the map's entry API, so the
//! existence check and the insert happen under one shard lock and two
//! concurrent creators of the same name cannot both succeed.

use std::fmt;
use std::sync::Arc;

use cask_types::{CasToken, Collection, OperationResult, StoreStatus};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, info};

use crate::cast::ValueCast;
use crate::clock::CasClock;
use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::items::ItemStore;
use crate::traits::CollectionStore;

/// In-memory registry of named collections.
///
/// The registry is meant to be created once and shared (e.g. behind an
/// `Arc`). All collections draw CAS tokens from one [`CasClock`], so tokens
/// are unique across the whole registry.
pub struct CollectionRegistry<V = serde_json::Value> {
    collections: DashMap<String, Arc<ItemStore<V>>>,
    clock: Arc<CasClock>,
    config: StoreConfig,
}

impl<V: Clone> CollectionRegistry<V> {
    /// Create an empty registry after validating `config`.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: StoreConfig) -> Self {
        Self {
            collections: DashMap::new(),
            clock: Arc::new(CasClock::new()),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Number of collections.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// The item store of a collection.
    pub fn collection(&self, name: &str) -> Option<Arc<ItemStore<V>>> {
        self.collections
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Read `key` as `T`; see [`ItemStore::get_as`].
    pub fn get_as<T>(&self, collection: &str, key: &str) -> OperationResult<T>
    where
        V: ValueCast<T>,
    {
        match self.collection(collection) {
            Some(store) => store.get_as(key),
            None => collection_not_found(collection, key),
        }
    }
}

impl<V: Clone> Default for CollectionRegistry<V> {
    fn default() -> Self {
        Self::with_config(StoreConfig::default())
    }
}

impl<V> CollectionStore for CollectionRegistry<V>
where
    V: Clone + Send + Sync,
{
    type Value = V;

    fn create_collection(&self, name: &str, persistence_enabled: bool) -> bool {
        match self.collections.entry(name.to_string()) {
            Entry::Occupied(_) => {
                debug!(collection = name, "collection already exists");
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(ItemStore::new(
                    name,
                    persistence_enabled,
                    Arc::clone(&self.clock),
                    self.config.set_timeout(),
                )));
                info!(collection = name, persistence_enabled, "collection created");
                true
            }
        }
    }

    fn list_collections(&self) -> Vec<Collection> {
        self.collections
            .iter()
            .map(|entry| entry.value().metadata())
            .collect()
    }

    fn get_collection(&self, name: &str) -> Option<Collection> {
        self.collections.get(name).map(|entry| entry.value().metadata())
    }

    fn get(&self, collection: &str, key: &str) -> OperationResult<V> {
        match self.collection(collection) {
            Some(store) => store.get(key),
            None => collection_not_found(collection, key),
        }
    }

    fn set(&self, collection: &str, key: &str, value: V, cas: CasToken) -> OperationResult<V> {
        match self.collection(collection) {
            Some(store) => store.set(key, value, cas),
            None => collection_not_found(collection, key),
        }
    }

    fn contains_collection(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }
}

fn collection_not_found<T>(collection: &str, key: &str) -> OperationResult<T> {
    OperationResult::failed(
        collection,
        key,
        StoreStatus::CollectionNotFound,
        format!("The collection '{collection}' was not found"),
    )
}

impl<V> fmt::Debug for CollectionRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionRegistry")
            .field("collections", &self.collections.len())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use serde_json::{json, Value};
    use std::sync::Barrier;
    use std::thread;

    fn registry() -> CollectionRegistry<Value> {
        CollectionRegistry::new(StoreConfig::default()).unwrap()
    }

    // ---- Test 1: The end-to-end users scenario ----
    #[test]
    fn users_scenario() {
        let r = registry();
        assert!(r.create_collection("users", false));
        assert!(!r.create_collection("users", false));

        let s1 = r.set("users", "u1", json!({"name": "a"}), CasToken::ZERO);
        assert_eq!(s1.status, StoreStatus::Succeeded);
        let c1 = s1.cas;
        assert_ne!(c1, CasToken::ZERO);

        let s2 = r.set("users", "u1", json!({"name": "b"}), c1);
        assert_eq!(s2.status, StoreStatus::Succeeded);
        let c2 = s2.cas;
        assert_ne!(c2, c1);

        let s3 = r.set("users", "u1", json!({"name": "c"}), c1);
        assert_eq!(s3.status, StoreStatus::CasMismatch);
        let current = r.get("users", "u1");
        assert_eq!(current.document, Some(json!({"name": "b"})));
        assert_eq!(current.cas, c2);

        assert_eq!(r.get("users", "missing").status, StoreStatus::KeyNotFound);
        assert_eq!(
            r.get("missing-collection", "u1").status,
            StoreStatus::CollectionNotFound
        );
    }

    // ---- Test 2: Duplicate create leaves metadata untouched ----
    #[test]
    fn duplicate_create_is_rejected_without_side_effects() {
        let r = registry();
        assert!(r.create_collection("users", true));
        r.set("users", "k", json!(1), CasToken::ZERO);

        assert!(!r.create_collection("users", false));
        let meta = r.get_collection("users").unwrap();
        assert!(meta.persistence_enabled);
        assert_eq!(meta.item_count, 1);
        assert_eq!(r.get("users", "k").document, Some(json!(1)));
    }

    // ---- Test 3: Unknown collection ----
    #[test]
    fn set_on_unknown_collection() {
        let r = registry();
        let s = r.set("nope", "k", json!(1), CasToken::ZERO);
        assert_eq!(s.status, StoreStatus::CollectionNotFound);
        assert!(!s.success);
        assert_eq!(s.message, "The collection 'nope' was not found");
        assert!(r.is_empty());
        assert!(r.get_collection("nope").is_none());
        assert!(!r.contains_collection("nope"));
    }

    // ---- Test 4: Listing ----
    #[test]
    fn list_collections_snapshot() {
        let r = registry();
        r.create_collection("a", false);
        r.create_collection("b", true);
        r.set("b", "k", json!("v"), CasToken::ZERO);

        let mut list = r.list_collections();
        list.sort_by(|x, y| x.name.cmp(&y.name));
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "a");
        assert_eq!(list[0].item_count, 0);
        assert_eq!(list[1].name, "b");
        assert_eq!(list[1].item_count, 1);
        assert!(list[1].persistence_enabled);
    }

    // ---- Test 5: item_count includes updates ----
    #[test]
    fn item_count_counts_updates() {
        let r = registry();
        r.create_collection("c", false);
        let c1 = r.set("c", "k", json!(1), CasToken::ZERO).cas;
        let c2 = r.set("c", "k", json!(2), c1).cas;
        r.set("c", "k", json!(3), c2);
        r.set("c", "k", json!(4), c1); // stale, not counted
        assert_eq!(r.get_collection("c").unwrap().item_count, 3);
    }

    // ---- Test 6: Tokens are unique across collections ----
    #[test]
    fn tokens_unique_across_collections() {
        let r = registry();
        r.create_collection("a", false);
        r.create_collection("b", false);
        let ta = r.set("a", "k", json!(1), CasToken::ZERO).cas;
        let tb = r.set("b", "k", json!(1), CasToken::ZERO).cas;
        assert_ne!(ta, tb);
        // A token from one collection is never current in another.
        assert_eq!(
            r.set("b", "k", json!(2), ta).status,
            StoreStatus::CasMismatch
        );
    }

    // ---- Test 7: Typed reads through the registry ----
    #[test]
    fn typed_reads() {
        let r = registry();
        r.create_collection("c", false);
        r.set("c", "name", json!("alice"), CasToken::ZERO);

        let ok: OperationResult<String> = r.get_as("c", "name");
        assert_eq!(ok.document.as_deref(), Some("alice"));

        let bad: OperationResult<u32> = r.get_as("c", "name");
        assert_eq!(bad.status, StoreStatus::InvalidCast);

        let missing: OperationResult<String> = r.get_as("zzz", "name");
        assert_eq!(missing.status, StoreStatus::CollectionNotFound);
    }

    // ---- Test 8: Type-erased values ----
    #[test]
    fn any_value_registry() {
        use crate::cast::AnyValue;

        let r: CollectionRegistry<AnyValue> = CollectionRegistry::default();
        r.create_collection("mixed", false);
        r.set("mixed", "n", AnyValue::new(5u64), CasToken::ZERO);
        r.set("mixed", "s", AnyValue::new(String::from("x")), CasToken::ZERO);

        let n: OperationResult<u64> = r.get_as("mixed", "n");
        assert_eq!(n.document, Some(5));
        let wrong: OperationResult<u64> = r.get_as("mixed", "s");
        assert_eq!(wrong.status, StoreStatus::InvalidCast);
    }

    // ---- Test 9: Invalid configuration ----
    #[test]
    fn invalid_config_rejected() {
        let config = StoreConfig {
            set_timeout_ms: 0,
            ..Default::default()
        };
        let err = CollectionRegistry::<Value>::new(config).unwrap_err();
        assert!(matches!(err, StoreError::InvalidConfig(_)));
    }

    // ---- Test 10: Concurrent create of the same collection ----
    #[test]
    fn concurrent_create_single_winner() {
        let r = Arc::new(registry());
        let callers = 32;
        let barrier = Arc::new(Barrier::new(callers));

        let handles: Vec<_> = (0..callers)
            .map(|i| {
                let r = Arc::clone(&r);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    r.create_collection("shared", i % 2 == 0)
                })
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(wins, 1);
        assert_eq!(r.len(), 1);
        assert_eq!(r.get_collection("shared").unwrap().item_count, 0);
    }

    // ---- Test 11: Concurrent traffic across collections ----
    #[test]
    fn concurrent_writers_on_distinct_collections() {
        let r = Arc::new(registry());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let r = Arc::clone(&r);
                thread::spawn(move || {
                    let name = format!("c{i}");
                    assert!(r.create_collection(&name, false));
                    let mut cas = CasToken::ZERO;
                    for n in 0..100 {
                        let res = r.set(&name, "k", json!(n), cas);
                        assert!(res.success, "{}", res.message);
                        cas = res.cas;
                    }
                    // Listing while others write must not block or panic.
                    r.list_collections().len()
                })
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap() >= 1);
        }
        for c in r.list_collections() {
            assert_eq!(c.item_count, 100);
        }
    }

    // ---- Test 12: Trait object usage ----
    #[test]
    fn usable_as_trait_object() {
        let store: Arc<dyn CollectionStore<Value = Value>> = Arc::new(registry());
        assert!(store.create_collection("t", false));
        assert!(store.contains_collection("t"));
        let res = store.set("t", "k", json!(true), CasToken::ZERO);
        assert!(res.success);
        assert_eq!(store.get("t", "k").document, Some(json!(true)));
    }
}
