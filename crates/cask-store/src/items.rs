//! Per-collection item storage with CAS-checked writes.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cask_types::{CasToken, Collection, OperationResult, StoreStatus};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::cast::ValueCast;
use crate::clock::CasClock;

/// The value and token of an item, always read and written together.
struct Versioned<V> {
    value: V,
    cas: CasToken,
}

/// A stored item.
///
/// `write_lock` serializes writers and is the only lock a writer waits on.
/// `current` is held exclusively only for the swap itself, so readers are
/// never delayed by a writer that is waiting or validating.
struct Item<V> {
    write_lock: Mutex<()>,
    current: RwLock<Versioned<V>>,
}

impl<V> Item<V> {
    fn new(value: V, cas: CasToken) -> Self {
        Self {
            write_lock: Mutex::new(()),
            current: RwLock::new(Versioned { value, cas }),
        }
    }
}

/// All items of one collection.
///
/// Also owns the collection's metadata. `item_count` is incremented once per
/// applied write, while the writer still holds the item's write lock (or, for
/// a new key, the map slot), so failed writes never touch it.
pub struct ItemStore<V> {
    name: String,
    persistence_enabled: bool,
    item_count: AtomicU64,
    items: DashMap<String, Arc<Item<V>>>,
    clock: Arc<CasClock>,
    set_timeout: Duration,
}

impl<V: Clone> ItemStore<V> {
    /// Create an empty collection drawing tokens from `clock`.
    pub fn new(
        name: impl Into<String>,
        persistence_enabled: bool,
        clock: Arc<CasClock>,
        set_timeout: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            persistence_enabled,
            item_count: AtomicU64::new(0),
            items: DashMap::new(),
            clock,
            set_timeout,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot of the collection metadata.
    pub fn metadata(&self) -> Collection {
        Collection {
            item_count: self.item_count.load(Ordering::Acquire),
            ..Collection::new(self.name.clone(), self.persistence_enabled)
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Read the current value and token of `key`.
    pub fn get(&self, key: &str) -> OperationResult<V> {
        let Some(item) = self.lookup(key) else {
            return self.key_not_found(key);
        };
        let current = item.current.read();
        OperationResult::succeeded(&self.name, key, current.cas, current.value.clone())
    }

    /// Read `key` as `T`, reporting `InvalidCast` if the value has another type.
    pub fn get_as<T>(&self, key: &str) -> OperationResult<T>
    where
        V: ValueCast<T>,
    {
        let result = self.get(key);
        if !result.is_success() {
            return result.cast_failure();
        }
        let typed = result
            .into_document()
            .and_then(|doc| doc.try_map(|value| <V as ValueCast<T>>::cast(&value)));
        match typed {
            Some(doc) => doc.into(),
            None => OperationResult::failed(
                &self.name,
                key,
                StoreStatus::InvalidCast,
                format!(
                    "The element with key '{key}' from collection '{}' could not be cast into the requested type '{}'",
                    self.name,
                    std::any::type_name::<T>()
                ),
            ),
        }
    }

    /// Create or update `key`.
    ///
    /// A new key is created with a fresh token and `cas` is ignored. An
    /// existing key is updated only if `cas` equals its current token.
    pub fn set(&self, key: &str, value: V, cas: CasToken) -> OperationResult<V> {
        if key.trim().is_empty() {
            return self.key_not_found(key);
        }
        match self.lookup(key) {
            Some(item) => self.update(key, &item, value, cas),
            None => self.create(key, value),
        }
    }

    fn lookup(&self, key: &str) -> Option<Arc<Item<V>>> {
        if key.trim().is_empty() {
            return None;
        }
        // Clone the Arc out so no shard lock is held past this point.
        self.items.get(key).map(|entry| Arc::clone(entry.value()))
    }

    fn create(&self, key: &str, value: V) -> OperationResult<V> {
        match self.items.entry(key.to_string()) {
            Entry::Occupied(_) => {
                warn!(collection = %self.name, key, "concurrent create lost the race");
                OperationResult::failed(
                    &self.name,
                    key,
                    StoreStatus::ConcurrentCreate,
                    format!(
                        "Creating the item with key '{key}' in collection '{}' failed because another writer created it first",
                        self.name
                    ),
                )
            }
            Entry::Vacant(slot) => {
                let cas = self.clock.next();
                let _inserted = slot.insert(Arc::new(Item::new(value.clone(), cas)));
                self.item_count.fetch_add(1, Ordering::AcqRel);
                debug!(collection = %self.name, key, %cas, "item created");
                OperationResult::succeeded(&self.name, key, cas, value)
            }
        }
    }

    fn update(&self, key: &str, item: &Item<V>, value: V, cas: CasToken) -> OperationResult<V> {
        let Some(_guard) = item.write_lock.try_lock_for(self.set_timeout) else {
            warn!(
                collection = %self.name,
                key,
                timeout_ms = self.set_timeout.as_millis() as u64,
                "write lock not acquired"
            );
            return OperationResult::failed(
                &self.name,
                key,
                StoreStatus::SetTimeout,
                format!(
                    "Updating the item with key '{key}' in collection '{}' failed because the lock could not be acquired within {}ms",
                    self.name,
                    self.set_timeout.as_millis()
                ),
            );
        };

        let current_cas = item.current.read().cas;
        if current_cas != cas {
            debug!(collection = %self.name, key, presented = %cas, current = %current_cas, "cas mismatch");
            return OperationResult::failed(
                &self.name,
                key,
                StoreStatus::CasMismatch,
                format!(
                    "Updating the item with key '{key}' in collection '{}' failed because cas {cas} is not the current version",
                    self.name
                ),
            );
        }

        let new_cas = self.clock.next();
        {
            let mut current = item.current.write();
            current.value = value.clone();
            current.cas = new_cas;
        }
        self.item_count.fetch_add(1, Ordering::AcqRel);
        debug!(collection = %self.name, key, %new_cas, "item updated");
        OperationResult::succeeded(&self.name, key, new_cas, value)
    }

    fn key_not_found<T>(&self, key: &str) -> OperationResult<T> {
        OperationResult::failed(
            &self.name,
            key,
            StoreStatus::KeyNotFound,
            format!(
                "The element with key '{key}' from collection '{}' was not found",
                self.name
            ),
        )
    }
}

impl<V> fmt::Debug for ItemStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemStore")
            .field("name", &self.name)
            .field("keys", &self.items.len())
            .field("item_count", &self.item_count.load(Ordering::Relaxed))
            .finish()
    }
}
