//! Collection registry and CAS-checked item storage for Cask.
//!
//! The store keeps every collection in memory. A [`CollectionRegistry`] maps
//! collection names to [`ItemStore`]s; each item store maps keys to a value,
//! a [`CasToken`](cask_types::CasToken), and a per-item write lock.
//!
//! # Design Rules
//!
//! 1. Collection creation is an atomic insert-if-absent. Exactly one of any
//!    number of concurrent creators of the same name wins.
//! 2. Writes to an existing key are serialized by that item's lock, acquired
//!    with a bounded wait ([`StoreConfig::set_timeout`]).
//! 3. A write is applied only when the presented token equals the current
//!    one. Every applied write issues a new, strictly larger token from the
//!    registry's [`CasClock`].
//! 4. Reads never wait on the write lock. Value and token are read together.
//! 5. Every outcome is a value: no operation panics or returns an error for
//!    contention, missing data, or stale tokens.
//! 6. Nothing is ever deleted. Persistence settings are recorded but inert.

pub mod cast;
pub mod clock;
pub mod config;
pub mod error;
pub mod items;
pub mod registry;
pub mod traits;

pub use cast::{AnyValue, ValueCast};
pub use clock::CasClock;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use items::ItemStore;
pub use registry::CollectionRegistry;
pub use traits::CollectionStore;
