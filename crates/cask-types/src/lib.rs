//! Foundation types for Cask.
//!
//! Cask is an in-memory key-value store organized into named collections,
//! with optimistic concurrency control through compare-and-swap tokens.
//! This crate holds the plain data types shared by the store, the HTTP
//! adapter, and the CLI. It contains no synchronization and no I/O.
//!
//! # Key Types
//!
//! - [`CasToken`] -- Opaque version marker attached to every stored item
//! - [`Collection`] -- Metadata snapshot of a named collection
//! - [`StoreStatus`] -- Outcome code of a store operation
//! - [`OperationResult`] -- Value-typed outcome of a get/set call
//! - [`Document`] -- Read view of a stored item

pub mod cas;
pub mod collection;
pub mod document;
pub mod error;
pub mod result;

pub use cas::CasToken;
pub use collection::Collection;
pub use document::Document;
pub use error::TypeError;
pub use result::{OperationResult, StoreStatus};
