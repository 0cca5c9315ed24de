//! HTTP server for Cask.
//!
//! A thin adapter over [`cask_store::CollectionStore`]: it validates query
//! parameters, parses JSON bodies, calls the store, and serializes the
//! result. All store semantics live in `cask-store`.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use endpoint::{endpoints, HealthResponse};
pub use error::{ServerError, ServerResult};
pub use router::{build_router, SharedStore};
pub use server::CaskServer;
