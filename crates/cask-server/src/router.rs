use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use cask_store::CollectionStore;
use tower_http::trace::TraceLayer;

use crate::endpoint::endpoints;
use crate::handler;

/// The store shared by all request handlers.
pub type SharedStore = Arc<dyn CollectionStore<Value = serde_json::Value>>;

/// Build the axum router with all Cask endpoints.
pub fn build_router(store: SharedStore) -> Router {
    Router::new()
        .route(
            endpoints::COLLECTIONS,
            get(handler::list_collections).post(handler::create_collection),
        )
        .route(endpoints::GET, get(handler::get_item))
        .route(endpoints::SET, post(handler::set_item))
        .route(endpoints::HEALTH, get(handler::health_handler))
        .fallback(handler::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
