//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for classification, rules and journal entries
//! - A shared application state wrapping the store
//! - JSON error bodies carrying `error` and `message`

pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use grootboek_shared::AppConfig;
use grootboek_store::Store;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory data store.
    pub store: Arc<Store>,
    /// Application configuration.
    pub config: Arc<AppConfig>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
