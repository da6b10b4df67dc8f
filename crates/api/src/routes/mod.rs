//! API route definitions.

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use grootboek_store::StoreError;

use crate::AppState;

pub mod health;
pub mod journal;
pub mod rules;
pub mod transactions;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(rules::routes())
        .merge(transactions::routes())
        .merge(journal::routes())
}

/// Maps a store error to the standard `{error, message}` JSON body.
pub(crate) fn error_response(err: &StoreError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}
