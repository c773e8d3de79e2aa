pub mod interactions;
pub mod posts;
pub mod rankings;
pub mod users;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

/// The full API surface. Routes only translate between HTTP and the typed
/// repository operations; status-code mapping lives in `AppError`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .merge(users::router())
        .merge(posts::router())
        .merge(interactions::router())
        .merge(rankings::router())
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
