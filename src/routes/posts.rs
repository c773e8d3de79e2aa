use axum::extract::{Path, Query, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::db::models::{FeedPage, NewPost};
use crate::error::AppResult;
use crate::repo;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/api/posts/{id}", delete(delete_post))
}

#[derive(Deserialize)]
struct FeedQuery {
    page: Option<u32>,
    limit: Option<u32>,
}

/// GET /api/posts?page&limit - one page of the feed, newest first. There is
/// no total count; a short page tells the client it reached the end.
async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> AppResult<Json<FeedPage>> {
    let page = query.page.filter(|p| *p >= 1).unwrap_or(1);
    let limit = query.limit.filter(|l| *l > 0).unwrap_or(20);

    let feed = repo::posts::list_posts(&state.db, page, limit)?;
    Ok(Json(feed))
}

/// POST /api/posts - create a post with its catches and media in one
/// transaction.
async fn create_post(
    State(state): State<AppState>,
    Json(new_post): Json<NewPost>,
) -> AppResult<Json<serde_json::Value>> {
    let id = repo::posts::create_post(&state.db, &new_post)?;
    Ok(Json(json!({
        "id": id,
        "message": "Post created successfully"
    })))
}

/// DELETE /api/posts/{id} - remove a post and everything hanging off it.
async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    repo::posts::delete_post(&state.db, id)?;
    Ok(Json(json!({ "message": "Post deleted successfully" })))
}
