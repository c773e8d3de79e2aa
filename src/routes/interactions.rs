use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppResult;
use crate::repo;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/posts/{id}/like", post(like_post).delete(unlike_post))
        .route(
            "/api/posts/{id}/repost",
            post(repost_post).delete(unrepost_post),
        )
        .route(
            "/api/posts/{id}/comments",
            get(list_comments).post(add_comment),
        )
}

#[derive(Deserialize)]
struct InteractionRequest {
    user_id: i64,
}

#[derive(Deserialize)]
struct CommentRequest {
    user_id: i64,
    content: String,
    parent_comment_id: Option<i64>,
}

/// POST /api/posts/{id}/like - 400 "Already liked" on a duplicate.
async fn like_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<InteractionRequest>,
) -> AppResult<Json<serde_json::Value>> {
    repo::interactions::like_post(&state.db, id, request.user_id)?;
    Ok(Json(json!({ "message": "Post liked successfully" })))
}

/// DELETE /api/posts/{id}/like - idempotent.
async fn unlike_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<InteractionRequest>,
) -> AppResult<Json<serde_json::Value>> {
    repo::interactions::unlike_post(&state.db, id, request.user_id)?;
    Ok(Json(json!({ "message": "Post unliked successfully" })))
}

/// POST /api/posts/{id}/repost - 400 "Already reposted" on a duplicate.
async fn repost_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<InteractionRequest>,
) -> AppResult<Json<serde_json::Value>> {
    repo::interactions::repost_post(&state.db, id, request.user_id)?;
    Ok(Json(json!({ "message": "Post reposted successfully" })))
}

/// DELETE /api/posts/{id}/repost - idempotent.
async fn unrepost_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<InteractionRequest>,
) -> AppResult<Json<serde_json::Value>> {
    repo::interactions::unrepost_post(&state.db, id, request.user_id)?;
    Ok(Json(json!({ "message": "Repost removed successfully" })))
}

/// POST /api/posts/{id}/comments - add a comment or threaded reply.
async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CommentRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let comment_id = repo::interactions::add_comment(
        &state.db,
        id,
        request.user_id,
        &request.content,
        request.parent_comment_id,
    )?;
    Ok(Json(json!({
        "id": comment_id,
        "message": "Comment added successfully"
    })))
}

/// GET /api/posts/{id}/comments - oldest first.
async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    let comments = repo::interactions::list_comments(&state.db, id)?;
    Ok(Json(json!({ "comments": comments })))
}
