use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::db::models::{NewUser, User, UserProfile};
use crate::error::AppResult;
use crate::repo;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(create_user))
        .route("/api/users/{username}", get(get_user))
}

/// POST /api/users - create a profile. 400 when the username is taken.
async fn create_user(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> AppResult<Json<User>> {
    let user = repo::users::create_user(&state.db, &new_user)?;
    Ok(Json(user))
}

/// GET /api/users/{username} - profile plus activity stats. 404 when absent.
async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<UserProfile>> {
    let profile = repo::users::get_user_by_username(&state.db, &username)?;
    Ok(Json(profile))
}
