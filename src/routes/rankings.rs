use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppResult;
use crate::repo;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/rankings", get(list_rankings))
        .route("/api/species", get(list_species))
}

#[derive(Deserialize)]
struct RankingQuery {
    category: Option<String>,
    period: Option<String>,
    species_id: Option<i64>,
}

/// GET /api/rankings?category&period&species_id - top-100 leaderboard.
async fn list_rankings(
    State(state): State<AppState>,
    Query(query): Query<RankingQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let category = query.category.as_deref().unwrap_or("size");
    let period = query.period.as_deref().unwrap_or("all_time");

    let rankings = repo::rankings::list_rankings(&state.db, category, period, query.species_id)?;
    Ok(Json(json!({ "rankings": rankings })))
}

/// GET /api/species - reference list, ordered by display name.
async fn list_species(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let species = repo::rankings::list_species(&state.db)?;
    Ok(Json(json!({ "species": species })))
}
