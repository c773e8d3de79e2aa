use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UserStats {
    pub post_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
}

/// User enriched with activity counters, as served by `GET /api/users/{username}`.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub stats: UserStats,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// One feed entry: the post row joined with its author, derived interaction
/// counts, and fully materialized media/catch collections.
#[derive(Debug, Clone, Serialize)]
pub struct FeedPost {
    pub id: i64,
    pub user_id: i64,
    pub content: Option<String>,
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub caught_at: Option<String>,
    pub weather: Option<String>,
    pub tide: Option<String>,
    pub created_at: String,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub like_count: i64,
    pub comment_count: i64,
    pub repost_count: i64,
    pub media: Vec<Media>,
    pub catches: Vec<FishCatch>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    pub posts: Vec<FeedPost>,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Media {
    pub id: i64,
    pub post_id: i64,
    pub media_type: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub order_index: i64,
}

/// Catch as served to clients. `species_name` is the resolved display name:
/// the canonical species' name_ja when species_id matched, otherwise the
/// catch's own free-text name.
#[derive(Debug, Clone, Serialize)]
pub struct FishCatch {
    pub id: i64,
    pub post_id: i64,
    pub species_id: Option<i64>,
    pub species_name: Option<String>,
    pub size_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub tackle: Option<String>,
    pub bait: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    pub user_id: i64,
    pub content: Option<String>,
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub caught_at: Option<String>,
    pub weather: Option<String>,
    pub tide: Option<String>,
    #[serde(default)]
    pub catches: Vec<NewCatch>,
    #[serde(default)]
    pub media: Vec<NewMedia>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCatch {
    pub species_id: Option<i64>,
    pub species_name: Option<String>,
    pub size_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub tackle: Option<String>,
    pub bait: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMedia {
    pub media_type: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub parent_comment_id: Option<i64>,
    pub content: String,
    pub created_at: String,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FishSpecies {
    pub id: i64,
    pub name: String,
    pub name_ja: String,
}

/// Leaderboard row joined with the ranked user and species display name.
#[derive(Debug, Clone, Serialize)]
pub struct RankingEntry {
    pub id: i64,
    pub user_id: i64,
    pub species_id: Option<i64>,
    pub category: String,
    pub period: String,
    pub rank: i64,
    pub value: Option<f64>,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub species_name: Option<String>,
}
