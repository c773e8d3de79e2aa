use chrono::{DateTime, NaiveDateTime};
use rusqlite::{params, Connection, TransactionBehavior};

use crate::db::models::{FeedPage, FeedPost, FishCatch, Media, NewPost};
use crate::error::{AppError, AppResult};
use crate::repo::map_reference_violation;
use crate::state::DbPool;

const FEED_SQL: &str = "
    SELECT p.id, p.user_id, p.content, p.location_name, p.latitude, p.longitude,
           p.caught_at, p.weather, p.tide, p.created_at,
           u.username, u.display_name, u.avatar_url,
           (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS like_count,
           (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count,
           (SELECT COUNT(*) FROM reposts r WHERE r.post_id = p.id) AS repost_count
    FROM posts p
    JOIN users u ON u.id = p.user_id
    ORDER BY p.created_at DESC, p.id DESC
    LIMIT ?1 OFFSET ?2";

/// Create a post together with its catches and media as one atomic unit.
/// Any failure rolls the whole thing back; the caller never observes a
/// half-created post. Returns the generated post id.
pub fn create_post(pool: &DbPool, new_post: &NewPost) -> AppResult<i64> {
    if let Some(caught_at) = new_post.caught_at.as_deref() {
        if !caught_at_is_valid(caught_at) {
            return Err(AppError::Validation("Invalid caught_at timestamp".into()));
        }
    }

    let mut conn = pool.get()?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    tx.execute(
        "INSERT INTO posts (user_id, content, location_name, latitude, longitude,
                            caught_at, weather, tide)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            new_post.user_id,
            new_post.content,
            new_post.location_name,
            new_post.latitude,
            new_post.longitude,
            new_post.caught_at,
            new_post.weather,
            new_post.tide
        ],
    )
    .map_err(map_reference_violation)?;
    let post_id = tx.last_insert_rowid();

    // Catch order is preserved but carries no meaning.
    for catch in &new_post.catches {
        tx.execute(
            "INSERT INTO fish_catches (post_id, species_id, species_name, size_cm,
                                       weight_kg, tackle, bait)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                post_id,
                catch.species_id,
                catch.species_name,
                catch.size_cm,
                catch.weight_kg,
                catch.tackle,
                catch.bait
            ],
        )
        .map_err(map_reference_violation)?;
    }

    // Media order is meaningful: order_index is the 0-based input position.
    for (index, item) in new_post.media.iter().enumerate() {
        tx.execute(
            "INSERT INTO media (post_id, media_type, url, thumbnail_url, order_index)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                post_id,
                item.media_type,
                item.url,
                item.thumbnail_url,
                index as i64
            ],
        )
        .map_err(map_reference_violation)?;
    }

    tx.commit()?;
    Ok(post_id)
}

/// Assemble one page of the feed, newest first. Each post carries its author,
/// derived interaction counts, and fully materialized media/catch lists; a
/// failure anywhere aborts the whole page rather than serving partial posts.
pub fn list_posts(pool: &DbPool, page: u32, limit: u32) -> AppResult<FeedPage> {
    let conn = pool.get()?;
    let offset = (i64::from(page) - 1) * i64::from(limit);

    let mut stmt = conn.prepare(FEED_SQL)?;
    let posts: Vec<FeedPost> = stmt
        .query_map(params![i64::from(limit), offset], map_feed_post)?
        .collect::<Result<_, _>>()?;
    drop(stmt);

    let mut enriched = Vec::with_capacity(posts.len());
    for mut post in posts {
        post.media = media_for_post(&conn, post.id)?;
        post.catches = catches_for_post(&conn, post.id)?;
        enriched.push(post);
    }

    Ok(FeedPage {
        posts: enriched,
        page,
        limit,
    })
}

/// Delete a post. Dependent catches, media, likes, comments, and reposts go
/// with it through the schema's cascade rules. Deleting an id that does not
/// exist is a no-op.
pub fn delete_post(pool: &DbPool, post_id: i64) -> AppResult<()> {
    let conn = pool.get()?;
    conn.execute("DELETE FROM posts WHERE id = ?1", params![post_id])?;
    Ok(())
}

fn map_feed_post(row: &rusqlite::Row) -> rusqlite::Result<FeedPost> {
    Ok(FeedPost {
        id: row.get(0)?,
        user_id: row.get(1)?,
        content: row.get(2)?,
        location_name: row.get(3)?,
        latitude: row.get(4)?,
        longitude: row.get(5)?,
        caught_at: row.get(6)?,
        weather: row.get(7)?,
        tide: row.get(8)?,
        created_at: row.get(9)?,
        username: row.get(10)?,
        display_name: row.get(11)?,
        avatar_url: row.get(12)?,
        like_count: row.get(13)?,
        comment_count: row.get(14)?,
        repost_count: row.get(15)?,
        media: Vec::new(),
        catches: Vec::new(),
    })
}

fn media_for_post(conn: &Connection, post_id: i64) -> AppResult<Vec<Media>> {
    let mut stmt = conn.prepare(
        "SELECT id, post_id, media_type, url, thumbnail_url, order_index
         FROM media WHERE post_id = ?1 ORDER BY order_index",
    )?;
    let media = stmt
        .query_map(params![post_id], |row| {
            Ok(Media {
                id: row.get(0)?,
                post_id: row.get(1)?,
                media_type: row.get(2)?,
                url: row.get(3)?,
                thumbnail_url: row.get(4)?,
                order_index: row.get(5)?,
            })
        })?
        .collect::<Result<_, _>>()?;
    Ok(media)
}

fn catches_for_post(conn: &Connection, post_id: i64) -> AppResult<Vec<FishCatch>> {
    let mut stmt = conn.prepare(
        "SELECT fc.id, fc.post_id, fc.species_id,
                COALESCE(fs.name_ja, fc.species_name) AS species_name,
                fc.size_cm, fc.weight_kg, fc.tackle, fc.bait
         FROM fish_catches fc
         LEFT JOIN fish_species fs ON fs.id = fc.species_id
         WHERE fc.post_id = ?1
         ORDER BY fc.id",
    )?;
    let catches = stmt
        .query_map(params![post_id], |row| {
            Ok(FishCatch {
                id: row.get(0)?,
                post_id: row.get(1)?,
                species_id: row.get(2)?,
                species_name: row.get(3)?,
                size_cm: row.get(4)?,
                weight_kg: row.get(5)?,
                tackle: row.get(6)?,
                bait: row.get(7)?,
            })
        })?
        .collect::<Result<_, _>>()?;
    Ok(catches)
}

/// Accepts RFC3339 plus the bare formats HTML datetime inputs produce.
fn caught_at_is_valid(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").is_ok()
}
