use rusqlite::params;

use crate::db::models::{NewUser, User, UserProfile, UserStats};
use crate::error::{AppError, AppResult};
use crate::state::DbPool;

/// Create a user row. The username is the immutable natural key; a duplicate
/// surfaces as a conflict with no partial state left behind.
pub fn create_user(pool: &DbPool, new_user: &NewUser) -> AppResult<User> {
    let conn = pool.get()?;

    let result = conn.execute(
        "INSERT INTO users (username, display_name, bio, avatar_url) VALUES (?1, ?2, ?3, ?4)",
        params![
            new_user.username,
            new_user.display_name,
            new_user.bio,
            new_user.avatar_url
        ],
    );

    match result {
        Ok(_) => {}
        Err(e) if crate::repo::is_unique_violation(&e) => {
            return Err(AppError::Conflict("Username already exists".into()));
        }
        Err(e) => return Err(e.into()),
    }

    let user = conn.query_row(
        "SELECT id, username, display_name, bio, avatar_url, created_at
         FROM users WHERE id = ?1",
        params![conn.last_insert_rowid()],
        map_user,
    )?;

    Ok(user)
}

/// Look up a user by username, enriched with derived activity counters:
/// posts written, likes given, comments given.
pub fn get_user_by_username(pool: &DbPool, username: &str) -> AppResult<UserProfile> {
    let conn = pool.get()?;

    let user = match conn.query_row(
        "SELECT id, username, display_name, bio, avatar_url, created_at
         FROM users WHERE username = ?1",
        params![username],
        map_user,
    ) {
        Ok(user) => user,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            return Err(AppError::NotFound("User not found".into()));
        }
        Err(e) => return Err(e.into()),
    };

    let stats = conn.query_row(
        "SELECT
            (SELECT COUNT(*) FROM posts WHERE user_id = ?1),
            (SELECT COUNT(*) FROM likes WHERE user_id = ?1),
            (SELECT COUNT(*) FROM comments WHERE user_id = ?1)",
        params![user.id],
        |row| {
            Ok(UserStats {
                post_count: row.get(0)?,
                like_count: row.get(1)?,
                comment_count: row.get(2)?,
            })
        },
    )?;

    Ok(UserProfile { user, stats })
}

fn map_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        display_name: row.get(2)?,
        bio: row.get(3)?,
        avatar_url: row.get(4)?,
        created_at: row.get(5)?,
    })
}
