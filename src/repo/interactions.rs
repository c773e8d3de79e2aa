use rusqlite::params;

use crate::db::models::Comment;
use crate::error::{AppError, AppResult};
use crate::repo::{is_unique_violation, map_reference_violation};
use crate::state::DbPool;

/// Record a like. Uniqueness is enforced by the (post_id, user_id) primary
/// key rather than a pre-check, so concurrent likes cannot race past it.
pub fn like_post(pool: &DbPool, post_id: i64, user_id: i64) -> AppResult<()> {
    let conn = pool.get()?;

    let result = conn.execute(
        "INSERT INTO likes (post_id, user_id) VALUES (?1, ?2)",
        params![post_id, user_id],
    );

    match result {
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => Err(AppError::Conflict("Already liked".into())),
        Err(e) => Err(map_reference_violation(e)),
    }
}

/// Remove a like. Idempotent: unliking a post that was never liked is a
/// silent success.
pub fn unlike_post(pool: &DbPool, post_id: i64, user_id: i64) -> AppResult<()> {
    let conn = pool.get()?;
    conn.execute(
        "DELETE FROM likes WHERE post_id = ?1 AND user_id = ?2",
        params![post_id, user_id],
    )?;
    Ok(())
}

/// Record a repost. Same uniqueness contract as likes.
pub fn repost_post(pool: &DbPool, post_id: i64, user_id: i64) -> AppResult<()> {
    let conn = pool.get()?;

    let result = conn.execute(
        "INSERT INTO reposts (post_id, user_id) VALUES (?1, ?2)",
        params![post_id, user_id],
    );

    match result {
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => Err(AppError::Conflict("Already reposted".into())),
        Err(e) => Err(map_reference_violation(e)),
    }
}

/// Remove a repost. Idempotent like `unlike_post`.
pub fn unrepost_post(pool: &DbPool, post_id: i64, user_id: i64) -> AppResult<()> {
    let conn = pool.get()?;
    conn.execute(
        "DELETE FROM reposts WHERE post_id = ?1 AND user_id = ?2",
        params![post_id, user_id],
    )?;
    Ok(())
}

/// Add a comment, optionally as a threaded reply. A parent id must reference
/// an existing comment on the same post. Returns the new comment id.
pub fn add_comment(
    pool: &DbPool,
    post_id: i64,
    user_id: i64,
    content: &str,
    parent_comment_id: Option<i64>,
) -> AppResult<i64> {
    let conn = pool.get()?;

    if let Some(parent_id) = parent_comment_id {
        let parent_post: i64 = match conn.query_row(
            "SELECT post_id FROM comments WHERE id = ?1",
            params![parent_id],
            |row| row.get(0),
        ) {
            Ok(post_id) => post_id,
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Err(AppError::Validation("Parent comment does not exist".into()));
            }
            Err(e) => return Err(e.into()),
        };
        if parent_post != post_id {
            return Err(AppError::Validation(
                "Parent comment belongs to a different post".into(),
            ));
        }
    }

    conn.execute(
        "INSERT INTO comments (post_id, user_id, parent_comment_id, content)
         VALUES (?1, ?2, ?3, ?4)",
        params![post_id, user_id, parent_comment_id, content],
    )
    .map_err(map_reference_violation)?;

    Ok(conn.last_insert_rowid())
}

/// All comments on a post, author-enriched, oldest first. This is the one
/// ordering in the system that is ascending; the feed is newest-first.
pub fn list_comments(pool: &DbPool, post_id: i64) -> AppResult<Vec<Comment>> {
    let conn = pool.get()?;

    let mut stmt = conn.prepare(
        "SELECT c.id, c.post_id, c.user_id, c.parent_comment_id, c.content, c.created_at,
                u.username, u.display_name, u.avatar_url
         FROM comments c
         JOIN users u ON u.id = c.user_id
         WHERE c.post_id = ?1
         ORDER BY c.created_at ASC, c.id ASC",
    )?;
    let comments = stmt
        .query_map(params![post_id], |row| {
            Ok(Comment {
                id: row.get(0)?,
                post_id: row.get(1)?,
                user_id: row.get(2)?,
                parent_comment_id: row.get(3)?,
                content: row.get(4)?,
                created_at: row.get(5)?,
                username: row.get(6)?,
                display_name: row.get(7)?,
                avatar_url: row.get(8)?,
            })
        })?
        .collect::<Result<_, _>>()?;

    Ok(comments)
}
