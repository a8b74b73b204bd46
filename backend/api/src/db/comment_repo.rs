use crate::models::Comment;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

const COMMENT_COLUMNS: &str = "id, content, video_id, owner_id, likes, created_at, updated_at";

/// Create a new comment on a video
pub async fn create_comment(
    pool: &PgPool,
    video_id: Uuid,
    owner_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(&format!(
        r#"
        INSERT INTO comments (content, video_id, owner_id)
        VALUES ($1, $2, $3)
        RETURNING {}
        "#,
        COMMENT_COLUMNS
    ))
    .bind(content)
    .bind(video_id)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Look up a comment by id
pub async fn find_comment_by_id(
    pool: &PgPool,
    comment_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(&format!(
        "SELECT {} FROM comments WHERE id = $1",
        COMMENT_COLUMNS
    ))
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Replace a comment's content
pub async fn update_comment_content(
    pool: &PgPool,
    comment_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(&format!(
        r#"
        UPDATE comments
        SET content = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        COMMENT_COLUMNS
    ))
    .bind(comment_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Delete a comment. Likes pointing at it are intentionally left behind
/// (parity with the source system; see DESIGN.md).
pub async fn delete_comment(pool: &PgPool, comment_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// A comment joined onto its owner's public profile.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithOwnerRow {
    pub id: Uuid,
    pub content: String,
    pub video_id: Uuid,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_id: Uuid,
    pub owner_username: String,
    pub owner_avatar: String,
}

/// Paginated comments for a video, newest first, owner attached in the
/// same query
pub async fn get_comments_by_video(
    pool: &PgPool,
    video_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<CommentWithOwnerRow>, sqlx::Error> {
    let comments = sqlx::query_as::<_, CommentWithOwnerRow>(
        r#"
        SELECT c.id, c.content, c.video_id, c.likes, c.created_at, c.updated_at,
               u.id AS owner_id, u.username AS owner_username, u.avatar AS owner_avatar
        FROM comments c
        JOIN users u ON u.id = c.owner_id
        WHERE c.video_id = $1
        ORDER BY c.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(video_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}
