use crate::models::Like;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Which entity a like points at. Each target has its own link column in
/// `likes` and its own denormalized counter column on the target table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeTarget {
    Video,
    Comment,
    Tweet,
}

impl LikeTarget {
    fn link_column(self) -> &'static str {
        match self {
            LikeTarget::Video => "video_id",
            LikeTarget::Comment => "comment_id",
            LikeTarget::Tweet => "tweet_id",
        }
    }

    fn counter_table(self) -> &'static str {
        match self {
            LikeTarget::Video => "videos",
            LikeTarget::Comment => "comments",
            LikeTarget::Tweet => "tweets",
        }
    }
}

/// Outcome of a like toggle.
#[derive(Debug)]
pub enum LikeToggle {
    /// The link existed and was removed; the counter was decremented.
    Removed,
    /// The link was created (or already present under a concurrent
    /// duplicate request, in which case the counter was left alone).
    Created(Like),
}

const LIKE_COLUMNS: &str = "id, video_id, comment_id, tweet_id, liked_by, created_at";

/// Flip the like state for one (target, user) pair.
///
/// Runs as a single transaction: the conditional delete/insert and the
/// counter update commit together, and the partial unique indexes make the
/// insert race-free. The counter never drops below zero.
pub async fn toggle_like(
    pool: &PgPool,
    target: LikeTarget,
    target_id: Uuid,
    user_id: Uuid,
) -> Result<LikeToggle, sqlx::Error> {
    let link_column = target.link_column();
    let counter_table = target.counter_table();

    let mut tx = pool.begin().await?;

    let removed = sqlx::query(&format!(
        "DELETE FROM likes WHERE {} = $1 AND liked_by = $2",
        link_column
    ))
    .bind(target_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if removed > 0 {
        sqlx::query(&format!(
            "UPDATE {} SET likes = GREATEST(likes - 1, 0) WHERE id = $1",
            counter_table
        ))
        .bind(target_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        return Ok(LikeToggle::Removed);
    }

    let like = sqlx::query_as::<_, Like>(&format!(
        r#"
        INSERT INTO likes ({}, liked_by)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        RETURNING {}
        "#,
        link_column, LIKE_COLUMNS
    ))
    .bind(target_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?;

    match like {
        Some(like) => {
            sqlx::query(&format!(
                "UPDATE {} SET likes = likes + 1 WHERE id = $1",
                counter_table
            ))
            .bind(target_id)
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
            Ok(LikeToggle::Created(like))
        }
        None => {
            // Lost a race against an identical request: return the existing
            // link, counter untouched.
            let existing = sqlx::query_as::<_, Like>(&format!(
                "SELECT {} FROM likes WHERE {} = $1 AND liked_by = $2",
                LIKE_COLUMNS, link_column
            ))
            .bind(target_id)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

            tx.commit().await?;
            Ok(LikeToggle::Created(existing))
        }
    }
}

/// A liked video joined onto its like edge, newest like first.
#[derive(Debug, Clone, FromRow)]
pub struct LikedVideoRow {
    pub like_id: Uuid,
    pub liked_at: DateTime<Utc>,
    pub video_id: Uuid,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub views: i64,
    pub likes: i64,
}

/// All videos the user has liked, newest like first
pub async fn get_liked_videos(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<LikedVideoRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, LikedVideoRow>(
        r#"
        SELECT l.id AS like_id, l.created_at AS liked_at,
               v.id AS video_id, v.video_file, v.thumbnail, v.title,
               v.description, v.duration, v.views, v.likes
        FROM likes l
        JOIN videos v ON v.id = l.video_id
        WHERE l.liked_by = $1 AND l.video_id IS NOT NULL
        ORDER BY l.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_columns() {
        assert_eq!(LikeTarget::Video.link_column(), "video_id");
        assert_eq!(LikeTarget::Comment.link_column(), "comment_id");
        assert_eq!(LikeTarget::Tweet.link_column(), "tweet_id");
    }

    #[test]
    fn test_counter_tables() {
        assert_eq!(LikeTarget::Video.counter_table(), "videos");
        assert_eq!(LikeTarget::Comment.counter_table(), "comments");
        assert_eq!(LikeTarget::Tweet.counter_table(), "tweets");
    }
}
