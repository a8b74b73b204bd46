use crate::models::Tweet;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

const TWEET_COLUMNS: &str = "id, content, owner_id, likes, created_at, updated_at";

/// Create a new tweet
pub async fn create_tweet(
    pool: &PgPool,
    owner_id: Uuid,
    content: &str,
) -> Result<Tweet, sqlx::Error> {
    let tweet = sqlx::query_as::<_, Tweet>(&format!(
        r#"
        INSERT INTO tweets (content, owner_id)
        VALUES ($1, $2)
        RETURNING {}
        "#,
        TWEET_COLUMNS
    ))
    .bind(content)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(tweet)
}

/// Look up a tweet by id
pub async fn find_tweet_by_id(
    pool: &PgPool,
    tweet_id: Uuid,
) -> Result<Option<Tweet>, sqlx::Error> {
    let tweet = sqlx::query_as::<_, Tweet>(&format!(
        "SELECT {} FROM tweets WHERE id = $1",
        TWEET_COLUMNS
    ))
    .bind(tweet_id)
    .fetch_optional(pool)
    .await?;

    Ok(tweet)
}

/// Replace a tweet's content
pub async fn update_tweet_content(
    pool: &PgPool,
    tweet_id: Uuid,
    content: &str,
) -> Result<Tweet, sqlx::Error> {
    let tweet = sqlx::query_as::<_, Tweet>(&format!(
        r#"
        UPDATE tweets
        SET content = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        TWEET_COLUMNS
    ))
    .bind(tweet_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(tweet)
}

/// Delete a tweet together with every like referencing it, in one
/// transaction (no orphan tweet likes).
pub async fn delete_tweet_with_likes(pool: &PgPool, tweet_id: Uuid) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let orphaned = sqlx::query("DELETE FROM likes WHERE tweet_id = $1")
        .bind(tweet_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM tweets WHERE id = $1")
        .bind(tweet_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::debug!("Deleted tweet {} and {} of its likes", tweet_id, orphaned);
    Ok(())
}

/// A tweet joined onto its owner's public profile.
#[derive(Debug, Clone, FromRow)]
pub struct TweetWithOwnerRow {
    pub id: Uuid,
    pub content: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_id: Uuid,
    pub owner_username: String,
    pub owner_avatar: String,
}

/// All tweets by a user, newest first, owner attached in the same query
pub async fn get_tweets_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<TweetWithOwnerRow>, sqlx::Error> {
    let tweets = sqlx::query_as::<_, TweetWithOwnerRow>(
        r#"
        SELECT t.id, t.content, t.likes, t.created_at, t.updated_at,
               u.id AS owner_id, u.username AS owner_username, u.avatar AS owner_avatar
        FROM tweets t
        JOIN users u ON u.id = t.owner_id
        WHERE t.owner_id = $1
        ORDER BY t.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(tweets)
}
