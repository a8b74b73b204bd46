use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Aggregated channel statistics, computed by the database in one
/// statement: the subscriber count comes from the link table, the video
/// totals consider published videos only, and the like total counts like
/// rows on those videos.
#[derive(Debug, Clone, FromRow)]
pub struct ChannelStatsRow {
    pub id: Uuid,
    pub fullname: String,
    pub username: String,
    pub avatar: String,
    pub cover_image: String,
    pub email: String,
    pub total_subscribers: i64,
    pub total_videos: i64,
    pub total_views: i64,
    pub total_likes: i64,
}

/// Channel stats for one user, or None when the user row is absent
pub async fn get_channel_stats(
    pool: &PgPool,
    channel_id: Uuid,
) -> Result<Option<ChannelStatsRow>, sqlx::Error> {
    let stats = sqlx::query_as::<_, ChannelStatsRow>(
        r#"
        SELECT u.id, u.fullname, u.username, u.avatar, u.cover_image, u.email,
               (SELECT COUNT(*) FROM subscriptions s
                WHERE s.channel_id = u.id)                       AS total_subscribers,
               (SELECT COUNT(*) FROM videos v
                WHERE v.owner_id = u.id AND v.is_published)      AS total_videos,
               (SELECT COALESCE(SUM(v.views), 0) FROM videos v
                WHERE v.owner_id = u.id AND v.is_published)      AS total_views,
               (SELECT COUNT(*) FROM likes l
                JOIN videos v ON v.id = l.video_id
                WHERE v.owner_id = u.id AND v.is_published)      AS total_likes
        FROM users u
        WHERE u.id = $1
        "#,
    )
    .bind(channel_id)
    .fetch_optional(pool)
    .await?;

    Ok(stats)
}

/// A published channel video projected for the dashboard listing.
#[derive(Debug, Clone, FromRow)]
pub struct ChannelVideoRow {
    pub id: Uuid,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub views: i64,
    pub created_at: DateTime<Utc>,
}

/// Published videos of a channel, newest first
pub async fn get_channel_videos(
    pool: &PgPool,
    channel_id: Uuid,
) -> Result<Vec<ChannelVideoRow>, sqlx::Error> {
    let videos = sqlx::query_as::<_, ChannelVideoRow>(
        r#"
        SELECT id, video_file, thumbnail, title, description, duration,
               views, created_at
        FROM videos
        WHERE owner_id = $1 AND is_published
        ORDER BY created_at DESC
        "#,
    )
    .bind(channel_id)
    .fetch_all(pool)
    .await?;

    Ok(videos)
}
