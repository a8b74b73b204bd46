use crate::models::Video;
use sqlx::PgPool;
use uuid::Uuid;

/// Look up a video by id
pub async fn find_video_by_id(pool: &PgPool, video_id: Uuid) -> Result<Option<Video>, sqlx::Error> {
    let video = sqlx::query_as::<_, Video>(
        r#"
        SELECT id, owner_id, video_file, thumbnail, title, description,
               duration, views, likes, is_published, created_at
        FROM videos
        WHERE id = $1
        "#,
    )
    .bind(video_id)
    .fetch_optional(pool)
    .await?;

    Ok(video)
}

/// Check that a video row exists without fetching it
pub async fn video_exists(pool: &PgPool, video_id: Uuid) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM videos WHERE id = $1)")
        .bind(video_id)
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}
