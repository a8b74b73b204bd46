use crate::models::Playlist;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

const PLAYLIST_COLUMNS: &str = "id, name, description, owner_id, created_at, updated_at";

/// Create an empty playlist
pub async fn create_playlist(
    pool: &PgPool,
    owner_id: Uuid,
    name: &str,
    description: &str,
) -> Result<Playlist, sqlx::Error> {
    let playlist = sqlx::query_as::<_, Playlist>(&format!(
        r#"
        INSERT INTO playlists (name, description, owner_id)
        VALUES ($1, $2, $3)
        RETURNING {}
        "#,
        PLAYLIST_COLUMNS
    ))
    .bind(name)
    .bind(description)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(playlist)
}

/// Look up a playlist by id
pub async fn find_playlist_by_id(
    pool: &PgPool,
    playlist_id: Uuid,
) -> Result<Option<Playlist>, sqlx::Error> {
    let playlist = sqlx::query_as::<_, Playlist>(&format!(
        "SELECT {} FROM playlists WHERE id = $1",
        PLAYLIST_COLUMNS
    ))
    .bind(playlist_id)
    .fetch_optional(pool)
    .await?;

    Ok(playlist)
}

/// All playlists owned by a user, newest first
pub async fn get_playlists_by_owner(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Vec<Playlist>, sqlx::Error> {
    let playlists = sqlx::query_as::<_, Playlist>(&format!(
        r#"
        SELECT {}
        FROM playlists
        WHERE owner_id = $1
        ORDER BY created_at DESC
        "#,
        PLAYLIST_COLUMNS
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(playlists)
}

/// Rename a playlist and replace its description
pub async fn update_playlist(
    pool: &PgPool,
    playlist_id: Uuid,
    name: &str,
    description: &str,
) -> Result<Playlist, sqlx::Error> {
    let playlist = sqlx::query_as::<_, Playlist>(&format!(
        r#"
        UPDATE playlists
        SET name = $2, description = $3, updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        PLAYLIST_COLUMNS
    ))
    .bind(playlist_id)
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await?;

    Ok(playlist)
}

/// Delete a playlist; membership rows go with it (FK cascade)
pub async fn delete_playlist(pool: &PgPool, playlist_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM playlists WHERE id = $1")
        .bind(playlist_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Append a video to a playlist at the next position. Returns false when
/// the video is already a member (the insert is a no-op).
pub async fn add_video_to_playlist(
    pool: &PgPool,
    playlist_id: Uuid,
    video_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let inserted = sqlx::query(
        r#"
        INSERT INTO playlist_videos (playlist_id, video_id, position)
        SELECT $1, $2, COALESCE(MAX(position) + 1, 0)
        FROM playlist_videos
        WHERE playlist_id = $1
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(playlist_id)
    .bind(video_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(inserted > 0)
}

/// Remove a video from a playlist. Returns false when it was not a member.
pub async fn remove_video_from_playlist(
    pool: &PgPool,
    playlist_id: Uuid,
    video_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let removed = sqlx::query(
        "DELETE FROM playlist_videos WHERE playlist_id = $1 AND video_id = $2",
    )
    .bind(playlist_id)
    .bind(video_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(removed > 0)
}

/// A playlist member video, projected for list responses.
#[derive(Debug, Clone, FromRow)]
pub struct PlaylistVideoRow {
    pub playlist_id: Uuid,
    pub video_id: Uuid,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub views: i64,
    pub likes: i64,
}

/// Member videos for a set of playlists, in playlist insertion order.
/// One query regardless of how many playlists are being populated.
pub async fn get_videos_for_playlists(
    pool: &PgPool,
    playlist_ids: &[Uuid],
) -> Result<Vec<PlaylistVideoRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PlaylistVideoRow>(
        r#"
        SELECT pv.playlist_id, v.id AS video_id, v.video_file, v.thumbnail,
               v.title, v.description, v.duration, v.views, v.likes
        FROM playlist_videos pv
        JOIN videos v ON v.id = pv.video_id
        WHERE pv.playlist_id = ANY($1)
        ORDER BY pv.playlist_id, pv.position
        "#,
    )
    .bind(playlist_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
