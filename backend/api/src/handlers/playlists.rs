use actix_web::web;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::db::{playlist_repo, user_repo, video_repo};
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::{OwnerInfo, Playlist};
use crate::response::{empty, ApiResponse};
use crate::validators;

// ============================================
// Request / Response Structs
// ============================================

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlaylistRequest {
    #[validate(custom(
        function = "crate::validators::not_blank",
        message = "playlist name cannot be empty"
    ))]
    pub name: String,
    #[validate(custom(
        function = "crate::validators::not_blank",
        message = "playlist description cannot be empty"
    ))]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePlaylistRequest {
    #[validate(custom(
        function = "crate::validators::not_blank",
        message = "name cannot be empty"
    ))]
    pub name: String,
    #[validate(custom(
        function = "crate::validators::not_blank",
        message = "description cannot be empty"
    ))]
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistVideoInfo {
    pub id: Uuid,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub views: i64,
    pub likes: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner: OwnerInfo,
    pub videos: Vec<PlaylistVideoInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlaylistResponse {
    fn from_playlist(
        playlist: Playlist,
        owner: OwnerInfo,
        videos: Vec<PlaylistVideoInfo>,
    ) -> Self {
        Self {
            id: playlist.id,
            name: playlist.name,
            description: playlist.description,
            owner,
            videos,
            created_at: playlist.created_at,
            updated_at: playlist.updated_at,
        }
    }
}

/// Populate one playlist: owner profile plus member videos in order.
async fn populate_playlist(pool: &PgPool, playlist: Playlist) -> Result<PlaylistResponse> {
    let owner = user_repo::find_owner_info(pool, playlist.owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let videos = playlist_repo::get_videos_for_playlists(pool, &[playlist.id])
        .await?
        .into_iter()
        .map(|row| PlaylistVideoInfo {
            id: row.video_id,
            video_file: row.video_file,
            thumbnail: row.thumbnail,
            title: row.title,
            description: row.description,
            duration: row.duration,
            views: row.views,
            likes: row.likes,
        })
        .collect();

    Ok(PlaylistResponse::from_playlist(playlist, owner, videos))
}

// ============================================
// Handler Functions
// ============================================

/// Create an empty playlist
/// POST /api/v1/playlists
pub async fn create_playlist(
    user: UserId,
    pool: web::Data<PgPool>,
    payload: web::Json<CreatePlaylistRequest>,
) -> Result<ApiResponse<PlaylistResponse>> {
    payload.validate()?;

    let playlist =
        playlist_repo::create_playlist(&pool, user.0, &payload.name, &payload.description).await?;

    let owner = user_repo::find_owner_info(&pool, user.0)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    tracing::info!("User {} created playlist {}", user.0, playlist.id);

    Ok(ApiResponse::created(
        PlaylistResponse::from_playlist(playlist, owner, Vec::new()),
        "Playlist created successfully",
    ))
}

/// All playlists of a user, newest first, each with owner and videos
/// GET /api/v1/playlists/user/{user_id}
pub async fn get_user_playlists(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<ApiResponse<Vec<PlaylistResponse>>> {
    let user_id = validators::parse_id(&path.into_inner(), "Invalid user id")?;

    let user = user_repo::find_user_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    let owner = OwnerInfo {
        id: user.id,
        username: user.username,
        avatar: user.avatar,
    };

    let playlists = playlist_repo::get_playlists_by_owner(&pool, user_id).await?;

    // One membership query for the whole page, grouped per playlist.
    let playlist_ids: Vec<Uuid> = playlists.iter().map(|p| p.id).collect();
    let mut videos_by_playlist: HashMap<Uuid, Vec<PlaylistVideoInfo>> = HashMap::new();
    for row in playlist_repo::get_videos_for_playlists(&pool, &playlist_ids).await? {
        videos_by_playlist
            .entry(row.playlist_id)
            .or_default()
            .push(PlaylistVideoInfo {
                id: row.video_id,
                video_file: row.video_file,
                thumbnail: row.thumbnail,
                title: row.title,
                description: row.description,
                duration: row.duration,
                views: row.views,
                likes: row.likes,
            });
    }

    let response = playlists
        .into_iter()
        .map(|playlist| {
            let videos = videos_by_playlist.remove(&playlist.id).unwrap_or_default();
            PlaylistResponse::from_playlist(playlist, owner.clone(), videos)
        })
        .collect();

    Ok(ApiResponse::ok(response, "Playlists fetched successfully"))
}

/// One playlist with owner and videos
/// GET /api/v1/playlists/{playlist_id}
pub async fn get_playlist_by_id(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<ApiResponse<PlaylistResponse>> {
    let playlist_id = validators::parse_id(&path.into_inner(), "Invalid playlist id")?;

    let playlist = playlist_repo::find_playlist_by_id(&pool, playlist_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Playlist not found".into()))?;

    let response = populate_playlist(&pool, playlist).await?;

    Ok(ApiResponse::ok(response, "Playlist fetched successfully"))
}

/// Append a video to a playlist (owner only). Re-adding an existing
/// member is a no-op, not an error.
/// PATCH /api/v1/playlists/{playlist_id}/videos/{video_id}
pub async fn add_video_to_playlist(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
) -> Result<ApiResponse<PlaylistResponse>> {
    let (playlist_raw, video_raw) = path.into_inner();
    let playlist_id = validators::parse_id(&playlist_raw, "Invalid playlist id")?;
    let video_id = validators::parse_id(&video_raw, "Invalid video id")?;

    let playlist = playlist_repo::find_playlist_by_id(&pool, playlist_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Playlist not found".into()))?;

    if !video_repo::video_exists(&pool, video_id).await? {
        return Err(AppError::NotFound("Video not found".into()));
    }

    if playlist.owner_id != user.0 {
        return Err(AppError::Forbidden(
            "You are not authorized to add videos to this playlist".into(),
        ));
    }

    let inserted = playlist_repo::add_video_to_playlist(&pool, playlist_id, video_id).await?;
    let response = populate_playlist(&pool, playlist).await?;

    if !inserted {
        return Ok(ApiResponse::ok(response, "video already exists in playlist"));
    }

    Ok(ApiResponse::ok(
        response,
        "Video added to playlist successfully",
    ))
}

/// Remove a video from a playlist (owner only)
/// DELETE /api/v1/playlists/{playlist_id}/videos/{video_id}
pub async fn remove_video_from_playlist(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
) -> Result<ApiResponse<PlaylistResponse>> {
    let (playlist_raw, video_raw) = path.into_inner();
    let playlist_id = validators::parse_id(&playlist_raw, "Invalid playlist id")?;
    let video_id = validators::parse_id(&video_raw, "Invalid video id")?;

    let playlist = playlist_repo::find_playlist_by_id(&pool, playlist_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Playlist not found".into()))?;

    if !video_repo::video_exists(&pool, video_id).await? {
        return Err(AppError::NotFound("Video not found".into()));
    }

    if playlist.owner_id != user.0 {
        return Err(AppError::Forbidden(
            "You are not authorized to remove videos from this playlist".into(),
        ));
    }

    let removed = playlist_repo::remove_video_from_playlist(&pool, playlist_id, video_id).await?;
    if !removed {
        return Err(AppError::Validation(
            "video does not exist in playlist".into(),
        ));
    }

    let response = populate_playlist(&pool, playlist).await?;

    Ok(ApiResponse::ok(
        response,
        "Video removed from playlist successfully",
    ))
}

/// Rename a playlist / replace its description (owner only)
/// PATCH /api/v1/playlists/{playlist_id}
pub async fn update_playlist(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    payload: web::Json<UpdatePlaylistRequest>,
) -> Result<ApiResponse<PlaylistResponse>> {
    payload.validate()?;
    let playlist_id = validators::parse_id(&path.into_inner(), "Invalid playlist id")?;

    let playlist = playlist_repo::find_playlist_by_id(&pool, playlist_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Playlist not found".into()))?;

    if playlist.owner_id != user.0 {
        return Err(AppError::Forbidden(
            "You are not authorized to update this playlist".into(),
        ));
    }

    let updated =
        playlist_repo::update_playlist(&pool, playlist_id, &payload.name, &payload.description)
            .await?;
    let response = populate_playlist(&pool, updated).await?;

    Ok(ApiResponse::ok(response, "Playlist updated successfully"))
}

/// Delete a playlist (owner only)
/// DELETE /api/v1/playlists/{playlist_id}
pub async fn delete_playlist(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<ApiResponse<serde_json::Value>> {
    let playlist_id = validators::parse_id(&path.into_inner(), "Invalid playlist id")?;

    let playlist = playlist_repo::find_playlist_by_id(&pool, playlist_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Playlist not found".into()))?;

    if playlist.owner_id != user.0 {
        return Err(AppError::Forbidden(
            "You are not authorized to delete this playlist".into(),
        ));
    }

    playlist_repo::delete_playlist(&pool, playlist_id).await?;

    tracing::info!("User {} deleted playlist {}", user.0, playlist_id);

    Ok(ApiResponse::ok(empty(), "Playlist deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_message() {
        let payload = CreatePlaylistRequest {
            name: " ".into(),
            description: "mix".into(),
        };
        let err: AppError = payload.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "playlist name cannot be empty");
    }

    #[test]
    fn test_blank_description_message() {
        let payload = CreatePlaylistRequest {
            name: "mix".into(),
            description: "\t".into(),
        };
        let err: AppError = payload.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "playlist description cannot be empty");
    }

    #[test]
    fn test_update_payload_messages() {
        let payload = UpdatePlaylistRequest {
            name: "".into(),
            description: "d".into(),
        };
        let err: AppError = payload.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "name cannot be empty");
    }
}
