use actix_web::web;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::dashboard_repo;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::response::ApiResponse;

// ============================================
// Response Structs
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatsResponse {
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

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelVideoResponse {
    pub id: Uuid,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub views: i64,
    pub created_at: DateTime<Utc>,
}

// ============================================
// Handler Functions
// ============================================

/// Aggregate stats for the current user's channel
/// GET /api/v1/dashboard/stats
pub async fn get_channel_stats(
    user: UserId,
    pool: web::Data<PgPool>,
) -> Result<ApiResponse<ChannelStatsResponse>> {
    let stats = dashboard_repo::get_channel_stats(&pool, user.0)
        .await?
        .ok_or_else(|| AppError::NotFound("Channel not found".into()))?;

    let response = ChannelStatsResponse {
        id: stats.id,
        fullname: stats.fullname,
        username: stats.username,
        avatar: stats.avatar,
        cover_image: stats.cover_image,
        email: stats.email,
        total_subscribers: stats.total_subscribers,
        total_videos: stats.total_videos,
        total_views: stats.total_views,
        total_likes: stats.total_likes,
    };

    Ok(ApiResponse::ok(
        response,
        "Channel stats fetched successfully",
    ))
}

/// Published videos of the current user's channel, newest first
/// GET /api/v1/dashboard/videos
pub async fn get_channel_videos(
    user: UserId,
    pool: web::Data<PgPool>,
) -> Result<ApiResponse<Vec<ChannelVideoResponse>>> {
    let videos = dashboard_repo::get_channel_videos(&pool, user.0)
        .await?
        .into_iter()
        .map(|row| ChannelVideoResponse {
            id: row.id,
            video_file: row.video_file,
            thumbnail: row.thumbnail,
            title: row.title,
            description: row.description,
            duration: row.duration,
            views: row.views,
            created_at: row.created_at,
        })
        .collect();

    Ok(ApiResponse::ok(
        videos,
        "Channel videos fetched successfully",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_field_names() {
        let response = ChannelStatsResponse {
            id: Uuid::new_v4(),
            fullname: "Dana D".into(),
            username: "dana".into(),
            avatar: "d.png".into(),
            cover_image: "cover.png".into(),
            email: "dana@example.com".into(),
            total_subscribers: 3,
            total_videos: 0,
            total_views: 0,
            total_likes: 0,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("coverImage").is_some());
        assert!(json.get("totalSubscribers").is_some());
        assert_eq!(json["totalVideos"], 0);
        assert_eq!(json["totalSubscribers"], 3);
    }
}
