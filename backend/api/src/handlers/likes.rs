use actix_web::web;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::like_repo::{self, LikeTarget, LikeToggle};
use crate::db::{comment_repo, tweet_repo, user_repo, video_repo};
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::{Like, OwnerInfo};
use crate::response::{empty, ApiResponse};
use crate::validators;

// ============================================
// Response Structs
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweet_id: Option<Uuid>,
    pub liked_by: OwnerInfo,
    pub created_at: DateTime<Utc>,
}

impl LikeResponse {
    fn from_like(like: Like, liked_by: OwnerInfo) -> Self {
        Self {
            id: like.id,
            video_id: like.video_id,
            comment_id: like.comment_id,
            tweet_id: like.tweet_id,
            liked_by,
            created_at: like.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedVideoInfo {
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
pub struct LikedVideoResponse {
    pub id: Uuid,
    pub video: LikedVideoInfo,
    pub created_at: DateTime<Utc>,
}

// ============================================
// Handler Functions
// ============================================

/// One toggle body shared by the three like endpoints: flip the link,
/// then respond with either the populated like (liked) or an empty
/// payload (unliked).
async fn toggle_and_respond(
    pool: &PgPool,
    target: LikeTarget,
    target_id: Uuid,
    user_id: Uuid,
    liked_message: &str,
    unliked_message: &str,
) -> Result<ApiResponse<serde_json::Value>> {
    match like_repo::toggle_like(pool, target, target_id, user_id).await? {
        LikeToggle::Removed => {
            tracing::debug!("User {} unliked {:?} {}", user_id, target, target_id);
            Ok(ApiResponse::ok(empty(), unliked_message))
        }
        LikeToggle::Created(like) => {
            let liked_by = user_repo::find_owner_info(pool, user_id)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".into()))?;

            tracing::debug!("User {} liked {:?} {}", user_id, target, target_id);

            let response = LikeResponse::from_like(like, liked_by);
            Ok(ApiResponse::ok(
                serde_json::to_value(response)
                    .map_err(|e| AppError::Internal(e.to_string()))?,
                liked_message,
            ))
        }
    }
}

/// Toggle the current user's like on a video
/// POST /api/v1/likes/toggle/v/{video_id}
pub async fn toggle_video_like(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<ApiResponse<serde_json::Value>> {
    let video_id = validators::parse_id(&path.into_inner(), "Invalid video id")?;

    if !video_repo::video_exists(&pool, video_id).await? {
        return Err(AppError::NotFound("Video not found".into()));
    }

    toggle_and_respond(
        &pool,
        LikeTarget::Video,
        video_id,
        user.0,
        "Successfully liked this video",
        "Like removed from this video",
    )
    .await
}

/// Toggle the current user's like on a comment
/// POST /api/v1/likes/toggle/c/{comment_id}
pub async fn toggle_comment_like(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<ApiResponse<serde_json::Value>> {
    let comment_id = validators::parse_id(&path.into_inner(), "Invalid comment id")?;

    if comment_repo::find_comment_by_id(&pool, comment_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Comment not found".into()));
    }

    toggle_and_respond(
        &pool,
        LikeTarget::Comment,
        comment_id,
        user.0,
        "Successfully liked this comment",
        "Like removed from this comment",
    )
    .await
}

/// Toggle the current user's like on a tweet
/// POST /api/v1/likes/toggle/t/{tweet_id}
pub async fn toggle_tweet_like(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<ApiResponse<serde_json::Value>> {
    let tweet_id = validators::parse_id(&path.into_inner(), "Invalid tweet id")?;

    if tweet_repo::find_tweet_by_id(&pool, tweet_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Tweet not found".into()));
    }

    toggle_and_respond(
        &pool,
        LikeTarget::Tweet,
        tweet_id,
        user.0,
        "Successfully liked this tweet",
        "Like removed from this tweet",
    )
    .await
}

/// All videos liked by the current user, newest like first
/// GET /api/v1/likes/videos
pub async fn get_liked_videos(
    user: UserId,
    pool: web::Data<PgPool>,
) -> Result<ApiResponse<Vec<LikedVideoResponse>>> {
    let rows = like_repo::get_liked_videos(&pool, user.0).await?;

    if rows.is_empty() {
        return Err(AppError::NotFound("No liked videos found".into()));
    }

    let liked_videos = rows
        .into_iter()
        .map(|row| LikedVideoResponse {
            id: row.like_id,
            video: LikedVideoInfo {
                id: row.video_id,
                video_file: row.video_file,
                thumbnail: row.thumbnail,
                title: row.title,
                description: row.description,
                duration: row.duration,
                views: row.views,
                likes: row.likes,
            },
            created_at: row.liked_at,
        })
        .collect();

    Ok(ApiResponse::ok(
        liked_videos,
        "All liked videos are fetched",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_response_omits_unset_targets() {
        let like = Like {
            id: Uuid::new_v4(),
            video_id: Some(Uuid::new_v4()),
            comment_id: None,
            tweet_id: None,
            liked_by: Uuid::new_v4(),
            created_at: Utc::now(),
        };
        let owner = OwnerInfo {
            id: like.liked_by,
            username: "bob".into(),
            avatar: "b.png".into(),
        };
        let json = serde_json::to_value(LikeResponse::from_like(like, owner)).unwrap();
        assert!(json.get("videoId").is_some());
        assert!(json.get("commentId").is_none());
        assert!(json.get("tweetId").is_none());
        assert_eq!(json["likedBy"]["username"], "bob");
    }
}
