use actix_web::web;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::{comment_repo, user_repo, video_repo};
use crate::error::{AppError, Result};
use crate::handlers::PaginationQuery;
use crate::middleware::UserId;
use crate::models::{Comment, OwnerInfo};
use crate::response::{empty, ApiResponse};
use crate::validators;

// ============================================
// Request / Response Structs
// ============================================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(custom(
        function = "crate::validators::not_blank",
        message = "Comment content is required"
    ))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(custom(
        function = "crate::validators::not_blank",
        message = "content cannot be empty"
    ))]
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub video_id: Uuid,
    pub owner: OwnerInfo,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentResponse {
    fn from_comment(comment: Comment, owner: OwnerInfo) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            video_id: comment.video_id,
            owner,
            likes: comment.likes,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

// ============================================
// Handler Functions
// ============================================

/// Get paginated comments for a video
/// GET /api/v1/videos/{video_id}/comments?page=1&limit=10
pub async fn get_video_comments(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    query: web::Query<PaginationQuery>,
) -> Result<ApiResponse<Vec<CommentResponse>>> {
    let video_id = validators::parse_id(&path.into_inner(), "Invalid video id")?;

    if !video_repo::video_exists(&pool, video_id).await? {
        return Err(AppError::NotFound("Video not found".into()));
    }

    let rows =
        comment_repo::get_comments_by_video(&pool, video_id, query.limit(), query.offset())
            .await?;

    let comments = rows
        .into_iter()
        .map(|row| CommentResponse {
            id: row.id,
            content: row.content,
            video_id: row.video_id,
            owner: OwnerInfo {
                id: row.owner_id,
                username: row.owner_username,
                avatar: row.owner_avatar,
            },
            likes: row.likes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
        .collect();

    Ok(ApiResponse::ok(comments, "Comments fetched successfully"))
}

/// Add a comment to a video
/// POST /api/v1/videos/{video_id}/comments
pub async fn add_comment(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    payload: web::Json<CreateCommentRequest>,
) -> Result<ApiResponse<CommentResponse>> {
    let video_id = validators::parse_id(&path.into_inner(), "Invalid video id")?;
    payload.validate()?;

    if !video_repo::video_exists(&pool, video_id).await? {
        return Err(AppError::NotFound("Video not found".into()));
    }

    let comment = comment_repo::create_comment(&pool, video_id, user.0, &payload.content).await?;

    let owner = user_repo::find_owner_info(&pool, user.0)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    tracing::debug!("User {} commented on video {}", user.0, video_id);

    Ok(ApiResponse::created(
        CommentResponse::from_comment(comment, owner),
        "Comment added successfully",
    ))
}

/// Update a comment's content (owner only)
/// PATCH /api/v1/comments/{comment_id}
pub async fn update_comment(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    payload: web::Json<UpdateCommentRequest>,
) -> Result<ApiResponse<CommentResponse>> {
    let comment_id = validators::parse_id(&path.into_inner(), "Invalid comment id")?;
    payload.validate()?;

    let comment = comment_repo::find_comment_by_id(&pool, comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".into()))?;

    if comment.owner_id != user.0 {
        return Err(AppError::Forbidden(
            "Not authorized to update this comment".into(),
        ));
    }

    let updated = comment_repo::update_comment_content(&pool, comment_id, &payload.content).await?;

    let owner = user_repo::find_owner_info(&pool, user.0)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(ApiResponse::ok(
        CommentResponse::from_comment(updated, owner),
        "Comment updated successfully",
    ))
}

/// Delete a comment (owner only)
/// DELETE /api/v1/comments/{comment_id}
pub async fn delete_comment(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<ApiResponse<serde_json::Value>> {
    let comment_id = validators::parse_id(&path.into_inner(), "Invalid comment id")?;

    let comment = comment_repo::find_comment_by_id(&pool, comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".into()))?;

    if comment.owner_id != user.0 {
        return Err(AppError::Forbidden(
            "Not authorized to delete this comment".into(),
        ));
    }

    comment_repo::delete_comment(&pool, comment_id).await?;

    tracing::info!("User {} deleted comment {}", user.0, comment_id);

    Ok(ApiResponse::ok(empty(), "Comment deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_content_message() {
        let payload = CreateCommentRequest {
            content: "   ".into(),
        };
        let err: AppError = payload.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "Comment content is required");
    }

    #[test]
    fn test_update_blank_content_message() {
        let payload = UpdateCommentRequest { content: "".into() };
        let err: AppError = payload.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "content cannot be empty");
    }

    #[test]
    fn test_valid_content_passes() {
        let payload = CreateCommentRequest {
            content: "nice video".into(),
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_comment_response_field_names() {
        let owner = OwnerInfo {
            id: Uuid::new_v4(),
            username: "alice".into(),
            avatar: "a.png".into(),
        };
        let response = CommentResponse {
            id: Uuid::new_v4(),
            content: "hello".into(),
            video_id: Uuid::new_v4(),
            owner,
            likes: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("videoId").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["owner"]["username"], "alice");
    }
}
