use actix_web::web;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::{tweet_repo, user_repo};
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::{OwnerInfo, Tweet};
use crate::response::{empty, ApiResponse};
use crate::validators;

// ============================================
// Request / Response Structs
// ============================================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTweetRequest {
    #[validate(custom(
        function = "crate::validators::not_blank",
        message = "Tweet content is required"
    ))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTweetRequest {
    #[serde(rename = "newContent")]
    #[validate(custom(
        function = "crate::validators::not_blank",
        message = "Content is required"
    ))]
    pub new_content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetResponse {
    pub id: Uuid,
    pub content: String,
    pub owner: OwnerInfo,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TweetResponse {
    fn from_tweet(tweet: Tweet, owner: OwnerInfo) -> Self {
        Self {
            id: tweet.id,
            content: tweet.content,
            owner,
            likes: tweet.likes,
            created_at: tweet.created_at,
            updated_at: tweet.updated_at,
        }
    }
}

// ============================================
// Handler Functions
// ============================================

/// Create a tweet
/// POST /api/v1/tweets
pub async fn create_tweet(
    user: UserId,
    pool: web::Data<PgPool>,
    payload: web::Json<CreateTweetRequest>,
) -> Result<ApiResponse<TweetResponse>> {
    payload.validate()?;

    let tweet = tweet_repo::create_tweet(&pool, user.0, &payload.content).await?;

    let owner = user_repo::find_owner_info(&pool, user.0)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    tracing::debug!("User {} created tweet {}", user.0, tweet.id);

    Ok(ApiResponse::created(
        TweetResponse::from_tweet(tweet, owner),
        "Tweet created successfully",
    ))
}

/// All tweets by a user, newest first, owner attached
/// GET /api/v1/tweets/user/{user_id}
pub async fn get_user_tweets(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<ApiResponse<Vec<TweetResponse>>> {
    let user_id = validators::parse_id(&path.into_inner(), "Invalid user id")?;

    if !user_repo::user_exists(&pool, user_id).await? {
        return Err(AppError::NotFound("User not found".into()));
    }

    let tweets = tweet_repo::get_tweets_by_user(&pool, user_id)
        .await?
        .into_iter()
        .map(|row| TweetResponse {
            id: row.id,
            content: row.content,
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

    Ok(ApiResponse::ok(tweets, "User tweets fetched successfully"))
}

/// Update a tweet's content (owner only)
/// PATCH /api/v1/tweets/{tweet_id}
pub async fn update_tweet(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    payload: web::Json<UpdateTweetRequest>,
) -> Result<ApiResponse<TweetResponse>> {
    let tweet_id = validators::parse_id(&path.into_inner(), "Invalid tweet id")?;
    payload.validate()?;

    let tweet = tweet_repo::find_tweet_by_id(&pool, tweet_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tweet not found".into()))?;

    if tweet.owner_id != user.0 {
        return Err(AppError::Forbidden(
            "You are not authorized to update this tweet".into(),
        ));
    }

    let updated = tweet_repo::update_tweet_content(&pool, tweet_id, &payload.new_content).await?;

    let owner = user_repo::find_owner_info(&pool, user.0)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(ApiResponse::ok(
        TweetResponse::from_tweet(updated, owner),
        "Successfully updated the tweet",
    ))
}

/// Delete a tweet and every like referencing it (owner only)
/// DELETE /api/v1/tweets/{tweet_id}
pub async fn delete_tweet(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<ApiResponse<serde_json::Value>> {
    let tweet_id = validators::parse_id(&path.into_inner(), "Invalid tweet id")?;

    let tweet = tweet_repo::find_tweet_by_id(&pool, tweet_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tweet not found".into()))?;

    if tweet.owner_id != user.0 {
        return Err(AppError::Forbidden(
            "You are not authorized to delete this tweet".into(),
        ));
    }

    tweet_repo::delete_tweet_with_likes(&pool, tweet_id).await?;

    tracing::info!("User {} deleted tweet {}", user.0, tweet_id);

    Ok(ApiResponse::ok(empty(), "Successfully deleted the tweet"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_content_message() {
        let payload = CreateTweetRequest { content: " ".into() };
        let err: AppError = payload.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "Tweet content is required");
    }

    #[test]
    fn test_update_payload_wire_name() {
        let payload: UpdateTweetRequest =
            serde_json::from_value(serde_json::json!({ "newContent": "edited" })).unwrap();
        assert_eq!(payload.new_content, "edited");
        assert!(payload.validate().is_ok());
    }
}
