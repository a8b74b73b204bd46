use actix_web::web;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{user_repo, SubscriptionRepository};
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::{OwnerInfo, ProfileInfo};
use crate::response::{empty, ApiResponse};
use crate::validators;

// ============================================
// Response Structs
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub id: Uuid,
    pub subscriber: OwnerInfo,
    pub channel: OwnerInfo,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberResponse {
    pub id: Uuid,
    pub subscriber: ProfileInfo,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedChannelResponse {
    pub id: Uuid,
    pub subscribed_to: ProfileInfo,
    pub created_at: DateTime<Utc>,
}

// ============================================
// Handler Functions
// ============================================

/// Toggle the current user's subscription to a channel
/// POST /api/v1/subscriptions/c/{channel_id}
pub async fn toggle_subscription(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<ApiResponse<serde_json::Value>> {
    let channel_id = validators::parse_id(&path.into_inner(), "Invalid channel id")?;

    let channel = user_repo::find_owner_info(&pool, channel_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Channel not found".into()))?;

    if channel_id == user.0 {
        return Err(AppError::Forbidden(
            "One cannot subscribe his own channel".into(),
        ));
    }

    match SubscriptionRepository::toggle(&pool, user.0, channel_id).await? {
        None => {
            tracing::debug!("User {} unsubscribed from channel {}", user.0, channel_id);
            Ok(ApiResponse::ok(empty(), "Unsubscribed to this channel"))
        }
        Some(subscription) => {
            let subscriber = user_repo::find_owner_info(&pool, user.0)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".into()))?;

            tracing::debug!("User {} subscribed to channel {}", user.0, channel_id);

            let response = SubscriptionResponse {
                id: subscription.id,
                subscriber,
                channel,
                created_at: subscription.created_at,
            };
            Ok(ApiResponse::created(
                serde_json::to_value(response)
                    .map_err(|e| AppError::Internal(e.to_string()))?,
                "Subscribed to this channel",
            ))
        }
    }
}

/// Subscribers of a channel; only the channel itself may ask
/// GET /api/v1/subscriptions/c/{channel_id}
pub async fn get_channel_subscribers(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<ApiResponse<Vec<SubscriberResponse>>> {
    let channel_id = validators::parse_id(&path.into_inner(), "Invalid channel id")?;

    if !user_repo::user_exists(&pool, channel_id).await? {
        return Err(AppError::NotFound("Channel not found".into()));
    }

    if channel_id != user.0 {
        return Err(AppError::Forbidden("Permission Denied".into()));
    }

    let subscribers = SubscriptionRepository::get_channel_subscribers(&pool, channel_id)
        .await?
        .into_iter()
        .map(|row| SubscriberResponse {
            id: row.id,
            subscriber: ProfileInfo {
                id: row.user_id,
                username: row.username,
                avatar: row.avatar,
                fullname: row.fullname,
            },
            created_at: row.created_at,
        })
        .collect();

    Ok(ApiResponse::ok(
        subscribers,
        "Subscribers fetched successfully",
    ))
}

/// Channels a user is subscribed to; only that user may ask
/// GET /api/v1/subscriptions/u/{subscriber_id}
pub async fn get_subscribed_channels(
    user: UserId,
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<ApiResponse<Vec<SubscribedChannelResponse>>> {
    let subscriber_id = validators::parse_id(&path.into_inner(), "Invalid subscriber id")?;

    if !user_repo::user_exists(&pool, subscriber_id).await? {
        return Err(AppError::NotFound("Subscriber not found".into()));
    }

    if subscriber_id != user.0 {
        return Err(AppError::Forbidden("Permission Denied".into()));
    }

    let channels = SubscriptionRepository::get_subscribed_channels(&pool, subscriber_id)
        .await?
        .into_iter()
        .map(|row| SubscribedChannelResponse {
            id: row.id,
            subscribed_to: ProfileInfo {
                id: row.user_id,
                username: row.username,
                avatar: row.avatar,
                fullname: row.fullname,
            },
            created_at: row.created_at,
        })
        .collect();

    Ok(ApiResponse::ok(
        channels,
        "Subscribed channels fetched successfully",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribed_channel_field_name() {
        let response = SubscribedChannelResponse {
            id: Uuid::new_v4(),
            subscribed_to: ProfileInfo {
                id: Uuid::new_v4(),
                username: "carol".into(),
                avatar: "c.png".into(),
                fullname: "Carol C".into(),
            },
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("subscribedTo").is_some());
        assert_eq!(json["subscribedTo"]["fullname"], "Carol C");
    }
}
