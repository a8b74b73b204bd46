/// Subscription edge repository (subscriber -> channel)
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::Subscription;

const SUBSCRIPTION_COLUMNS: &str = "id, subscriber_id, channel_id, created_at";

/// A subscription edge joined onto one side's public profile.
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionProfileRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub username: String,
    pub avatar: String,
    pub fullname: String,
}

pub struct SubscriptionRepository;

impl SubscriptionRepository {
    /// Flip the subscription state for a (subscriber, channel) pair.
    /// Returns the created edge, or None when an existing edge was removed.
    /// The unique pair constraint makes the insert race-free.
    pub async fn toggle(
        pool: &PgPool,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> Result<Option<Subscription>> {
        let removed = sqlx::query(
            "DELETE FROM subscriptions WHERE subscriber_id = $1 AND channel_id = $2",
        )
        .bind(subscriber_id)
        .bind(channel_id)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete subscription: {}", e);
            AppError::Database(e)
        })?
        .rows_affected();

        if removed > 0 {
            return Ok(None);
        }

        let subscription = sqlx::query_as::<_, Subscription>(&format!(
            r#"
            INSERT INTO subscriptions (subscriber_id, channel_id)
            VALUES ($1, $2)
            ON CONFLICT (subscriber_id, channel_id) DO NOTHING
            RETURNING {}
            "#,
            SUBSCRIPTION_COLUMNS
        ))
        .bind(subscriber_id)
        .bind(channel_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create subscription: {}", e);
            AppError::Database(e)
        })?;

        match subscription {
            Some(subscription) => Ok(Some(subscription)),
            None => {
                // Concurrent duplicate subscribe: surface the existing edge.
                tracing::warn!(
                    "Subscription already exists: {} -> {}",
                    subscriber_id,
                    channel_id
                );
                let existing = sqlx::query_as::<_, Subscription>(&format!(
                    "SELECT {} FROM subscriptions WHERE subscriber_id = $1 AND channel_id = $2",
                    SUBSCRIPTION_COLUMNS
                ))
                .bind(subscriber_id)
                .bind(channel_id)
                .fetch_one(pool)
                .await
                .map_err(AppError::Database)?;
                Ok(Some(existing))
            }
        }
    }

    /// Subscribers of a channel with their public profiles, newest first.
    /// Single join query, one read snapshot.
    pub async fn get_channel_subscribers(
        pool: &PgPool,
        channel_id: Uuid,
    ) -> Result<Vec<SubscriptionProfileRow>> {
        let rows = sqlx::query_as::<_, SubscriptionProfileRow>(
            r#"
            SELECT s.id, s.created_at,
                   u.id AS user_id, u.username, u.avatar, u.fullname
            FROM subscriptions s
            JOIN users u ON u.id = s.subscriber_id
            WHERE s.channel_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(channel_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch channel subscribers: {}", e);
            AppError::Database(e)
        })?;

        Ok(rows)
    }

    /// Channels a user is subscribed to, with profiles, newest first
    pub async fn get_subscribed_channels(
        pool: &PgPool,
        subscriber_id: Uuid,
    ) -> Result<Vec<SubscriptionProfileRow>> {
        let rows = sqlx::query_as::<_, SubscriptionProfileRow>(
            r#"
            SELECT s.id, s.created_at,
                   u.id AS user_id, u.username, u.avatar, u.fullname
            FROM subscriptions s
            JOIN users u ON u.id = s.channel_id
            WHERE s.subscriber_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(subscriber_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch subscribed channels: {}", e);
            AppError::Database(e)
        })?;

        Ok(rows)
    }
}
