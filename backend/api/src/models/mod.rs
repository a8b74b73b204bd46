use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User row (owned by the identity service; read-only here).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub fullname: String,
    pub avatar: String,
    pub cover_image: String,
    pub created_at: DateTime<Utc>,
}

/// Video row (owned by the media service; read-only here except for the
/// denormalized like counter).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Video {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub views: i64,
    pub likes: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub video_id: Uuid,
    pub owner_id: Uuid,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A like points at exactly one of video/comment/tweet (store-level CHECK).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Like {
    pub id: Uuid,
    pub video_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
    pub tweet_id: Option<Uuid>,
    pub liked_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Playlist {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subscription {
    pub id: Uuid,
    pub subscriber_id: Uuid,
    pub channel_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tweet {
    pub id: Uuid,
    pub content: String,
    pub owner_id: Uuid,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public projection attached wherever an entity is "populated" with its
/// owner (username + avatar only).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OwnerInfo {
    pub id: Uuid,
    pub username: String,
    pub avatar: String,
}

/// Wider public projection used on subscription edges.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileInfo {
    pub id: Uuid,
    pub username: String,
    pub avatar: String,
    pub fullname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_single_target() {
        let like = Like {
            id: Uuid::new_v4(),
            video_id: Some(Uuid::new_v4()),
            comment_id: None,
            tweet_id: None,
            liked_by: Uuid::new_v4(),
            created_at: Utc::now(),
        };
        let targets = [like.video_id, like.comment_id, like.tweet_id]
            .iter()
            .filter(|t| t.is_some())
            .count();
        assert_eq!(targets, 1);
    }
}
