use crate::models::{OwnerInfo, User};
use sqlx::PgPool;
use uuid::Uuid;

/// Look up a full user row
pub async fn find_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, fullname, avatar, cover_image, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Public projection used to populate owners on created entities
pub async fn find_owner_info(pool: &PgPool, user_id: Uuid) -> Result<Option<OwnerInfo>, sqlx::Error> {
    let owner = sqlx::query_as::<_, OwnerInfo>(
        r#"
        SELECT id, username, avatar
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(owner)
}

/// Check that a user row exists without fetching it
pub async fn user_exists(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}
