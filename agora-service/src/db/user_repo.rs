use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

/// Find a user by username
pub async fn find_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, display_name, created_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Find a user by ID
pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, display_name, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Insert a user row. User provisioning belongs to the identity service;
/// this exists for seeding and integration tests.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    display_name: Option<&str>,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, display_name)
        VALUES ($1, $2)
        RETURNING id, username, display_name, created_at
        "#,
    )
    .bind(username)
    .bind(display_name)
    .fetch_one(pool)
    .await?;

    Ok(user)
}
