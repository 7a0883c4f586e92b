use crate::models::Follow;
use sqlx::PgPool;
use uuid::Uuid;

/// Idempotent create follow; returns the new edge, or None if it already
/// existed. The unique_follow constraint resolves concurrent duplicate
/// inserts, so no application-level locking is needed.
pub async fn create_follow(
    pool: &PgPool,
    follower_id: Uuid,
    author_id: Uuid,
) -> Result<Option<Follow>, sqlx::Error> {
    let inserted = sqlx::query_as::<_, Follow>(
        r#"
        INSERT INTO follows (follower_id, author_id)
        VALUES ($1, $2)
        ON CONFLICT (follower_id, author_id) DO NOTHING
        RETURNING id, follower_id, author_id, created_at
        "#,
    )
    .bind(follower_id)
    .bind(author_id)
    .fetch_optional(pool)
    .await?;

    Ok(inserted)
}

/// Delete a follow edge; returns true if a row was removed.
pub async fn delete_follow(
    pool: &PgPool,
    follower_id: Uuid,
    author_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        DELETE FROM follows
        WHERE follower_id = $1 AND author_id = $2
        "#,
    )
    .bind(follower_id)
    .bind(author_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

/// Check whether a follow edge exists
pub async fn follow_exists(
    pool: &PgPool,
    follower_id: Uuid,
    author_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM follows
            WHERE follower_id = $1 AND author_id = $2
        )
        "#,
    )
    .bind(follower_id)
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}
