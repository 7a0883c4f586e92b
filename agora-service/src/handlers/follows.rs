/// Follow handlers - the social graph's HTTP surface
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::services::FollowService;

/// Follow an author. Following yourself is accepted and does nothing.
pub async fn follow_profile(
    pool: web::Data<PgPool>,
    user: UserId,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let author = user_repo::find_by_username(&pool, &username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", username)))?;

    FollowService::new((**pool).clone())
        .follow(user.0, author.id)
        .await?;

    Ok(HttpResponse::Ok().finish())
}

/// Unfollow an author; 404 if no relation existed.
pub async fn unfollow_profile(
    pool: web::Data<PgPool>,
    user: UserId,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let author = user_repo::find_by_username(&pool, &username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", username)))?;

    FollowService::new((**pool).clone())
        .unfollow(user.0, author.id)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
