/// Profile handlers - an author's page: their posts and the follow flag
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::{Post, User};
use crate::services::{FeedFilter, FollowService, PageInfo};

use super::feed::{FeedHandlerState, PageParams};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub author: User,
    pub posts: Vec<Post>,
    pub page: PageInfo,
    /// Whether the requesting user follows this author. Always false for
    /// anonymous viewers and for authors looking at themselves.
    pub following: bool,
}

pub async fn get_profile(
    pool: web::Data<PgPool>,
    state: web::Data<FeedHandlerState>,
    username: web::Path<String>,
    query: web::Query<PageParams>,
    viewer: Option<UserId>,
) -> Result<HttpResponse> {
    let author = user_repo::find_by_username(&pool, &username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", username)))?;

    let feed = state
        .feed
        .get_feed(&FeedFilter::Author(username.into_inner()), query.page)
        .await?;

    let following = match viewer {
        Some(viewer) => {
            FollowService::new((**pool).clone())
                .is_following(viewer.0, author.id)
                .await?
        }
        None => false,
    };

    Ok(HttpResponse::Ok().json(ProfileResponse {
        author,
        posts: feed.posts,
        page: feed.page,
        following,
    }))
}
