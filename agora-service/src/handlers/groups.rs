/// Group handlers - group administration and the per-group feed
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::db::group_repo;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::{Group, Post};
use crate::services::{FeedFilter, PageInfo};

use super::feed::{FeedHandlerState, PageParams};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 64, message = "must be 1-64 characters"))]
    pub slug: String,
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct GroupFeedResponse {
    pub group: Group,
    pub posts: Vec<Post>,
    pub page: PageInfo,
}

/// Create a group. Identity is human-chosen: the slug is picked up front
/// and stays stable afterwards.
pub async fn create_group(
    pool: web::Data<PgPool>,
    _user: UserId,
    req: web::Json<CreateGroupRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    if group_repo::find_by_slug(&pool, &req.slug).await?.is_some() {
        return Err(AppError::Conflict(format!("group {}", req.slug)));
    }

    let group = group_repo::create_group(&pool, &req.slug, &req.title, &req.description).await?;
    Ok(HttpResponse::Created().json(group))
}

/// List all groups
pub async fn list_groups(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let groups = group_repo::list_groups(&pool).await?;
    Ok(HttpResponse::Ok().json(groups))
}

/// A group plus one page of its feed; unknown slugs are 404s, never empty
/// feeds.
pub async fn get_group(
    pool: web::Data<PgPool>,
    state: web::Data<FeedHandlerState>,
    slug: web::Path<String>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let group = group_repo::find_by_slug(&pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("group {}", slug)))?;

    let feed = state
        .feed
        .get_feed(&FeedFilter::Group(slug.into_inner()), query.page)
        .await?;

    Ok(HttpResponse::Ok().json(GroupFeedResponse {
        group,
        posts: feed.posts,
        page: feed.page,
    }))
}
