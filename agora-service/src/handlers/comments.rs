/// Comment handlers - HTTP endpoints for comment operations
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::error::Result;
use crate::middleware::UserId;
use crate::models::Comment;
use crate::services::{CommentService, PageInfo};

use super::feed::PageParams;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<Comment>,
    pub page: PageInfo,
}

/// Add a comment to a post
pub async fn add_comment(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    user: UserId,
    post_id: web::Path<Uuid>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = CommentService::new((**pool).clone(), config.feed.page_size);
    let comment = service.add_comment(*post_id, user.0, &req.text).await?;

    Ok(HttpResponse::Created().json(comment))
}

/// One page of a post's comments
pub async fn get_post_comments(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    post_id: web::Path<Uuid>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone(), config.feed.page_size);
    let (comments, page) = service.get_post_comments(*post_id, query.page).await?;

    Ok(HttpResponse::Ok().json(CommentListResponse { comments, page }))
}
