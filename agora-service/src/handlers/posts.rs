/// Post handlers - HTTP endpoints for post operations
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::db::{like_repo, user_repo};
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::{Comment, Post, User};
use crate::services::{CommentService, EditOutcome, PageInfo, PostService};

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub text: String,
    pub group_id: Option<Uuid>,
    /// Storage key of an already-uploaded image blob
    pub image_key: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post: Post,
    pub author: User,
    pub like_count: i64,
    pub comments: Vec<Comment>,
    pub comment_page: PageInfo,
}

/// Create a new post
pub async fn create_post(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(
            user.0,
            &req.text,
            req.group_id,
            req.image_key.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// A post with its like count and first page of comments
pub async fn get_post(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = match service.get_post(*post_id).await? {
        Some(post) => post,
        None => return Ok(HttpResponse::NotFound().finish()),
    };

    let author = user_repo::find_by_id(&pool, post.author_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("author missing for post {}", post.id)))?;
    let like_count = like_repo::count_for_post(&pool, post.id).await?;
    let (comments, comment_page) = CommentService::new((**pool).clone(), config.feed.page_size)
        .get_post_comments(post.id, 1)
        .await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post,
        author,
        like_count,
        comments,
        comment_page,
    }))
}

/// Edit a post. Authors get the updated post back; anyone else is sent to
/// the detail view with no error surfaced.
pub async fn update_post(
    pool: web::Data<PgPool>,
    user: UserId,
    post_id: web::Path<Uuid>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = PostService::new((**pool).clone());
    let outcome = service
        .update_post(
            *post_id,
            user.0,
            &req.text,
            req.group_id,
            req.image_key.as_deref(),
        )
        .await?;

    match outcome {
        EditOutcome::Updated(post) => Ok(HttpResponse::Ok().json(post)),
        EditOutcome::NotAuthor => Ok(HttpResponse::SeeOther()
            .insert_header((header::LOCATION, format!("/api/v1/posts/{}", post_id)))
            .finish()),
    }
}

/// Delete the caller's post
pub async fn delete_post(
    pool: web::Data<PgPool>,
    user: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let deleted = service.delete_post(*post_id, user.0).await?;

    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}
