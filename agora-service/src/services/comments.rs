use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::Comment;

use super::pagination::{page_offset, PageInfo};

pub struct CommentService {
    pool: PgPool,
    page_size: u32,
}

impl CommentService {
    pub fn new(pool: PgPool, page_size: u32) -> Self {
        Self { pool, page_size }
    }

    /// Add a comment to an existing post
    pub async fn add_comment(&self, post_id: Uuid, author_id: Uuid, text: &str) -> Result<Comment> {
        if post_repo::find_post_by_id(&self.pool, post_id).await?.is_none() {
            return Err(AppError::NotFound(format!("post {}", post_id)));
        }

        Ok(comment_repo::create_comment(&self.pool, post_id, author_id, text).await?)
    }

    /// One page of a post's comments, newest first
    pub async fn get_post_comments(
        &self,
        post_id: Uuid,
        page: u32,
    ) -> Result<(Vec<Comment>, PageInfo)> {
        if post_repo::find_post_by_id(&self.pool, post_id).await?.is_none() {
            return Err(AppError::NotFound(format!("post {}", post_id)));
        }

        let total = comment_repo::count_by_post(&self.pool, post_id).await?;
        let comments = comment_repo::find_by_post(
            &self.pool,
            post_id,
            i64::from(self.page_size),
            page_offset(page, self.page_size),
        )
        .await?;

        Ok((comments, PageInfo::new(total as u64, self.page_size, page)))
    }
}
