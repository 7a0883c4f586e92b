/// Post service - creation, retrieval, editing, deletion
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{group_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::Post;

/// Outcome of an edit attempt by an authenticated user.
pub enum EditOutcome {
    /// The caller owns the post; it was rewritten.
    Updated(Post),
    /// The caller is not the author. Callers redirect to the detail view
    /// instead of surfacing an error.
    NotAuthor,
}

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a post by ID
    pub async fn get_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        Ok(post_repo::find_post_by_id(&self.pool, post_id).await?)
    }

    /// Create a new post. A group reference must point at an existing
    /// group; a dangling one is a form error, not a 404.
    pub async fn create_post(
        &self,
        author_id: Uuid,
        text: &str,
        group_id: Option<Uuid>,
        image_key: Option<&str>,
    ) -> Result<Post> {
        self.check_group(group_id).await?;
        Ok(post_repo::create_post(&self.pool, author_id, text, group_id, image_key).await?)
    }

    /// Edit a post. Only the author may change it; anyone else gets
    /// `EditOutcome::NotAuthor` and no write happens.
    pub async fn update_post(
        &self,
        post_id: Uuid,
        editor_id: Uuid,
        text: &str,
        group_id: Option<Uuid>,
        image_key: Option<&str>,
    ) -> Result<EditOutcome> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

        if post.author_id != editor_id {
            return Ok(EditOutcome::NotAuthor);
        }

        self.check_group(group_id).await?;
        let updated =
            post_repo::update_post(&self.pool, post_id, text, group_id, image_key).await?;
        Ok(EditOutcome::Updated(updated))
    }

    /// Delete the caller's post; returns true if a row was removed.
    /// Comments and likes cascade at the storage layer.
    pub async fn delete_post(&self, post_id: Uuid, author_id: Uuid) -> Result<bool> {
        Ok(post_repo::delete_post(&self.pool, post_id, author_id).await?)
    }

    async fn check_group(&self, group_id: Option<Uuid>) -> Result<()> {
        if let Some(id) = group_id {
            if group_repo::find_by_id(&self.pool, id).await?.is_none() {
                return Err(AppError::ValidationError(format!("group: unknown group {}", id)));
            }
        }
        Ok(())
    }
}
