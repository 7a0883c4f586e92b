use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::db::{like_repo, post_repo};
use crate::error::{AppError, Result};

/// Engagement operations: the like toggle.
#[derive(Clone)]
pub struct LikeService {
    pool: PgPool,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Flip the caller's membership in the post's liker set. The caller
    /// does not pick a target state; the current membership decides the
    /// branch. Read-then-write, so two concurrent toggles from the same
    /// user can land in either state (accepted best-effort semantics).
    pub async fn toggle_like(&self, user_id: Uuid, post_id: Uuid) -> Result<()> {
        if post_repo::find_post_by_id(&self.pool, post_id).await?.is_none() {
            return Err(AppError::NotFound(format!("post {}", post_id)));
        }

        if like_repo::check_user_liked(&self.pool, user_id, post_id).await? {
            like_repo::remove_like(&self.pool, user_id, post_id).await?;
            debug!(%user_id, %post_id, "unliked");
        } else {
            like_repo::add_like(&self.pool, user_id, post_id).await?;
            debug!(%user_id, %post_id, "liked");
        }

        Ok(())
    }
}
