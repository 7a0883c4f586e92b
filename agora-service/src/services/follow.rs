use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::db::follow_repo;
use crate::error::{AppError, Result};

/// Social graph operations: follow, unfollow, is-following.
#[derive(Clone)]
pub struct FollowService {
    pool: PgPool,
}

impl FollowService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a follow edge if absent. A self-follow is a silent no-op;
    /// a duplicate follow is absorbed by the unique constraint. Idempotent
    /// either way: calling twice leaves exactly one edge.
    pub async fn follow(&self, follower_id: Uuid, author_id: Uuid) -> Result<()> {
        if follower_id == author_id {
            debug!(%follower_id, "ignoring self-follow");
            return Ok(());
        }

        let edge = follow_repo::create_follow(&self.pool, follower_id, author_id).await?;
        debug!(%follower_id, %author_id, inserted = edge.is_some(), "follow");
        Ok(())
    }

    /// Remove a follow edge. The caller expects an existing relation, so a
    /// missing edge is a NotFound, not a silent no-op.
    pub async fn unfollow(&self, follower_id: Uuid, author_id: Uuid) -> Result<()> {
        let removed = follow_repo::delete_follow(&self.pool, follower_id, author_id).await?;
        if !removed {
            return Err(AppError::NotFound("follow relation".to_string()));
        }
        debug!(%follower_id, %author_id, "unfollow");
        Ok(())
    }

    /// True iff a follow edge exists. Always false for self.
    pub async fn is_following(&self, follower_id: Uuid, author_id: Uuid) -> Result<bool> {
        if follower_id == author_id {
            return Ok(false);
        }

        Ok(follow_repo::follow_exists(&self.pool, follower_id, author_id).await?)
    }
}
