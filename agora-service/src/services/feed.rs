/// Feed assembly - ordered, paginated post sequences under a filter
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cache::FeedCache;
use crate::db::{group_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::Post;

use super::pagination::{page_offset, PageInfo};

/// Which slice of the post store a feed is assembled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedFilter {
    /// Every post
    All,
    /// Posts published into the group with this slug
    Group(String),
    /// Posts written by the author with this username
    Author(String),
    /// Posts whose author has an incoming follow edge from this user
    Following(Uuid),
}

/// One assembled feed page. This is also the cached representation of the
/// global feed, serialized as-is into Redis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    pub page: PageInfo,
}

pub struct FeedService {
    pool: PgPool,
    cache: Option<Arc<FeedCache>>,
    page_size: u32,
}

impl FeedService {
    pub fn new(pool: PgPool, page_size: u32) -> Self {
        Self {
            pool,
            cache: None,
            page_size,
        }
    }

    pub fn with_cache(pool: PgPool, cache: Arc<FeedCache>, page_size: u32) -> Self {
        Self {
            pool,
            cache: Some(cache),
            page_size,
        }
    }

    /// Assemble one feed page. Ordering is always newest-first; pages past
    /// the last are empty, not errors. Only the All filter flows through
    /// the response cache: a hit is served as-is, a miss is recomputed and
    /// written back with the configured TTL. Writes to the store never
    /// invalidate cached pages; readers can observe content up to one TTL
    /// old.
    pub async fn get_feed(&self, filter: &FeedFilter, page: u32) -> Result<FeedPage> {
        let page = page.max(1);

        let cache = match filter {
            FeedFilter::All => self.cache.as_ref(),
            _ => None,
        };

        if let Some(cache) = cache {
            match cache.read_page(page).await {
                Ok(Some(cached)) => return Ok(cached),
                Ok(None) => {}
                Err(e) => warn!("feed cache read failed, assembling from store: {}", e),
            }
        }

        let assembled = self.assemble(filter, page).await?;

        if let Some(cache) = cache {
            if let Err(e) = cache.write_page(page, &assembled).await {
                debug!("feed cache write failed: {}", e);
            }
        }

        Ok(assembled)
    }

    async fn assemble(&self, filter: &FeedFilter, page: u32) -> Result<FeedPage> {
        let limit = i64::from(self.page_size);
        let offset = page_offset(page, self.page_size);

        let (total, posts) = match filter {
            FeedFilter::All => {
                let total = post_repo::count_all(&self.pool).await?;
                let posts = post_repo::page_all(&self.pool, limit, offset).await?;
                (total, posts)
            }
            FeedFilter::Group(slug) => {
                let group = group_repo::find_by_slug(&self.pool, slug)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("group {}", slug)))?;
                let total = post_repo::count_by_group(&self.pool, group.id).await?;
                let posts = post_repo::page_by_group(&self.pool, group.id, limit, offset).await?;
                (total, posts)
            }
            FeedFilter::Author(username) => {
                let author = user_repo::find_by_username(&self.pool, username)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("user {}", username)))?;
                let total = post_repo::count_by_author(&self.pool, author.id).await?;
                let posts = post_repo::page_by_author(&self.pool, author.id, limit, offset).await?;
                (total, posts)
            }
            FeedFilter::Following(user_id) => {
                let total = post_repo::count_followed(&self.pool, *user_id).await?;
                let posts = post_repo::page_followed(&self.pool, *user_id, limit, offset).await?;
                (total, posts)
            }
        };

        Ok(FeedPage {
            posts,
            page: PageInfo::new(total as u64, self.page_size, page),
        })
    }
}
