use redis::{aio::ConnectionManager, AsyncCommands, AsyncIter};
use std::time::Duration;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::services::feed::FeedPage;

/// Redis-backed response cache for the rendered global feed.
///
/// Only the All-filter feed is cached, one entry per page number, under a
/// fixed key namespace. Entries expire by TTL only; nothing on the write
/// path touches them, so readers can observe a feed up to one TTL stale.
/// `clear` exists for ops tooling and tests, never for request handlers.
#[derive(Clone)]
pub struct FeedCache {
    redis: ConnectionManager,
    ttl: Duration,
}

const KEY_PREFIX: &str = "feed:global:v1:";

impl FeedCache {
    pub fn new(redis: ConnectionManager, ttl_secs: u64) -> Self {
        Self {
            redis,
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    fn page_key(page: u32) -> String {
        format!("{}{}", KEY_PREFIX, page)
    }

    pub async fn read_page(&self, page: u32) -> Result<Option<FeedPage>> {
        let key = Self::page_key(page);
        let mut conn = self.redis.clone();

        match conn.get::<_, Option<String>>(&key).await? {
            Some(data) => {
                debug!(page, "feed cache HIT");
                let cached = serde_json::from_str::<FeedPage>(&data)
                    .map_err(|e| AppError::CacheError(format!("deserialization: {}", e)))?;
                Ok(Some(cached))
            }
            None => {
                debug!(page, "feed cache MISS");
                Ok(None)
            }
        }
    }

    pub async fn write_page(&self, page: u32, feed: &FeedPage) -> Result<()> {
        let key = Self::page_key(page);
        let data = serde_json::to_string(feed)
            .map_err(|e| AppError::CacheError(format!("serialization: {}", e)))?;

        let mut conn = self.redis.clone();
        conn.set_ex::<_, _, ()>(&key, data, self.ttl.as_secs())
            .await?;

        debug!(page, ttl_secs = self.ttl.as_secs(), "feed cache WRITE");
        Ok(())
    }

    /// Drop every cached feed page. Returns the number of entries removed.
    pub async fn clear(&self) -> Result<u64> {
        let pattern = format!("{}*", KEY_PREFIX);

        let mut scan_conn = self.redis.clone();
        let mut keys: Vec<String> = Vec::new();
        {
            let mut iter: AsyncIter<'_, String> = scan_conn.scan_match(&pattern).await?;
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
        }

        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.redis.clone();
        let removed: u64 = conn.del(&keys).await?;

        debug!(removed, "feed cache CLEAR");
        Ok(removed)
    }
}
