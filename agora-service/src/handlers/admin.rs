/// Operational endpoints. Mounted under /internal, outside the public API.
use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::cache::FeedCache;
use crate::error::Result;

/// Drop all cached global-feed pages. Used by ops tooling and tests;
/// request handlers never call this, the cache expires by TTL only.
pub async fn purge_feed_cache(cache: web::Data<Arc<FeedCache>>) -> Result<HttpResponse> {
    let purged = cache.clear().await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "purged": purged })))
}
