/// Feed handlers - paginated post listings
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::{FeedFilter, FeedService};

/// Page selector shared by every paginated endpoint
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

pub struct FeedHandlerState {
    pub feed: Arc<FeedService>,
}

/// Global feed, served through the response cache
pub async fn global_feed(
    state: web::Data<FeedHandlerState>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let feed = state.feed.get_feed(&FeedFilter::All, query.page).await?;
    Ok(HttpResponse::Ok().json(feed))
}

/// Posts by authors the caller follows
pub async fn following_feed(
    state: web::Data<FeedHandlerState>,
    user: UserId,
    query: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let feed = state
        .feed
        .get_feed(&FeedFilter::Following(user.0), query.page)
        .await?;
    Ok(HttpResponse::Ok().json(feed))
}
