/// Like handlers - the engagement toggle
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::LikeService;

/// Toggle the caller's like on a post. No target state in the request and
/// no state in the response; the toggle flips whatever is stored.
pub async fn toggle_like(
    pool: web::Data<PgPool>,
    user: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    LikeService::new((**pool).clone())
        .toggle_like(user.0, *post_id)
        .await?;

    Ok(HttpResponse::Ok().finish())
}
