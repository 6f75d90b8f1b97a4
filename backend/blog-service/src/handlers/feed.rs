/// Global feed handler
use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::PgPool;

use crate::error::Result;
use crate::handlers::PageQuery;
use crate::services::PostService;

/// List publicly-visible posts, newest publication first, paginated.
/// The wall clock is read once per request and threaded through the
/// visibility evaluation.
pub async fn global_feed(
    pool: web::Data<PgPool>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let feed = service.global_feed(Utc::now(), query.page()).await?;

    Ok(HttpResponse::Ok().json(feed))
}
