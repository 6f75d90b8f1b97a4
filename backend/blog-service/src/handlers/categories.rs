/// Category feed handler
use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::handlers::PageQuery;
use crate::services::PostService;
use crate::validators;

/// List the visible posts of a published category, resolved by slug.
/// A hidden or unknown category answers 404 either way.
pub async fn category_feed(
    pool: web::Data<PgPool>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    // A slug that doesn't match the allowed shape cannot name a category.
    if !validators::validate_slug(&slug) {
        return Err(AppError::NotFound(format!("category '{slug}' not found")));
    }

    let service = PostService::new((**pool).clone());
    let feed = service
        .category_feed(&slug, Utc::now(), query.page())
        .await?;

    Ok(HttpResponse::Ok().json(feed))
}
