/// Profile handlers - author pages and their post feeds
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::handlers::PageQuery;
use crate::services::PostService;
use crate::validators;

/// Profile header: the user plus how many posts they have written
/// (hidden posts counted too; the profile shows everything).
pub async fn get_profile(pool: web::Data<PgPool>, username: web::Path<String>) -> Result<HttpResponse> {
    if !validators::validate_username(&username) {
        return Err(AppError::NotFound(format!("user '{username}' not found")));
    }

    let service = PostService::new((**pool).clone());
    let summary = service.profile_summary(&username).await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Every post by the named user, visibility flags ignored
pub async fn profile_feed(
    pool: web::Data<PgPool>,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    if !validators::validate_username(&username) {
        return Err(AppError::NotFound(format!("user '{username}' not found")));
    }

    let service = PostService::new((**pool).clone());
    let feed = service.profile_feed(&username, query.page()).await?;

    Ok(HttpResponse::Ok().json(feed))
}
