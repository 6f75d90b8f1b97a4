/// HTTP handlers for blog endpoints
///
/// This module contains handlers for:
/// - Feed: the global feed of publicly-visible posts
/// - Posts: create, read, update, delete posts
/// - Comments: create, read, update, delete comments under a post
/// - Categories: per-category post feeds resolved by slug
/// - Profiles: per-author post feeds, hidden posts included
pub mod categories;
pub mod comments;
pub mod feed;
pub mod posts;
pub mod profiles;

// Re-export handler functions at module level
pub use categories::category_feed;
pub use comments::{create_comment, delete_comment, list_comments, update_comment};
pub use feed::global_feed;
pub use posts::{create_post, delete_post, get_post, update_post};
pub use profiles::{get_profile, profile_feed};

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

/// Pagination query parameters (1-based page number)
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

/// Redirect to a post's detail view. Used when a non-owner tries to edit
/// or delete: the request is answered with the detail location instead of
/// an explicit denial.
pub(crate) fn redirect_to_post(post_id: Uuid) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/api/v1/posts/{post_id}")))
        .finish()
}

/// Register all API routes. The caller wraps the enclosing scope with the
/// JWT middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/posts")
            .route(web::get().to(global_feed))
            .route(web::post().to(create_post)),
    )
    .service(
        web::resource("/posts/{post_id}")
            .route(web::get().to(get_post))
            .route(web::patch().to(update_post))
            .route(web::delete().to(delete_post)),
    )
    .service(
        web::resource("/posts/{post_id}/comments")
            .route(web::get().to(list_comments))
            .route(web::post().to(create_comment)),
    )
    .service(
        web::resource("/posts/{post_id}/comments/{comment_id}")
            .route(web::patch().to(update_comment))
            .route(web::delete().to(delete_comment)),
    )
    .service(web::resource("/categories/{slug}/posts").route(web::get().to(category_feed)))
    .service(web::resource("/profiles/{username}").route(web::get().to(get_profile)))
    .service(web::resource("/profiles/{username}/posts").route(web::get().to(profile_feed)));
}
