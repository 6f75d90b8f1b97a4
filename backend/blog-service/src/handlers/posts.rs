/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::handlers::redirect_to_post;
use crate::middleware::UserId;
use crate::models::{NewPost, PostChanges};
use crate::services::{PostService, WriteOutcome};
use crate::validators;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
    /// May be in the future for scheduled publication
    pub pub_date: DateTime<Utc>,
    pub location_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub is_published: Option<bool>,
    pub image_key: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub pub_date: Option<DateTime<Utc>>,
    pub location_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub is_published: Option<bool>,
    pub image_key: Option<String>,
}

fn validate_create(req: &CreatePostRequest) -> Result<()> {
    if req.title.len() > 256 {
        return Err(AppError::Validation("title longer than 256 characters".to_string()));
    }
    validators::validate_post_title(&req.title)
        .map_err(|_| AppError::Validation("title must not be blank".to_string()))?;
    validators::validate_body(&req.body)
        .map_err(|_| AppError::Validation("body must not be blank".to_string()))?;
    Ok(())
}

fn validate_update(req: &UpdatePostRequest) -> Result<()> {
    if let Some(title) = &req.title {
        if title.len() > 256 {
            return Err(AppError::Validation("title longer than 256 characters".to_string()));
        }
        validators::validate_post_title(title)
            .map_err(|_| AppError::Validation("title must not be blank".to_string()))?;
    }
    if let Some(body) = &req.body {
        validators::validate_body(body)
            .map_err(|_| AppError::Validation("body must not be blank".to_string()))?;
    }
    Ok(())
}

/// Create a new post authored by the authenticated viewer
pub async fn create_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    validate_create(&req)?;

    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(
            user_id.0,
            NewPost {
                title: req.title,
                body: req.body,
                pub_date: req.pub_date,
                location_id: req.location_id,
                category_id: req.category_id,
                is_published: req.is_published.unwrap_or(true),
                image_key: req.image_key,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// Get a post with its comment thread. Hidden posts 404 unless the
/// viewer is the author.
pub async fn get_post(
    pool: web::Data<PgPool>,
    viewer: Option<UserId>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let detail = service
        .post_detail(viewer.map(|u| u.0), *post_id, Utc::now())
        .await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// Edit a post. Non-authors are redirected to the detail view.
pub async fn update_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    validate_update(&req)?;

    let service = PostService::new((**pool).clone());
    let outcome = service
        .update_post(
            user_id.0,
            *post_id,
            PostChanges {
                title: req.title,
                body: req.body,
                pub_date: req.pub_date,
                location_id: req.location_id,
                category_id: req.category_id,
                is_published: req.is_published,
                image_key: req.image_key,
            },
        )
        .await?;

    match outcome {
        WriteOutcome::Applied(post) => Ok(HttpResponse::Ok().json(post)),
        WriteOutcome::NotOwner => Ok(redirect_to_post(*post_id)),
    }
}

/// Delete a post. Non-authors are redirected to the detail view.
pub async fn delete_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let outcome = service.delete_post(user_id.0, *post_id).await?;

    match outcome {
        WriteOutcome::Applied(()) => Ok(HttpResponse::NoContent().finish()),
        WriteOutcome::NotOwner => Ok(redirect_to_post(*post_id)),
    }
}
