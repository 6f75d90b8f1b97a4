/// Comment handlers - HTTP endpoints for comment operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::handlers::redirect_to_post;
use crate::middleware::UserId;
use crate::services::{CommentService, WriteOutcome};
use crate::validators;

/// Request body for creating or editing a comment
#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub body: String,
}

fn validate(req: &CommentBody) -> Result<()> {
    validators::validate_body(&req.body)
        .map_err(|_| AppError::Validation("comment must not be blank".to_string()))
}

/// Create a comment on a post
pub async fn create_comment(
    pool: web::Data<PgPool>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
    req: web::Json<CommentBody>,
) -> Result<HttpResponse> {
    validate(&req)?;

    let service = CommentService::new((**pool).clone());
    let comment = service.create_comment(user_id.0, *post_id, &req.body).await?;

    Ok(HttpResponse::Created().json(comment))
}

/// List a post's comments, oldest first
pub async fn list_comments(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comments = service.comments_for_post(*post_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Edit a comment. Non-authors are redirected to the post's detail view.
pub async fn update_comment(
    pool: web::Data<PgPool>,
    user_id: UserId,
    path: web::Path<(Uuid, Uuid)>,
    req: web::Json<CommentBody>,
) -> Result<HttpResponse> {
    validate(&req)?;

    let (post_id, comment_id) = path.into_inner();
    let service = CommentService::new((**pool).clone());
    let outcome = service
        .update_comment(user_id.0, post_id, comment_id, &req.body)
        .await?;

    match outcome {
        WriteOutcome::Applied(comment) => Ok(HttpResponse::Ok().json(comment)),
        WriteOutcome::NotOwner => Ok(redirect_to_post(post_id)),
    }
}

/// Delete a comment. Non-authors are redirected to the post's detail view.
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    user_id: UserId,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let service = CommentService::new((**pool).clone());
    let outcome = service.delete_comment(user_id.0, post_id, comment_id).await?;

    match outcome {
        WriteOutcome::Applied(()) => Ok(HttpResponse::NoContent().finish()),
        WriteOutcome::NotOwner => Ok(redirect_to_post(post_id)),
    }
}
