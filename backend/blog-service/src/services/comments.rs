/// Comment service - comment creation, listing, and owner-gated writes
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentRecord};
use crate::policy;
use crate::services::WriteOutcome;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a comment on an existing post
    pub async fn create_comment(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        body: &str,
    ) -> Result<Comment> {
        if post_repo::find_post_by_id(&self.pool, post_id).await?.is_none() {
            return Err(AppError::NotFound(format!("post {post_id} not found")));
        }

        let comment = comment_repo::create_comment(&self.pool, post_id, author_id, body).await?;

        tracing::info!(comment_id = %comment.id, post_id = %post_id, "comment created");
        Ok(comment)
    }

    /// All comments under a post, oldest first
    pub async fn comments_for_post(&self, post_id: Uuid) -> Result<Vec<CommentRecord>> {
        if post_repo::find_post_by_id(&self.pool, post_id).await?.is_none() {
            return Err(AppError::NotFound(format!("post {post_id} not found")));
        }

        Ok(comment_repo::comments_for_post(&self.pool, post_id).await?)
    }

    /// Update a comment's body if `viewer` wrote it. The comment must
    /// belong to the named post; a mismatched pair is NotFound.
    pub async fn update_comment(
        &self,
        viewer: Uuid,
        post_id: Uuid,
        comment_id: Uuid,
        body: &str,
    ) -> Result<WriteOutcome<Comment>> {
        let comment = comment_repo::find_comment_in_post(&self.pool, comment_id, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("comment {comment_id} not found")))?;

        if !policy::can_modify(viewer, &comment) {
            return Ok(WriteOutcome::NotOwner);
        }

        let updated = comment_repo::update_comment(&self.pool, comment_id, body).await?;

        tracing::info!(comment_id = %comment_id, "comment updated");
        Ok(WriteOutcome::Applied(updated))
    }

    /// Delete a comment if `viewer` wrote it
    pub async fn delete_comment(
        &self,
        viewer: Uuid,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<WriteOutcome<()>> {
        let comment = comment_repo::find_comment_in_post(&self.pool, comment_id, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("comment {comment_id} not found")))?;

        if !policy::can_modify(viewer, &comment) {
            return Ok(WriteOutcome::NotOwner);
        }

        comment_repo::delete_comment(&self.pool, comment_id).await?;

        tracing::info!(comment_id = %comment_id, "comment deleted");
        Ok(WriteOutcome::Applied(()))
    }
}
