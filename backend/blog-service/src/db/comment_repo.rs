use crate::models::{Comment, CommentRecord};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new comment on a post
pub async fn create_comment(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    body: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (body, post_id, author_id)
        VALUES ($1, $2, $3)
        RETURNING id, body, post_id, author_id, created_at
        "#,
    )
    .bind(body)
    .bind(post_id)
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// All comments under a post, oldest first, with author usernames
pub async fn comments_for_post(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Vec<CommentRecord>, sqlx::Error> {
    let comments = sqlx::query_as::<_, CommentRecord>(
        r#"
        SELECT cm.id, cm.body, cm.post_id, cm.author_id,
               u.username AS author_username,
               cm.created_at
        FROM comments cm
        JOIN users u ON u.id = cm.author_id
        WHERE cm.post_id = $1
        ORDER BY cm.created_at ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Find a comment by ID scoped to its post. A comment reached through the
/// wrong post URL does not exist as far as the caller is concerned.
pub async fn find_comment_in_post(
    pool: &PgPool,
    comment_id: Uuid,
    post_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, body, post_id, author_id, created_at
        FROM comments
        WHERE id = $1 AND post_id = $2
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Update comment body
pub async fn update_comment(
    pool: &PgPool,
    comment_id: Uuid,
    body: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET body = $1
        WHERE id = $2
        RETURNING id, body, post_id, author_id, created_at
        "#,
    )
    .bind(body)
    .bind(comment_id)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Delete a comment
pub async fn delete_comment(pool: &PgPool, comment_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
