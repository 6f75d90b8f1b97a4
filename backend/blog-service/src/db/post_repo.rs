use crate::models::{NewPost, Post, PostChanges, PostRecord};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Create a new post owned by `author_id`
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    new: &NewPost,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (title, body, pub_date, author_id, location_id, category_id, is_published, image_key)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, title, body, pub_date, author_id, location_id, category_id, is_published, image_key, created_at
        "#,
    )
    .bind(&new.title)
    .bind(&new.body)
    .bind(new.pub_date)
    .bind(author_id)
    .bind(new.location_id)
    .bind(new.category_id)
    .bind(new.is_published)
    .bind(new.image_key.as_deref())
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post row by ID (no joins; used for ownership checks)
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, body, pub_date, author_id, location_id, category_id, is_published, image_key, created_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Find the joined projection of a post (author, category, location,
/// comment count). Visibility is NOT applied here; the caller evaluates
/// the policy against the returned record.
pub async fn find_post_record(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Option<PostRecord>, sqlx::Error> {
    let record = sqlx::query_as::<_, PostRecord>(
        r#"
        SELECT p.id, p.title, p.body, p.pub_date, p.author_id,
               u.username AS author_username,
               p.location_id, l.name AS location_name,
               p.category_id, c.title AS category_title, c.slug AS category_slug,
               c.is_published AS category_is_published,
               p.is_published, p.image_key, p.created_at,
               (SELECT COUNT(*) FROM comments cm WHERE cm.post_id = p.id) AS comment_count
        FROM posts p
        JOIN users u ON u.id = p.author_id
        LEFT JOIN locations l ON l.id = p.location_id
        LEFT JOIN categories c ON c.id = p.category_id
        WHERE p.id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// One page of publicly-visible posts, newest publication first.
///
/// The WHERE clause is the SQL rendering of the anonymous branch of
/// `policy::can_view`: published, publication date passed, category
/// published or absent.
pub async fn visible_posts_page(
    pool: &PgPool,
    now: DateTime<Utc>,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostRecord>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostRecord>(
        r#"
        SELECT p.id, p.title, p.body, p.pub_date, p.author_id,
               u.username AS author_username,
               p.location_id, l.name AS location_name,
               p.category_id, c.title AS category_title, c.slug AS category_slug,
               c.is_published AS category_is_published,
               p.is_published, p.image_key, p.created_at,
               (SELECT COUNT(*) FROM comments cm WHERE cm.post_id = p.id) AS comment_count
        FROM posts p
        JOIN users u ON u.id = p.author_id
        LEFT JOIN locations l ON l.id = p.location_id
        LEFT JOIN categories c ON c.id = p.category_id
        WHERE p.is_published
          AND p.pub_date <= $1
          AND (p.category_id IS NULL OR c.is_published)
        ORDER BY p.pub_date DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(now)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count publicly-visible posts
pub async fn count_visible_posts(pool: &PgPool, now: DateTime<Utc>) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS count
        FROM posts p
        LEFT JOIN categories c ON c.id = p.category_id
        WHERE p.is_published
          AND p.pub_date <= $1
          AND (p.category_id IS NULL OR c.is_published)
        "#,
    )
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count"))
}

/// One page of publicly-visible posts in a category, newest first
pub async fn visible_posts_in_category(
    pool: &PgPool,
    category_id: Uuid,
    now: DateTime<Utc>,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostRecord>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostRecord>(
        r#"
        SELECT p.id, p.title, p.body, p.pub_date, p.author_id,
               u.username AS author_username,
               p.location_id, l.name AS location_name,
               p.category_id, c.title AS category_title, c.slug AS category_slug,
               c.is_published AS category_is_published,
               p.is_published, p.image_key, p.created_at,
               (SELECT COUNT(*) FROM comments cm WHERE cm.post_id = p.id) AS comment_count
        FROM posts p
        JOIN users u ON u.id = p.author_id
        LEFT JOIN locations l ON l.id = p.location_id
        JOIN categories c ON c.id = p.category_id
        WHERE p.category_id = $1
          AND p.is_published
          AND p.pub_date <= $2
        ORDER BY p.pub_date DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(category_id)
    .bind(now)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count publicly-visible posts in a category
pub async fn count_visible_posts_in_category(
    pool: &PgPool,
    category_id: Uuid,
    now: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS count
        FROM posts p
        WHERE p.category_id = $1 AND p.is_published AND p.pub_date <= $2
        "#,
    )
    .bind(category_id)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count"))
}

/// One page of ALL posts by an author, newest publication first.
///
/// Visibility flags are deliberately ignored: a profile feed shows
/// everything its owner wrote, scheduled and unpublished posts included.
pub async fn posts_by_author_page(
    pool: &PgPool,
    author_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostRecord>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostRecord>(
        r#"
        SELECT p.id, p.title, p.body, p.pub_date, p.author_id,
               u.username AS author_username,
               p.location_id, l.name AS location_name,
               p.category_id, c.title AS category_title, c.slug AS category_slug,
               c.is_published AS category_is_published,
               p.is_published, p.image_key, p.created_at,
               (SELECT COUNT(*) FROM comments cm WHERE cm.post_id = p.id) AS comment_count
        FROM posts p
        JOIN users u ON u.id = p.author_id
        LEFT JOIN locations l ON l.id = p.location_id
        LEFT JOIN categories c ON c.id = p.category_id
        WHERE p.author_id = $1
        ORDER BY p.pub_date DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(author_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count all posts by an author, hidden ones included
pub async fn count_posts_by_author(pool: &PgPool, author_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM posts WHERE author_id = $1")
        .bind(author_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Apply a partial update to a post. Absent fields keep their value.
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    changes: &PostChanges,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET title = COALESCE($1, title),
            body = COALESCE($2, body),
            pub_date = COALESCE($3, pub_date),
            location_id = COALESCE($4, location_id),
            category_id = COALESCE($5, category_id),
            is_published = COALESCE($6, is_published),
            image_key = COALESCE($7, image_key)
        WHERE id = $8
        RETURNING id, title, body, pub_date, author_id, location_id, category_id, is_published, image_key, created_at
        "#,
    )
    .bind(changes.title.as_deref())
    .bind(changes.body.as_deref())
    .bind(changes.pub_date)
    .bind(changes.location_id)
    .bind(changes.category_id)
    .bind(changes.is_published)
    .bind(changes.image_key.as_deref())
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Delete a post. Comments cascade at the schema level.
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
