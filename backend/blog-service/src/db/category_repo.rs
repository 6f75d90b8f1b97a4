use crate::models::Category;
use sqlx::PgPool;
use uuid::Uuid;

/// Find a published category by slug. Hidden categories are treated as
/// absent, so callers surface the same 404 for both.
pub async fn find_published_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<Category>, sqlx::Error> {
    let category = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, title, description, slug, is_published, created_at
        FROM categories
        WHERE slug = $1 AND is_published
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

/// Find a category by ID regardless of its published flag
pub async fn find_by_id(pool: &PgPool, category_id: Uuid) -> Result<Option<Category>, sqlx::Error> {
    let category = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, title, description, slug, is_published, created_at
        FROM categories
        WHERE id = $1
        "#,
    )
    .bind(category_id)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

/// Delete a category. Posts referencing it keep existing with a nulled
/// category reference (schema-level SET NULL).
pub async fn delete_category(pool: &PgPool, category_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(category_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
