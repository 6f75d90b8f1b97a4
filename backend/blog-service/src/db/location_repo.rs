use crate::models::Location;
use sqlx::PgPool;
use uuid::Uuid;

/// Find a location by ID regardless of its published flag
pub async fn find_by_id(pool: &PgPool, location_id: Uuid) -> Result<Option<Location>, sqlx::Error> {
    let location = sqlx::query_as::<_, Location>(
        r#"
        SELECT id, name, is_published, created_at
        FROM locations
        WHERE id = $1
        "#,
    )
    .bind(location_id)
    .fetch_optional(pool)
    .await?;

    Ok(location)
}

/// Delete a location. Posts referencing it keep existing with a nulled
/// location reference (schema-level SET NULL).
pub async fn delete_location(pool: &PgPool, location_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM locations WHERE id = $1")
        .bind(location_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
