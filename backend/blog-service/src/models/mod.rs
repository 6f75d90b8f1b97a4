/// Data models for blog-service
///
/// Row types mirror the tables created by `migrations/` and derive
/// `sqlx::FromRow` so repositories can map them directly. `PostRecord` and
/// `CommentRecord` are the joined projections used by feeds and detail
/// views; they carry the display fields (author username, category title,
/// location name) plus the related-comment count annotation.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User row. Users are owned by the identity service; blog-service keeps
/// only what it needs as a foreign-key target and for username lookup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Post row as stored. `pub_date` may be in the future for scheduled
/// publication; the visibility policy compares it against the request
/// clock.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub location_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub is_published: bool,
    pub image_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub body: String,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Joined post projection for feeds and the detail view.
///
/// `category_is_published` is `None` when the post has no category; the
/// visibility policy treats that as published.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PostRecord {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub author_username: String,
    pub location_id: Option<Uuid>,
    pub location_name: Option<String>,
    pub category_id: Option<Uuid>,
    pub category_title: Option<String>,
    pub category_slug: Option<String>,
    pub category_is_published: Option<bool>,
    pub is_published: bool,
    pub image_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub comment_count: i64,
}

/// Comment joined with its author's username, as rendered under a post.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentRecord {
    pub id: Uuid,
    pub body: String,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating a post. The author is never taken from
/// the payload; it is the authenticated viewer.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub pub_date: DateTime<Utc>,
    pub location_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub is_published: bool,
    pub image_key: Option<String>,
}

/// Partial update for a post; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub pub_date: Option<DateTime<Utc>>,
    pub location_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub is_published: Option<bool>,
    pub image_key: Option<String>,
}
