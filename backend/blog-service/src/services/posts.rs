/// Post service - feeds, detail lookup, and owner-gated writes
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{category_repo, comment_repo, location_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Category, CommentRecord, NewPost, Post, PostChanges, PostRecord, User};
use crate::policy;
use crate::services::{has_more, page_bounds, FeedPage, WriteOutcome};

/// Post detail plus its comment thread, oldest comment first
#[derive(Debug, Serialize)]
pub struct PostDetail {
    pub post: PostRecord,
    pub comments: Vec<CommentRecord>,
}

/// Category feed: the category header and one page of its visible posts
#[derive(Debug, Serialize)]
pub struct CategoryFeed {
    pub category: Category,
    #[serde(flatten)]
    pub feed: FeedPage,
}

/// Profile feed: the profile header and one page of everything they wrote
#[derive(Debug, Serialize)]
pub struct ProfileFeed {
    pub profile: User,
    #[serde(flatten)]
    pub feed: FeedPage,
}

/// Profile header with the author's total post count, hidden posts
/// included
#[derive(Debug, Serialize)]
pub struct ProfileSummary {
    pub profile: User,
    pub post_count: i64,
}

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Global feed: publicly-visible posts, newest publication first
    pub async fn global_feed(&self, now: DateTime<Utc>, page: u32) -> Result<FeedPage> {
        let (limit, offset) = page_bounds(page);
        let posts = post_repo::visible_posts_page(&self.pool, now, limit, offset).await?;
        let total_count = post_repo::count_visible_posts(&self.pool, now).await?;

        Ok(FeedPage {
            posts,
            page: page.max(1),
            total_count,
            has_more: has_more(page, total_count),
        })
    }

    /// Category feed. The category must exist and be published; a hidden
    /// category is indistinguishable from a missing one.
    pub async fn category_feed(
        &self,
        slug: &str,
        now: DateTime<Utc>,
        page: u32,
    ) -> Result<CategoryFeed> {
        let category = category_repo::find_published_by_slug(&self.pool, slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("category '{slug}' not found")))?;

        let (limit, offset) = page_bounds(page);
        let posts =
            post_repo::visible_posts_in_category(&self.pool, category.id, now, limit, offset)
                .await?;
        let total_count =
            post_repo::count_visible_posts_in_category(&self.pool, category.id, now).await?;

        Ok(CategoryFeed {
            category,
            feed: FeedPage {
                posts,
                page: page.max(1),
                total_count,
                has_more: has_more(page, total_count),
            },
        })
    }

    /// Profile feed: every post by the named user, visibility flags
    /// ignored. Unpublished and scheduled posts appear here too.
    pub async fn profile_feed(&self, username: &str, page: u32) -> Result<ProfileFeed> {
        let profile = user_repo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{username}' not found")))?;

        let (limit, offset) = page_bounds(page);
        let posts = post_repo::posts_by_author_page(&self.pool, profile.id, limit, offset).await?;
        let total_count = post_repo::count_posts_by_author(&self.pool, profile.id).await?;

        Ok(ProfileFeed {
            profile,
            feed: FeedPage {
                posts,
                page: page.max(1),
                total_count,
                has_more: has_more(page, total_count),
            },
        })
    }

    /// Profile header for the named user
    pub async fn profile_summary(&self, username: &str) -> Result<ProfileSummary> {
        let profile = user_repo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{username}' not found")))?;

        let post_count = post_repo::count_posts_by_author(&self.pool, profile.id).await?;

        Ok(ProfileSummary {
            profile,
            post_count,
        })
    }

    /// Post detail with its comment thread.
    ///
    /// Hidden posts answer NotFound unless the viewer is the author,
    /// never Forbidden, so existence is not revealed.
    pub async fn post_detail(
        &self,
        viewer: Option<Uuid>,
        post_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<PostDetail> {
        let post = post_repo::find_post_record(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {post_id} not found")))?;

        if !policy::can_view(viewer, &post, now) {
            return Err(AppError::NotFound(format!("post {post_id} not found")));
        }

        let comments = comment_repo::comments_for_post(&self.pool, post_id).await?;

        Ok(PostDetail { post, comments })
    }

    /// Create a post owned by `author_id`
    pub async fn create_post(&self, author_id: Uuid, new: NewPost) -> Result<Post> {
        self.check_references(new.category_id, new.location_id).await?;
        let post = post_repo::create_post(&self.pool, author_id, &new).await?;

        tracing::info!(post_id = %post.id, author_id = %author_id, "post created");
        Ok(post)
    }

    /// Apply changes to a post if `viewer` owns it
    pub async fn update_post(
        &self,
        viewer: Uuid,
        post_id: Uuid,
        changes: PostChanges,
    ) -> Result<WriteOutcome<Post>> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {post_id} not found")))?;

        if !policy::can_modify(viewer, &post) {
            return Ok(WriteOutcome::NotOwner);
        }

        self.check_references(changes.category_id, changes.location_id)
            .await?;
        let updated = post_repo::update_post(&self.pool, post_id, &changes).await?;

        tracing::info!(post_id = %post_id, "post updated");
        Ok(WriteOutcome::Applied(updated))
    }

    /// Delete a post if `viewer` owns it. Comments cascade.
    pub async fn delete_post(&self, viewer: Uuid, post_id: Uuid) -> Result<WriteOutcome<()>> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {post_id} not found")))?;

        if !policy::can_modify(viewer, &post) {
            return Ok(WriteOutcome::NotOwner);
        }

        post_repo::delete_post(&self.pool, post_id).await?;

        tracing::info!(post_id = %post_id, "post deleted");
        Ok(WriteOutcome::Applied(()))
    }

    /// Reject writes referencing a category or location that does not
    /// exist, before the insert trips the foreign key.
    async fn check_references(
        &self,
        category_id: Option<Uuid>,
        location_id: Option<Uuid>,
    ) -> Result<()> {
        if let Some(id) = category_id {
            if category_repo::find_by_id(&self.pool, id).await?.is_none() {
                return Err(AppError::BadRequest(format!("unknown category {id}")));
            }
        }

        if let Some(id) = location_id {
            if location_repo::find_by_id(&self.pool, id).await?.is_none() {
                return Err(AppError::BadRequest(format!("unknown location {id}")));
            }
        }

        Ok(())
    }
}
