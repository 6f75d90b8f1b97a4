/// Content visibility and ownership rules.
///
/// Both predicates are pure: the viewer and the clock are explicit
/// parameters, never read from ambient state, so every rule is unit-testable
/// without a database. Handlers map a `can_view` failure to 404 (hidden
/// content is indistinguishable from absent content) and a `can_modify`
/// failure to a redirect to the entity's detail view.
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Comment, CommentRecord, Post, PostRecord};

/// Entities with a single owning author.
pub trait Owned {
    fn author_id(&self) -> Uuid;
}

impl Owned for Post {
    fn author_id(&self) -> Uuid {
        self.author_id
    }
}

impl Owned for PostRecord {
    fn author_id(&self) -> Uuid {
        self.author_id
    }
}

impl Owned for Comment {
    fn author_id(&self) -> Uuid {
        self.author_id
    }
}

impl Owned for CommentRecord {
    fn author_id(&self) -> Uuid {
        self.author_id
    }
}

/// Whether `viewer` may read `post` at time `now`.
///
/// Authors always see their own posts, published or not. Everyone else
/// sees a post only when it is published, its publication date has
/// passed, and its category (if any) is published. A post without a
/// category counts as having a published one.
pub fn can_view(viewer: Option<Uuid>, post: &PostRecord, now: DateTime<Utc>) -> bool {
    if viewer == Some(post.author_id) {
        return true;
    }

    post.is_published && post.pub_date <= now && post.category_is_published.unwrap_or(true)
}

/// Whether `viewer` may mutate or delete `entity`. Only the author may.
pub fn can_modify<T: Owned>(viewer: Uuid, entity: &T) -> bool {
    viewer == entity.author_id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(
        author_id: Uuid,
        is_published: bool,
        pub_date: DateTime<Utc>,
        category_is_published: Option<bool>,
    ) -> PostRecord {
        PostRecord {
            id: Uuid::new_v4(),
            title: "title".to_string(),
            body: "body".to_string(),
            pub_date,
            author_id,
            author_username: "author".to_string(),
            location_id: None,
            location_name: None,
            category_id: category_is_published.map(|_| Uuid::new_v4()),
            category_title: category_is_published.map(|_| "category".to_string()),
            category_slug: category_is_published.map(|_| "category".to_string()),
            category_is_published,
            is_published,
            image_key: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn anonymous_cannot_view_unpublished_post() {
        let now = Utc::now();
        let post = record(Uuid::new_v4(), false, now - Duration::days(1), Some(true));
        assert!(!can_view(None, &post, now));
    }

    #[test]
    fn anonymous_cannot_view_future_dated_post() {
        let now = Utc::now();
        let post = record(Uuid::new_v4(), true, now + Duration::hours(1), Some(true));
        assert!(!can_view(None, &post, now));
    }

    #[test]
    fn anonymous_cannot_view_post_in_hidden_category() {
        let now = Utc::now();
        let post = record(Uuid::new_v4(), true, now - Duration::days(1), Some(false));
        assert!(!can_view(None, &post, now));
    }

    #[test]
    fn anonymous_can_view_published_past_post() {
        let now = Utc::now();
        let post = record(Uuid::new_v4(), true, now - Duration::days(1), Some(true));
        assert!(can_view(None, &post, now));
    }

    #[test]
    fn post_without_category_is_visible() {
        let now = Utc::now();
        let post = record(Uuid::new_v4(), true, now - Duration::days(1), None);
        assert!(can_view(None, &post, now));
    }

    #[test]
    fn author_sees_own_post_regardless_of_flags() {
        let now = Utc::now();
        let author = Uuid::new_v4();
        let hidden = record(author, false, now + Duration::days(7), Some(false));
        assert!(can_view(Some(author), &hidden, now));
    }

    #[test]
    fn other_authenticated_user_gets_public_rules() {
        let now = Utc::now();
        let post = record(Uuid::new_v4(), false, now - Duration::days(1), Some(true));
        assert!(!can_view(Some(Uuid::new_v4()), &post, now));
    }

    #[test]
    fn pub_date_exactly_now_is_visible() {
        let now = Utc::now();
        let post = record(Uuid::new_v4(), true, now, Some(true));
        assert!(can_view(None, &post, now));
    }

    #[test]
    fn only_author_can_modify() {
        let now = Utc::now();
        let author = Uuid::new_v4();
        let post = record(author, true, now, Some(true));
        assert!(can_modify(author, &post));
        assert!(!can_modify(Uuid::new_v4(), &post));
    }
}
