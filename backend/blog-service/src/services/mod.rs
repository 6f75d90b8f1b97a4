/// Business logic layer
///
/// Services combine the repositories in `db/` with the predicates in
/// `policy` and own all conditional behavior: what is visible, who may
/// write, and what counts as absent.
mod comments;
mod posts;

pub use comments::CommentService;
pub use posts::{CategoryFeed, PostDetail, PostService, ProfileFeed, ProfileSummary};

use crate::models::PostRecord;
use serde::Serialize;

/// Fixed page size for every post feed
pub const POSTS_PER_PAGE: i64 = 10;

/// Outcome of an owner-gated write. `NotOwner` is not an error: the
/// handler answers it with a redirect to the entity's detail view, and
/// nothing is mutated.
#[derive(Debug)]
pub enum WriteOutcome<T> {
    Applied(T),
    NotOwner,
}

/// One page of an annotated, ordered post feed
#[derive(Debug, Serialize)]
pub struct FeedPage {
    pub posts: Vec<PostRecord>,
    pub page: u32,
    pub total_count: i64,
    pub has_more: bool,
}

/// Translate a 1-based page number into LIMIT/OFFSET values
pub(crate) fn page_bounds(page: u32) -> (i64, i64) {
    let page = page.max(1) as i64;
    (POSTS_PER_PAGE, (page - 1) * POSTS_PER_PAGE)
}

pub(crate) fn has_more(page: u32, total_count: i64) -> bool {
    let page = page.max(1) as i64;
    page * POSTS_PER_PAGE < total_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(page_bounds(1), (POSTS_PER_PAGE, 0));
    }

    #[test]
    fn page_zero_is_clamped_to_first() {
        assert_eq!(page_bounds(0), (POSTS_PER_PAGE, 0));
    }

    #[test]
    fn later_pages_offset_by_page_size() {
        assert_eq!(page_bounds(3), (POSTS_PER_PAGE, 2 * POSTS_PER_PAGE));
    }

    #[test]
    fn has_more_respects_total() {
        assert!(has_more(1, 11));
        assert!(!has_more(1, 10));
        assert!(!has_more(2, 11));
    }
}
