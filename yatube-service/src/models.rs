//! Data models for the service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author identity. Rows are provisioned by the external identity flow;
/// request handlers only ever read them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Topic community a post can be filed under. Created administratively.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Group {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Post entity. `author_id` and `created_at` are set once at creation and
/// never change; text, group and image reference are the mutable fields,
/// writable only by the author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub text: String,
    /// Opaque reference into binary storage; the service never interprets it
    pub image_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Comment on a post. Immutable once created; removed only when its post is
/// removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Directed follow edge: follower sees the followed author's posts in their
/// personalized feed.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Follow {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub followed_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// One feed page plus the pagination metadata the presentation layer needs.
///
/// Pages are 1-based; a page past the end of the feed is an empty page, not
/// an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: i64,
    pub total_pages: u32,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total_count: i64) -> Self {
        let total_pages = if total_count <= 0 {
            0
        } else {
            ((total_count as u64).div_ceil(page_size.max(1) as u64)) as u32
        };

        Self {
            items,
            page,
            page_size,
            total_count,
            total_pages,
            has_next: page < total_pages,
        }
    }

    /// Row offset of a 1-based page.
    pub fn offset(page: u32, page_size: u32) -> i64 {
        (page.max(1) as i64 - 1) * page_size as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_metadata() {
        let page = Page::new(vec![1; 10], 1, 10, 17);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next);

        let page = Page::new(vec![1; 7], 2, 10, 17);
        assert_eq!(page.total_pages, 2);
        assert!(!page.has_next);

        let page: Page<i32> = Page::new(vec![], 3, 10, 17);
        assert!(page.items.is_empty());
        assert!(!page.has_next);
    }

    #[test]
    fn test_page_metadata_empty_feed() {
        let page: Page<i32> = Page::new(vec![], 1, 10, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(Page::<()>::offset(1, 10), 0);
        assert_eq!(Page::<()>::offset(2, 10), 10);
        assert_eq!(Page::<()>::offset(3, 7), 14);
        // page 0 is clamped to the first page
        assert_eq!(Page::<()>::offset(0, 10), 0);
    }
}
