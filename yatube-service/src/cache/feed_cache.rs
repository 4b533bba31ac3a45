//! In-process page cache for the global feed.
//!
//! Keys are (feed kind, page, page size). The content service calls
//! `invalidate_global` on every post create, edit and delete, so a deleted
//! post can never be served from a stale page; the TTL is only a backstop.

use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::models::{Page, Post};

pub struct FeedPageCache {
    pages: Cache<String, Page<Post>>,
}

impl FeedPageCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            pages: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    fn global_key(page: u32, page_size: u32) -> String {
        format!("feed:global:{}:{}", page, page_size)
    }

    pub async fn get_global(&self, page: u32, page_size: u32) -> Option<Page<Post>> {
        let key = Self::global_key(page, page_size);
        let hit = self.pages.get(&key).await;

        if hit.is_some() {
            debug!("Feed cache HIT for {}", key);
        } else {
            debug!("Feed cache MISS for {}", key);
        }

        hit
    }

    pub async fn put_global(&self, page: u32, page_size: u32, value: Page<Post>) {
        let key = Self::global_key(page, page_size);
        self.pages.insert(key.clone(), value).await;

        debug!("Feed cache WRITE for {}", key);
    }

    /// Drop every cached global-feed page. Called by the content service
    /// after each post mutation commits.
    pub fn invalidate_global(&self) {
        self.pages.invalidate_all();

        debug!("Feed cache INVALIDATE (global)");
    }
}
