//! Feed service - paginated, ordered post listings.
//!
//! All feeds share one ordering: creation timestamp descending, id
//! descending as the tie-break. Pages are 1-based; a page past the end is
//! an empty page, not an error.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::cache::FeedPageCache;
use crate::db::{group_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Page, Post};

pub struct FeedService {
    pool: SqlitePool,
    cache: Option<Arc<FeedPageCache>>,
}

impl FeedService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, cache: None }
    }

    pub fn with_cache(pool: SqlitePool, cache: Arc<FeedPageCache>) -> Self {
        Self {
            pool,
            cache: Some(cache),
        }
    }

    /// All posts. The only feed served through the page cache.
    pub async fn global_feed(&self, page: u32, page_size: u32) -> Result<Page<Post>> {
        let page = page.max(1);

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get_global(page, page_size).await {
                return Ok(hit);
            }
        }

        let total = post_repo::count_all(&self.pool).await?;
        let posts = post_repo::list_page(
            &self.pool,
            page_size as i64,
            Page::<Post>::offset(page, page_size),
        )
        .await?;

        let result = Page::new(posts, page, page_size, total);

        if let Some(cache) = &self.cache {
            cache.put_global(page, page_size, result.clone()).await;
        }

        Ok(result)
    }

    /// Posts filed under the group with the given slug.
    pub async fn group_feed(&self, slug: &str, page: u32, page_size: u32) -> Result<Page<Post>> {
        let page = page.max(1);

        let group = group_repo::find_by_slug(&self.pool, slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("group '{}'", slug)))?;

        let total = post_repo::count_by_group(&self.pool, group.id).await?;
        let posts = post_repo::list_by_group(
            &self.pool,
            group.id,
            page_size as i64,
            Page::<Post>::offset(page, page_size),
        )
        .await?;

        Ok(Page::new(posts, page, page_size, total))
    }

    /// Posts authored by the user with the given username.
    pub async fn author_feed(
        &self,
        username: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Post>> {
        let page = page.max(1);

        let author = user_repo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{}'", username)))?;

        let total = post_repo::count_by_author(&self.pool, author.id).await?;
        let posts = post_repo::list_by_author(
            &self.pool,
            author.id,
            page_size as i64,
            Page::<Post>::offset(page, page_size),
        )
        .await?;

        Ok(Page::new(posts, page, page_size, total))
    }

    /// Posts by every author the viewer follows. Following nobody yields an
    /// empty page, not an error.
    pub async fn following_feed(
        &self,
        viewer_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Post>> {
        let page = page.max(1);

        let total = post_repo::count_by_followed(&self.pool, viewer_id).await?;
        let posts = post_repo::list_by_followed(
            &self.pool,
            viewer_id,
            page_size as i64,
            Page::<Post>::offset(page, page_size),
        )
        .await?;

        debug!(
            "Following feed for {}: {} of {} posts",
            viewer_id,
            posts.len(),
            total
        );

        Ok(Page::new(posts, page, page_size, total))
    }
}
