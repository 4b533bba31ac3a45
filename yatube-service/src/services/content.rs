//! Content service - creation and mutation of posts and comments.
//!
//! Every write is a single statement, so a row is either fully persisted or
//! not visible at all. The service invalidates the global-feed cache after
//! each post mutation.

use std::sync::Arc;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::cache::FeedPageCache;
use crate::db::{comment_repo, group_repo, post_repo};
use crate::error::{AppError, Result};
use crate::middleware::permissions;
use crate::models::{Comment, Post};

pub struct ContentService {
    pool: SqlitePool,
    cache: Option<Arc<FeedPageCache>>,
}

impl ContentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, cache: None }
    }

    pub fn with_cache(pool: SqlitePool, cache: Arc<FeedPageCache>) -> Self {
        Self {
            pool,
            cache: Some(cache),
        }
    }

    /// Create a new post stamped with the current time.
    pub async fn create_post(
        &self,
        author_id: Uuid,
        text: &str,
        group_id: Option<Uuid>,
        image_key: Option<&str>,
    ) -> Result<Post> {
        let text = non_empty_text(text, "post")?;
        self.resolve_group(group_id).await?;

        let post = post_repo::create_post(&self.pool, author_id, text, group_id, image_key)
            .await?;

        self.invalidate_feed_cache();

        Ok(post)
    }

    /// Overwrite the mutable fields of a post. Only the author may edit;
    /// author and creation timestamp are left untouched.
    pub async fn edit_post(
        &self,
        requester_id: Uuid,
        post_id: Uuid,
        text: &str,
        group_id: Option<Uuid>,
        image_key: Option<&str>,
    ) -> Result<Post> {
        let existing = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

        permissions::check_post_ownership(requester_id, &existing)?;

        let text = non_empty_text(text, "post")?;
        self.resolve_group(group_id).await?;

        let post = post_repo::update_post(&self.pool, post_id, text, group_id, image_key)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

        self.invalidate_feed_cache();

        Ok(post)
    }

    /// Remove a post. Its comments are removed by the schema cascade.
    pub async fn delete_post(&self, requester_id: Uuid, post_id: Uuid) -> Result<()> {
        let existing = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

        permissions::check_post_ownership(requester_id, &existing)?;

        post_repo::delete_post(&self.pool, post_id).await?;

        self.invalidate_feed_cache();

        Ok(())
    }

    /// Create a new comment on an existing post.
    pub async fn add_comment(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        text: &str,
    ) -> Result<Comment> {
        post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

        let text = non_empty_text(text, "comment")?;

        let comment = comment_repo::create_comment(&self.pool, post_id, author_id, text).await?;

        Ok(comment)
    }

    /// A post with its comments, newest comment first.
    pub async fn get_post(&self, post_id: Uuid) -> Result<(Post, Vec<Comment>)> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

        let comments = comment_repo::list_by_post(&self.pool, post_id).await?;

        Ok((post, comments))
    }

    async fn resolve_group(&self, group_id: Option<Uuid>) -> Result<()> {
        if let Some(group_id) = group_id {
            group_repo::find_by_id(&self.pool, group_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("group {}", group_id)))?;
        }

        Ok(())
    }

    fn invalidate_feed_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_global();
        }
    }
}

fn non_empty_text<'a>(text: &'a str, what: &str) -> Result<&'a str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!(
            "{} text must not be empty",
            what
        )));
    }

    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_text_trims() {
        assert_eq!(non_empty_text("  hello  ", "post").unwrap(), "hello");
    }

    #[test]
    fn test_non_empty_text_rejects_whitespace() {
        assert!(matches!(
            non_empty_text(" \n\t ", "comment"),
            Err(AppError::Validation(_))
        ));
    }
}
