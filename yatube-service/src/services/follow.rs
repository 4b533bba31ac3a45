//! Follow service - follow edges between users.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::{follow_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::User;

#[derive(Clone)]
pub struct FollowService {
    pool: SqlitePool,
}

impl FollowService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Follow the target author. Self-follows and already-existing edges are
    /// successful no-ops; returns true if a new edge was created.
    pub async fn follow(&self, follower_id: Uuid, target_username: &str) -> Result<bool> {
        let target = self.resolve(target_username).await?;

        if target.id == follower_id {
            return Ok(false);
        }

        let created = follow_repo::insert_edge(&self.pool, follower_id, target.id).await?;

        Ok(created)
    }

    /// Remove the follow edge if present. Idempotent; returns true if an
    /// edge was removed.
    pub async fn unfollow(&self, follower_id: Uuid, target_username: &str) -> Result<bool> {
        let target = self.resolve(target_username).await?;

        let removed = follow_repo::delete_edge(&self.pool, follower_id, target.id).await?;

        Ok(removed)
    }

    /// Pure query used by the presentation layer to toggle the
    /// follow/unfollow affordance.
    pub async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool> {
        let exists = follow_repo::edge_exists(&self.pool, follower_id, followed_id).await?;

        Ok(exists)
    }

    /// Resolved profile user plus the follow flag for an optionally
    /// authenticated viewer.
    pub async fn profile(&self, username: &str, viewer_id: Option<Uuid>) -> Result<(User, bool)> {
        let user = self.resolve(username).await?;

        let following = match viewer_id {
            Some(viewer_id) => {
                follow_repo::edge_exists(&self.pool, viewer_id, user.id).await?
            }
            None => false,
        };

        Ok((user, following))
    }

    async fn resolve(&self, username: &str) -> Result<User> {
        user_repo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{}'", username)))
    }
}
