/// Ownership-based permission checks.
///
/// Posts are owned exclusively by their author for mutation purposes.
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Post;

/// Check if a user owns a post
pub fn check_post_ownership(user_id: Uuid, post: &Post) -> Result<(), AppError> {
    if post.author_id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "only the author may modify this post".to_string(),
        ))
    }
}
