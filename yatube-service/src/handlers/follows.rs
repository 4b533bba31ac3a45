/// Follow handlers - follow/unfollow an author
use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::FollowService;

/// Follow an author. Self-follows and repeat follows are no-ops, so the
/// response always reports the resulting edge state.
pub async fn follow(
    pool: web::Data<SqlitePool>,
    user_id: UserId,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let service = FollowService::new((**pool).clone());
    service.follow(user_id.0, &username).await?;
    let (_, following) = service.profile(&username, Some(user_id.0)).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "following": following })))
}

/// Unfollow an author. Removing a missing edge is a successful no-op.
pub async fn unfollow(
    pool: web::Data<SqlitePool>,
    user_id: UserId,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let service = FollowService::new((**pool).clone());
    service.unfollow(user_id.0, &username).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "following": false })))
}
