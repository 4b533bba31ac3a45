/// Comment handlers - HTTP endpoints for comment operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::ContentService;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 1000, message = "comment text must be 1-1000 characters"))]
    pub text: String,
}

/// Create a new comment on a post
pub async fn create_comment(
    pool: web::Data<SqlitePool>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = ContentService::new((**pool).clone());
    let comment = service.add_comment(user_id.0, *post_id, &req.text).await?;

    Ok(HttpResponse::Created().json(comment))
}

/// Get comments for a post, newest first
pub async fn get_post_comments(
    pool: web::Data<SqlitePool>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ContentService::new((**pool).clone());
    let (_, comments) = service.get_post(*post_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}
