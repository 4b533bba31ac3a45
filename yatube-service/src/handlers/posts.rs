/// Post handlers - HTTP endpoints for post operations
use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::cache::FeedPageCache;
use crate::error::Result;
use crate::middleware::UserId;
use crate::models::{Comment, Post};
use crate::services::ContentService;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "post text must not be empty"))]
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image_key: Option<String>,
}

/// Edit payload. The mutable fields are overwritten as a whole: omitting
/// `group_id` or `image_key` clears them.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, message = "post text must not be empty"))]
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post: Post,
    pub comments: Vec<Comment>,
}

/// Create a new post
pub async fn create_post(
    pool: web::Data<SqlitePool>,
    cache: web::Data<Arc<FeedPageCache>>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = ContentService::with_cache((**pool).clone(), cache.get_ref().clone());
    let post = service
        .create_post(
            user_id.0,
            &req.text,
            req.group_id,
            req.image_key.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// Get a post with its comments
pub async fn get_post(
    pool: web::Data<SqlitePool>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ContentService::new((**pool).clone());
    let (post, comments) = service.get_post(*post_id).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse { post, comments }))
}

/// Edit a post; only its author may do this
pub async fn update_post(
    pool: web::Data<SqlitePool>,
    cache: web::Data<Arc<FeedPageCache>>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = ContentService::with_cache((**pool).clone(), cache.get_ref().clone());
    let post = service
        .edit_post(
            user_id.0,
            *post_id,
            &req.text,
            req.group_id,
            req.image_key.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post; comments are removed with it
pub async fn delete_post(
    pool: web::Data<SqlitePool>,
    cache: web::Data<Arc<FeedPageCache>>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ContentService::with_cache((**pool).clone(), cache.get_ref().clone());
    service.delete_post(user_id.0, *post_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
