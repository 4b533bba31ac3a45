/// Profile handlers - author pages
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::error::Result;
use crate::handlers::PaginationParams;
use crate::middleware::MaybeUserId;
use crate::models::User;
use crate::services::{FeedService, FollowService};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: User,
    /// Whether the (optionally authenticated) viewer follows this author
    pub following: bool,
}

pub async fn get_profile(
    pool: web::Data<SqlitePool>,
    username: web::Path<String>,
    viewer: MaybeUserId,
) -> Result<HttpResponse> {
    let service = FollowService::new((**pool).clone());
    let (user, following) = service.profile(&username, viewer.0).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse { user, following }))
}

/// Posts authored by one user, newest first.
pub async fn author_posts(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    username: web::Path<String>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let service = FeedService::new((**pool).clone());
    let page = service
        .author_feed(
            &username,
            query.page(),
            query.page_size(config.feed.page_size),
        )
        .await?;

    Ok(HttpResponse::Ok().json(page))
}
