/// Feed handlers - paginated post listings
use std::sync::Arc;

use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

use crate::cache::FeedPageCache;
use crate::config::Config;
use crate::error::Result;
use crate::handlers::PaginationParams;
use crate::middleware::UserId;
use crate::services::FeedService;

/// Global feed: every post, newest first. Served through the page cache.
pub async fn global_feed(
    pool: web::Data<SqlitePool>,
    cache: web::Data<Arc<FeedPageCache>>,
    config: web::Data<Config>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let service = FeedService::with_cache((**pool).clone(), cache.get_ref().clone());
    let page = service
        .global_feed(query.page(), query.page_size(config.feed.page_size))
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Personalized feed: posts by authors the caller follows.
pub async fn following_feed(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    user_id: UserId,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let service = FeedService::new((**pool).clone());
    let page = service
        .following_feed(
            user_id.0,
            query.page(),
            query.page_size(config.feed.page_size),
        )
        .await?;

    Ok(HttpResponse::Ok().json(page))
}
