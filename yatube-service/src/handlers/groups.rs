/// Group handlers - read-only; groups are provisioned administratively
use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::group_repo;
use crate::error::Result;
use crate::handlers::PaginationParams;
use crate::services::FeedService;

pub async fn list_groups(pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    let groups = group_repo::list_groups(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(groups))
}

/// Posts filed under a group, newest first.
pub async fn group_posts(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    slug: web::Path<String>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let service = FeedService::new((**pool).clone());
    let page = service
        .group_feed(&slug, query.page(), query.page_size(config.feed.page_size))
        .await?;

    Ok(HttpResponse::Ok().json(page))
}
