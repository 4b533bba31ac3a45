//! HTTP request handlers.
//!
//! Handlers stay thin: deserialize the request, call one service operation,
//! map the result onto a status code. The JSON surface is a conventional
//! carrier for the service operations; URL design is not load-bearing.

pub mod comments;
pub mod feed;
pub mod follows;
pub mod groups;
pub mod posts;
pub mod profiles;

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::middleware::JwtAuth;

/// Upper bound for caller-chosen page sizes.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Shared `?page=N&page_size=M` query parameters. Both are optional; the
/// default page size comes from configuration.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PaginationParams {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self, default: u32) -> u32 {
        self.page_size.unwrap_or(default).clamp(1, MAX_PAGE_SIZE)
    }
}

/// Liveness plus a database round-trip.
pub async fn health(pool: web::Data<SqlitePool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "timestamp": Utc::now().to_rfc3339(),
        })),
        Err(err) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "degraded",
            "error": err.to_string(),
            "timestamp": Utc::now().to_rfc3339(),
        })),
    }
}

/// Register every route of the service. Shared between `main` and the HTTP
/// test suite.
pub fn routes(cfg: &mut web::ServiceConfig, jwt_secret: &str) {
    cfg.route("/health", web::get().to(health)).service(
        web::scope("/api")
            .wrap(JwtAuth::new(jwt_secret))
            .service(
                web::scope("/feed")
                    .route("", web::get().to(feed::global_feed))
                    .route("/following", web::get().to(feed::following_feed)),
            )
            .service(
                web::scope("/posts")
                    .service(web::resource("").route(web::post().to(posts::create_post)))
                    .service(
                        web::resource("/{post_id}")
                            .route(web::get().to(posts::get_post))
                            .route(web::put().to(posts::update_post))
                            .route(web::delete().to(posts::delete_post)),
                    )
                    .service(
                        web::resource("/{post_id}/comments")
                            .route(web::get().to(comments::get_post_comments))
                            .route(web::post().to(comments::create_comment)),
                    ),
            )
            .service(
                web::scope("/groups")
                    .route("", web::get().to(groups::list_groups))
                    .route("/{slug}/posts", web::get().to(groups::group_posts)),
            )
            .service(
                web::scope("/users")
                    .route("/{username}", web::get().to(profiles::get_profile))
                    .route("/{username}/posts", web::get().to(profiles::author_posts))
                    .service(
                        web::resource("/{username}/follow")
                            .route(web::post().to(follows::follow))
                            .route(web::delete().to(follows::unfollow)),
                    ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let params = PaginationParams {
            page: None,
            page_size: None,
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(10), 10);
    }

    #[test]
    fn test_pagination_clamps() {
        let params = PaginationParams {
            page: Some(0),
            page_size: Some(100_000),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(10), MAX_PAGE_SIZE);
    }
}
