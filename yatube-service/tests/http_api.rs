//! Integration tests: HTTP surface, auth and status-code mapping.

mod common;

use std::sync::Arc;
use std::time::Duration;

use actix_web::{test, web, App};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::SqlitePool;
use uuid::Uuid;

use yatube_service::cache::FeedPageCache;
use yatube_service::config::{AppConfig, AuthConfig, Config, DatabaseConfig, FeedConfig};
use yatube_service::handlers;
use yatube_service::middleware::Claims;
use yatube_service::models::{Page, Post, User};
use yatube_service::services::ContentService;

const SECRET: &str = "test-secret";

fn test_config() -> Config {
    Config {
        app: AppConfig {
            env: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        auth: AuthConfig {
            jwt_secret: SECRET.to_string(),
        },
        feed: FeedConfig {
            page_size: 10,
            cache_ttl_secs: 20,
            cache_capacity: 64,
        },
    }
}

fn token_for(user: &User) -> String {
    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        exp: (Utc::now().timestamp() + 3600) as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("failed to mint test token")
}

macro_rules! test_app {
    ($pool:expr) => {{
        let cache = Arc::new(FeedPageCache::new(64, Duration::from_secs(20)));
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool.clone()))
                .app_data(web::Data::new(cache))
                .app_data(web::Data::new(test_config()))
                .configure(|cfg| handlers::routes(cfg, SECRET)),
        )
        .await
    }};
}

async fn seed_post(pool: &SqlitePool, author: &User, text: &str) -> Post {
    ContentService::new(pool.clone())
        .create_post(author.id, text, None, None)
        .await
        .expect("failed to seed post")
}

#[tokio::test]
async fn test_create_post_requires_authentication() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(serde_json::json!({ "text": "anonymous post" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .set_json(serde_json::json!({ "text": "post" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_create_and_fetch_post() {
    let pool = common::setup_pool().await;
    let author = common::create_user(&pool, "author").await;
    let app = test_app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("Authorization", format!("Bearer {}", token_for(&author))))
        .set_json(serde_json::json!({ "text": "hello over http" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let created: Post = test::read_body_json(resp).await;
    assert_eq!(created.text, "hello over http");
    assert_eq!(created.author_id, author.id);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", created.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let detail: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(detail["post"]["text"], "hello over http");
    assert!(detail["comments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_text_is_a_bad_request() {
    let pool = common::setup_pool().await;
    let author = common::create_user(&pool, "author").await;
    let app = test_app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("Authorization", format!("Bearer {}", token_for(&author))))
        .set_json(serde_json::json!({ "text": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_editing_someone_elses_post_is_forbidden() {
    let pool = common::setup_pool().await;
    let author = common::create_user(&pool, "author").await;
    let intruder = common::create_user(&pool, "intruder").await;
    let post = seed_post(&pool, &author, "mine").await;
    let app = test_app!(pool);

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}", post.id))
        .insert_header(("Authorization", format!("Bearer {}", token_for(&intruder))))
        .set_json(serde_json::json!({ "text": "hijacked" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn test_unknown_post_is_404() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_delete_post_then_fetch_is_404() {
    let pool = common::setup_pool().await;
    let author = common::create_user(&pool, "author").await;
    let post = seed_post(&pool, &author, "short-lived").await;
    let app = test_app!(pool);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}", post.id))
        .insert_header(("Authorization", format!("Bearer {}", token_for(&author))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_comment_roundtrip() {
    let pool = common::setup_pool().await;
    let author = common::create_user(&pool, "author").await;
    let reader = common::create_user(&pool, "reader").await;
    let post = seed_post(&pool, &author, "discuss").await;
    let app = test_app!(pool);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post.id))
        .insert_header(("Authorization", format!("Bearer {}", token_for(&reader))))
        .set_json(serde_json::json!({ "text": "great post" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}/comments", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let comments: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(comments.as_array().unwrap().len(), 1);
    assert_eq!(comments[0]["text"], "great post");
}

#[tokio::test]
async fn test_follow_toggles_profile_flag() {
    let pool = common::setup_pool().await;
    common::create_user(&pool, "author").await;
    let fan = common::create_user(&pool, "fan").await;
    let app = test_app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/users/author/follow")
        .insert_header(("Authorization", format!("Bearer {}", token_for(&fan))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["following"], true);

    // the authenticated viewer sees the follow affordance toggled
    let req = test::TestRequest::get()
        .uri("/api/users/author")
        .insert_header(("Authorization", format!("Bearer {}", token_for(&fan))))
        .to_request();
    let profile: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(profile["following"], true);

    // anonymous viewers see it untoggled
    let req = test::TestRequest::get().uri("/api/users/author").to_request();
    let profile: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(profile["following"], false);
}

#[tokio::test]
async fn test_feed_pagination_over_http() {
    let pool = common::setup_pool().await;
    let author = common::create_user(&pool, "author").await;
    for i in 0..17 {
        seed_post(&pool, &author, &format!("post {}", i)).await;
    }
    let app = test_app!(pool);

    let req = test::TestRequest::get().uri("/api/feed").to_request();
    let page: Page<Post> = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total_count, 17);
    assert!(page.has_next);

    let req = test::TestRequest::get()
        .uri("/api/feed?page=2")
        .to_request();
    let page: Page<Post> = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(page.items.len(), 7);
    assert!(!page.has_next);
}

#[tokio::test]
async fn test_following_feed_requires_authentication() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let req = test::TestRequest::get()
        .uri("/api/feed/following")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_health_endpoint() {
    let pool = common::setup_pool().await;
    let app = test_app!(pool);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}
