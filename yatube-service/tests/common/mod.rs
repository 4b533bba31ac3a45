#![allow(dead_code)]

//! Shared fixtures for the integration tests.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use yatube_service::db::{self, group_repo, user_repo};
use yatube_service::models::{Group, User};

/// Open a fresh in-memory database with the full schema applied.
///
/// Every pooled connection to `sqlite::memory:` would get its own empty
/// database, so the pool is pinned to a single connection.
pub async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    db::MIGRATOR
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

pub async fn create_user(pool: &SqlitePool, username: &str) -> User {
    user_repo::create_user(
        pool,
        username,
        &format!("{} Display", username),
        &format!("{}@example.com", username),
    )
    .await
    .expect("failed to create user")
}

pub async fn create_group(pool: &SqlitePool, slug: &str) -> Group {
    group_repo::create_group(pool, slug, &format!("Group {}", slug), "A test community")
        .await
        .expect("failed to create group")
}
