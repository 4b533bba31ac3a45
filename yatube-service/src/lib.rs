/// Yatube Service Library
///
/// A small blog platform: users publish posts (optionally filed under a
/// group and carrying an image reference), comment on posts, and follow
/// other authors to get a personalized feed.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Data structures for users, groups, posts, comments, follows
/// - `services`: Business logic layer (content, feeds, follows)
/// - `db`: Database access layer and repositories
/// - `cache`: Feed page caching and invalidation
/// - `middleware`: HTTP middleware for authentication and ownership checks
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
