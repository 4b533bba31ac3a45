/// Configuration management for the service
///
/// This module handles loading configuration from environment variables,
/// with development defaults for every knob except the JWT secret in
/// production.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Feed and cache configuration
    pub feed: FeedConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret for validating bearer tokens minted by the identity
    /// provider
    pub jwt_secret: String,
}

/// Feed and cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Default number of posts per feed page
    pub page_size: u32,
    /// TTL backstop for cached global-feed pages, in seconds
    pub cache_ttl_secs: u64,
    /// Max cached feed pages
    pub cache_capacity: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let jwt_secret = match std::env::var("YATUBE_JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if app_env == "production" => {
                return Err("YATUBE_JWT_SECRET must be set in production".to_string());
            }
            Err(_) => "insecure-dev-secret".to_string(),
        };

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("YATUBE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("YATUBE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://yatube.db".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5),
            },
            auth: AuthConfig { jwt_secret },
            feed: FeedConfig {
                page_size: std::env::var("FEED_PAGE_SIZE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
                cache_ttl_secs: std::env::var("FEED_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(20),
                cache_capacity: std::env::var("FEED_CACHE_CAPACITY")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(256),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test touching process env so parallel test threads never race
    // on the same variables.
    #[test]
    fn test_from_env_defaults() {
        std::env::remove_var("APP_ENV");
        std::env::remove_var("YATUBE_JWT_SECRET");
        std::env::remove_var("FEED_PAGE_SIZE");

        let config = Config::from_env().expect("defaults should load");
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.feed.page_size, 10);
        assert_eq!(config.feed.cache_ttl_secs, 20);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.auth.jwt_secret, "insecure-dev-secret");
    }
}
