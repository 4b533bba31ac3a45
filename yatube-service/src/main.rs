use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use anyhow::{anyhow, Context, Result};
use tracing::info;
use tracing_actix_web::TracingLogger;

use yatube_service::cache::FeedPageCache;
use yatube_service::{db, handlers, Config};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "yatube_service=info,info".into()),
        )
        .with_target(false)
        .init();

    info!("Starting Yatube Service");

    let config = Config::from_env().map_err(|err| anyhow!(err))?;

    let pool = db::connect(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to open database")?;
    info!(
        "Database pool initialized with {} max connections",
        config.database.max_connections
    );

    db::MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    info!("Database migrations applied");

    let feed_cache = Arc::new(FeedPageCache::new(
        config.feed.cache_capacity,
        Duration::from_secs(config.feed.cache_ttl_secs),
    ));

    let bind_address = (config.app.host.clone(), config.app.port);
    info!("Listening on {}:{}", bind_address.0, bind_address.1);

    let app_config = config.clone();
    HttpServer::new(move || {
        let jwt_secret = app_config.auth.jwt_secret.clone();

        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(feed_cache.clone()))
            .app_data(web::Data::new(app_config.clone()))
            .wrap(TracingLogger::default())
            .configure(|cfg| handlers::routes(cfg, &jwt_secret))
    })
    .bind(bind_address)?
    .run()
    .await
    .context("HTTP server terminated abnormally")
}
