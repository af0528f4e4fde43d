use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use gym_server::{booking::BookingService, config::Config, database};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    info!(
        database = %config.database.url,
        pool_size = config.database.pool_size,
        lock_wait_ms = config.database.lock_wait_timeout.as_millis() as u64,
        "configuration loaded"
    );

    let pool = database::build_pool(&config.database)?;
    database::init_schema(&pool)?;
    let service = web::Data::new(BookingService::new(pool));

    info!(bind = %config.bind, "starting server");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(service.clone())
            .configure(gym_server::routes)
    })
    .bind(&config.bind)
    .with_context(|| format!("Failed to bind {}", config.bind))?
    .run()
    .await
    .context("Server error")
}
