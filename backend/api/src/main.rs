use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_actix_web::TracingLogger;

use vidtube_api::config::Config;
use vidtube_api::handlers::health;
use vidtube_api::routes::configure_routes;
use vidtube_api::security::jwt;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env();
    info!("Starting vidtube-api ({})", config.app.env);

    jwt::initialize_keys(&config.jwt.secret).context("Failed to initialize JWT keys")?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations applied");

    health::mark_started();

    let bind_addr = (config.app.host.clone(), config.app.port);
    let allowed_origins = config.app.cors_allowed_origins.clone();

    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(web::Data::new(pg_pool.clone()))
            .configure(configure_routes)
    })
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}:{}", bind_addr.0, bind_addr.1))?
    .run();

    info!("vidtube-api listening on {}:{}", config.app.host, config.app.port);

    server.await.context("HTTP server error")?;

    info!("vidtube-api shutting down");
    Ok(())
}
