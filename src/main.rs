//! Lorry Rental Backend Server
//!
//! Booking management for a lorry rental agency: authentication, the vehicle
//! catalogue, bookings with frozen pricing, agency settings, and the static
//! frontend.

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer};
use anyhow::Context;
use lorry_api::{configure_api, json_config, ApiState};
use lorry_auth::{JwtService, PasswordService};
use lorry_core::config::StorageBackend;
use lorry_core::traits::Repositories;
use lorry_core::AppConfig;
use lorry_db::{create_pool, memory_repositories, pg_repositories, run_migrations};
use lorry_services::seed_defaults;
use std::env;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "lorry_rental={lvl},lorry_api={lvl},lorry_services={lvl},lorry_db={lvl},lorry_auth={lvl},actix_web=info,sqlx=warn",
            lvl = log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Build the repositories for the configured backend
async fn build_repositories(config: &AppConfig) -> anyhow::Result<Repositories> {
    match config.database.backend {
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(&config.database)
                .await
                .context("Failed to create database pool")?;
            run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;

            info!(
                "Database ready with {} max connections",
                config.database.max_connections
            );
            Ok(pg_repositories(pool))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on restart");
            Ok(memory_repositories())
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    info!(
        "Starting Lorry Rental Backend v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = AppConfig::load().context("Failed to load configuration")?;

    let repos = build_repositories(&config).await?;

    if config.seed.enabled {
        let report = seed_defaults(&repos, &PasswordService::new())
            .await
            .context("Failed to seed default data")?;
        if !report.is_empty() {
            info!(?report, "Default data seeded");
        }
    }

    let jwt_service = Arc::new(JwtService::new(
        &config.auth.jwt_secret,
        config.auth.expiration_secs(),
    ));
    info!(
        "JWT service configured with {} hour token expiration",
        config.auth.jwt_expiration_hours
    );
    if config.booking.strict_status_transitions {
        info!("Strict booking status transitions enabled");
    }

    let state = ApiState::new(&repos, jwt_service, &config.booking);

    let static_dir = config.server.static_dir.clone();
    if !Path::new(&static_dir).is_dir() {
        warn!("Static directory {} not found; frontend will not be served", static_dir);
    }

    let bind_addr = config.server_addr();
    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, config.server.workers
    );

    HttpServer::new(move || {
        let state = state.clone();

        App::new()
            .app_data(json_config())
            .configure(move |cfg| state.register(cfg))
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .configure(configure_api)
            // Frontend; registered last so /api routes win
            .service(Files::new("/", static_dir.clone()).index_file("index.html"))
    })
    .workers(config.server.workers)
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await?;

    Ok(())
}
