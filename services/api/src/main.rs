use clap::Parser;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use trainlog_api::config::ServerConfig;
use trainlog_api::router::build_router;
use trainlog_api::state::AppState;
use trainlog_api_migration::Migrator;
use trainlog_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();
    init_tracing(&config.log_level);

    let database_url = config.database_url().expect("invalid database settings");
    let mut options = ConnectOptions::new(database_url);
    options
        .max_connections(config.db_max_connections)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("failed to connect to database");

    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");

    let state = AppState::from_db(db.clone());
    let router = build_router(state, config.request_timeout());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("trainlog listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    info!("shutting down");
    if let Err(e) = db.close().await {
        tracing::error!(error = %e, "failed to close database pool");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
