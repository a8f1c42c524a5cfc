//! LedgerLink API Server
//!
//! Main entry point for the LedgerLink backend service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ledgerlink_api::{AppState, create_router};
use ledgerlink_core::import::ImportSynchronizer;
use ledgerlink_db::{LedgerAccountRepository, connect_with_pool};
use ledgerlink_integration::IntegrationClient;
use ledgerlink_shared::{AppConfig, JwtConfig, JwtService};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ledgerlink=debug,tower_http=debug".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = connect_with_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await
    .context("Failed to connect to database")?;
    info!("Connected to database");

    // Only validation runs here; the issuing lifetime stays at its default.
    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        ..JwtConfig::default()
    });

    let gateway = Arc::new(
        IntegrationClient::new(&config.integration)
            .context("Failed to configure integration client")?,
    );
    info!(api_uri = %config.integration.api_uri, "Integration client configured");

    let store = Arc::new(LedgerAccountRepository::new(db));

    let state = AppState::new(gateway.clone(), store.clone(), Arc::new(jwt_service))
        .with_importer(
            ImportSynchronizer::new(gateway, store).with_max_pages(config.import.max_pages),
        )
        .with_request_timeout(Duration::from_secs(config.server.request_timeout_secs));

    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
