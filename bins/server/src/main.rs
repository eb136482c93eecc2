//! Registra API Server
//!
//! Main entry point for the form intake service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use registra_api::{AppState, EmailNotifier, create_router, shutdown_signal};
use registra_core::forms::FormKind;
use registra_core::storage::{StorageConfig, StorageService};
use registra_core::submission::{ProcessorSettings, SubmissionProcessor};
use registra_db::{SubmissionRepository, connect};
use registra_shared::{AppConfig, EmailService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "registra=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database
    let db = connect(&config.database).await?;
    info!("Connected to database");

    // Object storage, one operator per bucket any form writes to
    let storage_config = StorageConfig::try_from(&config.storage)?;
    let max_file_size = usize::try_from(storage_config.max_file_size).unwrap_or(usize::MAX);
    let storage = StorageService::from_config(storage_config, FormKind::buckets())?;
    info!(provider = storage.provider_name(), "Storage configured");

    // Email is optional; without a key submissions still succeed
    if config.email.is_enabled() {
        info!(
            smtp_host = %config.email.smtp_host,
            smtp_port = %config.email.smtp_port,
            "Email service configured"
        );
    } else {
        warn!("No email API key configured, confirmation emails are disabled");
    }
    let email_service = Arc::new(EmailService::new(config.email.clone()));

    let processor = Arc::new(SubmissionProcessor::new(
        Arc::new(storage),
        Arc::new(SubmissionRepository::new(db)),
        Arc::new(EmailNotifier::new(email_service)),
        ProcessorSettings {
            frontend_url: config.email.frontend_url.clone(),
        },
    ));

    // Create application state
    let state = AppState {
        processor: Arc::clone(&processor),
        max_file_size,
        max_body_bytes: config.server.max_body_bytes,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Let queued confirmation emails finish
    processor.shutdown().await;
    info!("Server stopped");

    Ok(())
}
