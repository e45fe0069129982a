//! HTTP entry point for the tracker.
//!
//! Serves `POST /api/tracking` on `server.bind_addr`.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tracker::{
    api::{AppState, build_app},
    error::{AppError, Result},
    fetcher,
    models::{Config, LoggingConfig},
    services::TrackingService,
};

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .map_err(|e| AppError::config(format!("invalid log level: {e}")))?;

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
    Ok(())
}

/// Main entry point for the server.
#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::var("TRACKER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("tracker.toml"));
    let mut config = Config::load_or_default(&config_path);
    config.apply_env(|key| std::env::var(key).ok());
    init_tracing(&config.logging)?;
    config.validate()?;

    let fetcher = fetcher::from_config(&config)?;
    let service = TrackingService::new(
        Arc::clone(&fetcher),
        config.locale.clone(),
        config.fetcher.max_concurrent,
    );
    let app = build_app(AppState {
        service: Arc::new(service),
    });

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    info!(
        addr = %config.server.bind_addr,
        fetcher = fetcher.name(),
        "tracker server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    fetcher.shutdown().await;
    info!("tracker server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("received shutdown signal, starting graceful shutdown");
}
