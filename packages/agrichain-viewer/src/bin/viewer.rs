//! AgriChain viewer binary.

use agrichain_viewer::{create_router, AppState, Config};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AgriChain viewer");

    let config: Config = config::Config::builder()
        .add_source(config::File::with_name("agrichain").required(false))
        .add_source(config::Environment::with_prefix("AGRICHAIN"))
        .build()
        .and_then(|c| c.try_deserialize())
        .unwrap_or_else(|e| {
            // Fall back only when no config exists; parsing errors fail hard.
            let err_str = format!("{e}");
            if err_str.contains("not found") || err_str.contains("missing field") {
                warn!(error = %e, "No config file found, using defaults");
                Config::default()
            } else {
                error!(error = %e, "FATAL: Config error, fix env vars or agrichain.toml");
                std::process::exit(1);
            }
        });

    info!(
        contract = %config.contract_address,
        rpc = ?config.provider_url(),
        timeout_secs = ?config.rpc_timeout_secs,
        "Configuration loaded"
    );
    if config.rpc_timeout_secs.is_none() {
        warn!("rpc_timeout_secs not set; contract calls are not time-bounded");
    }

    let bind_address = config.bind_address.clone();
    let state = Arc::new(AppState::new(config)?);

    if let Some(msg) = state.binding.error() {
        warn!(error = msg, "Contract not bound; lookups will be rejected");
    }

    let app = create_router(state);

    info!(address = %bind_address, "Listening");

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Viewer shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
