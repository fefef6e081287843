use anyhow::Context;
use tokio::signal;
use tracing::info;

use crate::app::app;
use crate::catalog::seed_catalog;
use crate::config::AppConfig;
use crate::state::AppState;

pub async fn handle(mut config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.api.port = port;
    }
    config.log_summary();

    info!("Starting EduSign API...");
    let state = AppState::initialize(config).await;

    if state.config.database.seed_on_startup {
        match &state.store {
            Some(store) => {
                seed_catalog(store.as_ref()).await;
            }
            None => info!("MongoDB not available, skipping sample course creation"),
        }
    }

    let bind_addr = format!("0.0.0.0:{}", state.config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("EduSign API listening on http://{}", bind_addr);

    axum::serve(listener, app(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    state.shutdown().await;
    info!("EduSign API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
