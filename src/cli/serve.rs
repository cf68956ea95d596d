// src/cli/serve.rs
// HTTP server startup and graceful shutdown

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::create_router;
use crate::config::FactdeckConfig;
use crate::state::AppState;
use crate::store::open_store;

pub async fn run_server(config: &FactdeckConfig) -> Result<()> {
    info!("Initializing fact store ({})", config.store);
    let fact_store = open_store(
        config.store,
        &config.database_url,
        config.sqlite_max_connections,
    )
    .await?;

    let app = create_router(AppState::new(fact_store));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Facts API listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
