mod api;
mod dashboard;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use brandpulse_db::MentionStore;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};
use crate::dashboard::DatasetCache;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = brandpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let store = MentionStore::new(&config.db_path);
    if !store.path().exists() {
        tracing::warn!(
            path = %store.path().display(),
            "database not found; run `brandpulse update` to collect mentions"
        );
    }
    let cache = DatasetCache::new(store, Duration::from_secs(config.cache_ttl_secs));
    let app = build_app(AppState {
        cache: Arc::new(cache),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "dashboard listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
