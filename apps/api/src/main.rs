mod config;
mod document;
mod errors;
mod export;
mod media;
mod routes;
mod state;
mod store;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{InMemoryStore, KvStore, RedisStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume wizard API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn KvStore> = match &config.redis_url {
        Some(url) => Arc::new(
            RedisStore::connect(url, config.storage_quota_bytes, config.session_ttl_secs).await?,
        ),
        None => {
            info!("REDIS_URL not set, sessions are kept in memory");
            Arc::new(
                InMemoryStore::new(config.storage_quota_bytes)
                    .with_ttl(Duration::from_secs(config.session_ttl_secs)),
            )
        }
    };
    info!(
        "Session quota {} bytes, export scale {}x",
        config.storage_quota_bytes, config.export_scale
    );

    let state = AppState {
        store,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
