pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod seed;
pub mod store;

pub use api::handlers;
pub use api::routes;

pub use error::{ApiError, ModelError};
pub use model::*;
pub use seed::*;
pub use store::{MemoryStore, PostgresStore, YarnStore};

use crate::config::{AppConfig, StoreBackend};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Load configuration, open the configured store and serve until shutdown
pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info,sqlx=warn"))
        .try_init();

    let config = AppConfig::load()?;
    log::info!(
        "Configuration loaded: server={}:{} backend={:?}",
        config.server.host,
        config.server.port,
        config.database.backend
    );

    let listener = TcpListener::bind(config.server_address()).await?;

    match config.database.backend {
        StoreBackend::Postgres => {
            log::info!("Connecting to PostgreSQL...");
            let store = PostgresStore::new(&config.database_url(), config.max_connections()).await?;
            log::info!("Running database migrations...");
            store.migrate().await?;
            serve(listener, Arc::new(store), &config).await
        }
        StoreBackend::Memory => {
            log::warn!("Using the in-memory store; yarns will not survive a restart");
            serve(listener, Arc::new(MemoryStore::new()), &config).await
        }
    }
}

/// Seed the store if configured, then serve the app on an already bound listener
pub async fn serve<S: YarnStore + 'static>(
    listener: TcpListener,
    store: Arc<S>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    if config.library.load_seed_data {
        log::info!("Loading seed data...");
        seed::load_seed_data(&*store).await?;
    }

    let app = routes::create_router(&config.library.static_dir).with_state(store);

    log::info!("Yarn library running on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
