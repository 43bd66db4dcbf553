use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

use class_clash::config::Config;
use class_clash::shared::core::clock::SystemClock;
use class_clash::shared::infrastructure::store::in_memory::InMemoryStore;
use class_clash::shared::infrastructure::store::sqlite::SqliteStore;
use class_clash::shell::http::router;
use class_clash::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env()?;
    let clock = Arc::new(SystemClock);

    let state = if config.uses_in_memory_store() {
        tracing::info!("using in-memory store");
        AppState::new(Arc::new(InMemoryStore::new()), clock, config.leaderboard_limit)
    } else {
        let store = SqliteStore::open(&config.db_path)
            .with_context(|| format!("failed to open database at {}", config.db_path))?;
        tracing::info!(db_path = %config.db_path, "using sqlite store");
        AppState::new(Arc::new(store), clock, config.leaderboard_limit)
    };

    let app = router(state);

    let addr = config.addr();
    tracing::info!("API listening on http://{}", addr);
    tracing::info!("GraphQL endpoint: http://{}/gql", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}
