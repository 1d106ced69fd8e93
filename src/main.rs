use std::sync::Arc;
use std::time::Instant;

use btc_positions::api::router::create_router;
use btc_positions::config::AppConfig;
use btc_positions::store::PgStore;
use btc_positions::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let store = PgStore::connect(&config.database_url, &config.table_name).await?;
    tracing::info!(table = %config.table_name, "Database connected");

    let state = AppState {
        store: Arc::new(store),
        config,
        started_at: Instant::now(),
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
