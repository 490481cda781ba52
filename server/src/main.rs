use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_server::config::{Config, DEFAULT_LOG_FILTER};
use todo_server::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "configuration error");
            std::process::exit(1);
        }
    };

    let store = match todo_server::open_store(&config.storage).await {
        Ok(store) => store,
        Err(error) => {
            tracing::error!(%error, "failed to open store");
            std::process::exit(1);
        }
    };

    let listener = match TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, addr = %config.addr, "failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!(addr = %config.addr, storage = storage_name(&config), "listening");

    if let Err(error) = todo_server::run(listener, AppState::new(store)).await {
        tracing::error!(%error, "server error");
        std::process::exit(1);
    }
}

fn storage_name(config: &Config) -> &'static str {
    match config.storage {
        todo_server::config::Storage::Memory => "memory",
        todo_server::config::Storage::Postgres { .. } => "postgres",
    }
}
