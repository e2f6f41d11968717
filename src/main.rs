mod app;
mod calories;
mod config;
mod db;
mod error;
mod routes;
mod state;
mod store;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "calorie_tracker=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    let app_state = AppState::init(config);

    // Requests reconnect on demand, so a store that is down at boot is not fatal.
    if let Err(e) = app_state.store.ensure_connected().await {
        tracing::warn!(error = %e, "MongoDB not reachable at startup; will retry per request");
    }

    let app = app::build_app(app_state.clone());
    let served = app::serve(&app_state.config, app, app::shutdown_signal()).await;

    app_state.store.shutdown().await;
    served
}
