use std::sync::Arc;

use didx_bot::config::AppConfig;
use didx_bot::routes::configure_routes;
use didx_bot::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let state = AppState::from_config(&config).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to create LLM client");
        std::process::exit(1);
    });

    if let Err(e) = state.screenshots.init().await {
        tracing::error!(error = %e, dir = %state.screenshots.dir().display(), "Failed to create screenshot directory");
        std::process::exit(1);
    }

    tracing::info!(
        addr = %config.bind_addr,
        model = %config.openai_model,
        db_host = %config.database.host,
        "Starting server"
    );

    let routes = configure_routes(Arc::new(state));
    warp::serve(routes).run(config.bind_addr).await;
}
