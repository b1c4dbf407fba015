mod configuration;
mod error;
mod routes;
mod state;

use configuration::Settings;
use scout::orchestrator::Orchestrator;
use scout::providers::{anthropic::AnthropicProvider, brave::BraveSearch};
use scout::search::SearchInvoker;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env before reading any settings
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("scoutd=info,scout=info,tower_http=info")),
        )
        .init();

    let settings = Settings::new()?;

    let provider = AnthropicProvider::new(settings.anthropic_config())?;
    let search = BraveSearch::new(settings.brave_config())?;
    let orchestrator = Orchestrator::new(
        Arc::new(provider),
        SearchInvoker::new(Arc::new(search)),
    )
    .with_web_search(settings.tools.web_search);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::configure(AppState::new(orchestrator))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(settings.server.socket_addr()?).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
