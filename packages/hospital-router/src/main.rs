use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hospital_router::{
    app,
    config::Config,
    services::{HospitalStore, RouteClient},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hospital_router=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenv::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;

    info!("Starting hospital router");

    if config.api_key.is_empty() {
        warn!("API_KEY is not set; routing requests will likely be rejected");
    }

    let routes = RouteClient::new(config.route_client_config())?;
    let hospitals = HospitalStore::new(config.hospital_file.clone());

    // Warm the cache; a failure here is reported again on first use
    match hospitals.get_or_load().await {
        Ok(table) => info!("Hospital table ready with {} entries", table.len()),
        Err(e) => warn!("Failed to load hospital data: {}", e),
    }

    let router = app(AppState::new(hospitals, routes));

    let addr: std::net::SocketAddr = format!("0.0.0.0:{}", config.port)
        .parse()
        .context("Invalid listen address")?;
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, router)
        .await
        .context("Failed to start HTTP server")?;

    info!("Shutting down...");
    Ok(())
}
