//! SIGMET Server - serves en-route and airmen hazard advisories as GeoJSON.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sigmet_server::{api, config::Config, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sigmet_server=debug".parse()?),
        )
        .init();

    tracing::info!("Starting SIGMET Server...");

    let config = Config::from_env();
    tracing::info!(
        upstream = %config.upstream_url,
        cache_ttl_s = config.cache_ttl_s,
        "Advisory upstream configured"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let state = Arc::new(AppState::new(config));
    let app = api::app(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
