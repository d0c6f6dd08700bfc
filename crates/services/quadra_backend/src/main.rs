// File: crates/services/quadra_backend/src/main.rs
use quadra_backend::{build_app, AppState};
use quadra_common::logging;
use quadra_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = Arc::new(load_config()?);
    let state = AppState::new(config.clone()).await?;
    let app = build_app(&state)?;

    // Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
