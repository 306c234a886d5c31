//! Binary entrypoint for the meetmind server.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use meetmind_server::{create_app, AppState, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    // A .env file is a convenience for local runs; absence is fine.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("meetmind_server=info,meetmind_agent=info,tower_http=info")
        }))
        .init();

    let settings = Settings::from_env()?;
    info!("meetmind v{} starting", env!("CARGO_PKG_VERSION"));

    let state = AppState::from_settings(&settings)?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    info!("listening on {}", settings.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
