use std::net::SocketAddr;

use fc_api::{ApiConfig, ApiState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    fc_api::tracing::init_tracing(&config.environment);

    let metrics_handle = fc_api::metrics::init_metrics()?;

    // Fails here when the provider URL or key is unusable
    let state = ApiState::new(&config)?;

    let app = fc_api::router::app(state, &config, metrics_handle);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, environment = ?config.environment, "Server listening");

    // Peer addresses feed the rate limiter when no proxy header is present
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
