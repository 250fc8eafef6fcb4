use fc_api::{ApiConfig, ApiState};

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    let config = ApiConfig::from_shuttle_secrets(&secrets)
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    // Shuttle installs its own tracing subscriber

    let metrics_handle = fc_api::metrics::init_metrics()?;
    tracing::info!("Prometheus metrics exporter initialized");

    let state = ApiState::new(&config)?;

    let app = fc_api::router::app(state, &config, metrics_handle);

    tracing::info!(environment = ?config.environment, "Flashcards API ready");

    Ok(app.into())
}
