use axum::{
    Router, http::StatusCode, middleware, response::IntoResponse, routing::get,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};

use crate::{
    ApiConfig, auth, card, deck, folder,
    metrics::{metrics_handler, track_metrics},
    middleware::{cors, request_id::request_id_middleware, security_headers},
    state::ApiState,
};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .merge(auth::routes())
        .merge(folder::routes())
        .merge(deck::routes())
        .merge(card::routes())
        .fallback(handler_404)
}

/// Full application: routes, `/metrics` and the cross-cutting layers
pub fn app(state: ApiState, config: &ApiConfig, metrics_handle: PrometheusHandle) -> Router {
    let cors = match config.parsed_allowed_origins() {
        Some(origins) => cors::create_cors_layer(origins),
        None => cors::permissive_cors_layer(),
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
        .on_response(DefaultOnResponse::new().level(tracing::Level::INFO));

    // Kept apart from the API state so scraping never touches the provider
    let metrics_app = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    let environment = state.environment.clone();

    let app = router()
        .with_state(state)
        .merge(metrics_app)
        .layer(cors)
        .layer(trace_layer)
        .layer(middleware::from_fn(track_metrics))
        .layer(middleware::from_fn(request_id_middleware));

    security_headers::apply_security_headers(app, environment)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({ "error": "The requested resource was not found" })),
    )
}
