use axum::{Json, Router, extract::State, routing::post};
use validator::Validate;

use super::{
    models::{LoginRequest, LoginResponse, SignupResponse},
    service,
};
use crate::{
    ApiState,
    error::ApiError,
    middleware::rate_limit::{self, apply_timing_safe},
};

pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    let routes = Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup));

    apply_timing_safe(routes).layer(make_rate_limit_layer!(
        rate_limit::AUTH_REPLENISH_MS,
        rate_limit::AUTH_BURST_SIZE
    ))
}

async fn login(
    State(state): State<ApiState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    payload.validate()?;

    let response = service::login(&state.supabase, &payload).await?;

    Ok(Json(response))
}

async fn signup(
    State(state): State<ApiState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    payload.validate()?;

    let response = service::signup(&state.supabase, &payload).await?;

    Ok(Json(response))
}
