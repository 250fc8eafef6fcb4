use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use fc_db::{models::Row, repositories::folder};

use super::model::CreateFolder;
use crate::{
    ApiState,
    auth::Caller,
    error::ApiError,
    metrics::observe_provider_call,
    middleware::rate_limit,
    response::MessageResponse,
};

const FOLDER_DELETED: &str = "Folder and all its decks deleted";

/// Create the folder routes
///
/// `/folders/{id}` is a user id for `GET` and a folder id for `DELETE`.
pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    Router::new()
        .route("/dashboard/{user_id}", get(get_dashboard))
        .route("/folders", post(create_folder))
        .route("/folders/{id}", get(get_user_folders).delete(delete_folder))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_REPLENISH_MS,
            rate_limit::GENERAL_BURST_SIZE
        ))
}

/// Folders shown on a user's landing page
async fn get_dashboard(
    caller: Caller,
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Row>>, ApiError> {
    folders_of(&caller, &state, &user_id).await
}

async fn get_user_folders(
    caller: Caller,
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Row>>, ApiError> {
    folders_of(&caller, &state, &user_id).await
}

async fn folders_of(
    caller: &Caller,
    state: &ApiState,
    user_id: &str,
) -> Result<Json<Vec<Row>>, ApiError> {
    caller.ensure_owns(user_id)?;

    let folders = observe_provider_call(
        "folders.select",
        folder::get_folders_by_user(&state.supabase, user_id),
    )
    .await?;

    Ok(Json(folders))
}

async fn create_folder(
    caller: Caller,
    State(state): State<ApiState>,
    Json(payload): Json<CreateFolder>,
) -> Result<Json<Vec<Row>>, ApiError> {
    caller.ensure_owns(&payload.user_id)?;

    let inserted = observe_provider_call(
        "folders.insert",
        folder::insert_folder(&state.supabase, &payload.as_insert()),
    )
    .await?;

    tracing::info!(user_id = %payload.user_id, "Folder created");

    Ok(Json(inserted))
}

/// Deletes the folder row only; its decks stay behind
async fn delete_folder(
    _caller: Caller,
    State(state): State<ApiState>,
    Path(folder_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    observe_provider_call(
        "folders.delete",
        folder::delete_folder(&state.supabase, &folder_id),
    )
    .await?;

    Ok(Json(MessageResponse::new(FOLDER_DELETED)))
}
