use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, post},
};
use fc_db::{models::Row, repositories::deck};

use super::model::CreateDeck;
use crate::{
    ApiState,
    auth::Caller,
    error::ApiError,
    metrics::observe_provider_call,
    middleware::rate_limit,
    response::MessageResponse,
};

const DECK_DELETED: &str = "Deck and all its cards deleted.";

/// Create the deck routes
pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    Router::new()
        .route("/decks", post(create_deck))
        .route("/decks/{id}", delete(delete_deck))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_REPLENISH_MS,
            rate_limit::GENERAL_BURST_SIZE
        ))
}

/// Create a new deck
async fn create_deck(
    _caller: Caller,
    State(state): State<ApiState>,
    Json(payload): Json<CreateDeck>,
) -> Result<Json<Vec<Row>>, ApiError> {
    let inserted = observe_provider_call(
        "decks.insert",
        deck::insert_deck(&state.supabase, &payload.as_insert()),
    )
    .await?;

    tracing::info!(class_id = %payload.class_id, "Deck created");

    Ok(Json(inserted))
}

/// Delete a deck, leaving its cards in place
async fn delete_deck(
    _caller: Caller,
    State(state): State<ApiState>,
    Path(deck_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    observe_provider_call("decks.delete", deck::delete_deck(&state.supabase, &deck_id)).await?;

    Ok(Json(MessageResponse::new(DECK_DELETED)))
}
