use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use fc_db::{models::Row, repositories::card};

use super::model::CreateCard;
use crate::{
    ApiState,
    auth::Caller,
    error::ApiError,
    metrics::observe_provider_call,
    middleware::rate_limit,
    response::MessageResponse,
};

const CARD_DELETED: &str = "Card deleted.";
const EMPTY_DECK: &str = "No cards found in this deck";

/// Create the card and quiz routes
///
/// `/cards/{id}` is a user id for `GET` and a card id for `DELETE`.
pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    Router::new()
        .route("/cards", post(create_card))
        .route("/cards/{id}", get(get_user_cards).delete(delete_card))
        .route("/quiz/{deck_id}", get(get_quiz))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_REPLENISH_MS,
            rate_limit::GENERAL_BURST_SIZE
        ))
}

/// Cards owned by a user, `[]` when there are none
async fn get_user_cards(
    caller: Caller,
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Row>>, ApiError> {
    caller.ensure_owns(&user_id)?;

    let cards = observe_provider_call(
        "cards.select",
        card::get_cards_by_user(&state.supabase, &user_id),
    )
    .await?;

    Ok(Json(cards))
}

/// Term/definition pairs of a deck; an empty deck is a 404
async fn get_quiz(
    _caller: Caller,
    State(state): State<ApiState>,
    Path(deck_id): Path<String>,
) -> Result<Json<Vec<Row>>, ApiError> {
    let cards = observe_provider_call(
        "cards.select_quiz",
        card::get_quiz_cards(&state.supabase, &deck_id),
    )
    .await?;

    if cards.is_empty() {
        return Err(ApiError::NotFound(EMPTY_DECK.to_string()));
    }

    Ok(Json(cards))
}

/// Insert a card. Provider failures come back as a 500 carrying the
/// provider's own message.
async fn create_card(
    _caller: Caller,
    State(state): State<ApiState>,
    Json(payload): Json<CreateCard>,
) -> Result<Json<Vec<Row>>, ApiError> {
    let inserted = observe_provider_call(
        "cards.insert",
        card::insert_card(&state.supabase, &payload.as_insert()),
    )
    .await
    .map_err(|e| ApiError::Upstream(e.to_string()))?;

    Ok(Json(inserted))
}

async fn delete_card(
    _caller: Caller,
    State(state): State<ApiState>,
    Path(card_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    observe_provider_call("cards.delete", card::delete_card(&state.supabase, &card_id)).await?;

    Ok(Json(MessageResponse::new(CARD_DELETED)))
}
