use crate::{
    Filter, ProviderError, SupabaseClient,
    models::{NewCard, Row},
};

const TABLE: &str = "cards";

pub async fn get_cards_by_user(
    client: &SupabaseClient,
    user_id: &str,
) -> Result<Vec<Row>, ProviderError> {
    client
        .select(TABLE, "*", &[Filter::eq("user_id", user_id)])
        .await
}

/// Term/definition pairs of every card in a deck
pub async fn get_quiz_cards(
    client: &SupabaseClient,
    deck_id: &str,
) -> Result<Vec<Row>, ProviderError> {
    client
        .select(TABLE, "term,definition", &[Filter::eq("deck_id", deck_id)])
        .await
}

pub async fn insert_card(
    client: &SupabaseClient,
    card: &NewCard<'_>,
) -> Result<Vec<Row>, ProviderError> {
    client.insert(TABLE, card).await
}

pub async fn delete_card(client: &SupabaseClient, card_id: &str) -> Result<(), ProviderError> {
    client.delete(TABLE, &[Filter::eq("id", card_id)]).await
}
