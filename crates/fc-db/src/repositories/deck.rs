use crate::{
    Filter, ProviderError, SupabaseClient,
    models::{NewDeck, Row},
};

const TABLE: &str = "decks";

pub async fn insert_deck(
    client: &SupabaseClient,
    deck: &NewDeck<'_>,
) -> Result<Vec<Row>, ProviderError> {
    client.insert(TABLE, deck).await
}

/// Delete the deck with this id. Cards inside it are left in place.
pub async fn delete_deck(client: &SupabaseClient, deck_id: &str) -> Result<(), ProviderError> {
    client.delete(TABLE, &[Filter::eq("id", deck_id)]).await
}
