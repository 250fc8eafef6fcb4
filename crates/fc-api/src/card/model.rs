use fc_db::models::NewCard;
use serde::Deserialize;

/// Body of `POST /cards`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCard {
    pub deck_id: String,
    pub term: String,
    pub definition: String,
}

impl CreateCard {
    pub fn as_insert(&self) -> NewCard<'_> {
        NewCard {
            deck_id: &self.deck_id,
            term: &self.term,
            definition: &self.definition,
        }
    }
}
