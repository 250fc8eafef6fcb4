use fc_db::models::NewDeck;
use serde::Deserialize;

/// Body of `POST /decks`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDeck {
    pub title: String,
    /// Id of the folder the deck goes into
    pub class_id: String,
}

impl CreateDeck {
    pub fn as_insert(&self) -> NewDeck<'_> {
        NewDeck {
            title: &self.title,
            class_id: &self.class_id,
        }
    }
}
