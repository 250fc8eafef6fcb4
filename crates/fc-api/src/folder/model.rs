use fc_db::models::NewFolder;
use serde::Deserialize;

/// Body of `POST /folders`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFolder {
    pub name: String,
    /// Owning account id, as returned by login
    pub user_id: String,
}

impl CreateFolder {
    pub fn as_insert(&self) -> NewFolder<'_> {
        NewFolder {
            name: &self.name,
            user_id: &self.user_id,
        }
    }
}
