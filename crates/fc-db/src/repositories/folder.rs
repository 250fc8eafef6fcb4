use crate::{
    Filter, ProviderError, SupabaseClient,
    models::{NewFolder, Row},
};

const TABLE: &str = "folders";

/// All folders owned by `user_id`, empty when there are none
pub async fn get_folders_by_user(
    client: &SupabaseClient,
    user_id: &str,
) -> Result<Vec<Row>, ProviderError> {
    client
        .select(TABLE, "*", &[Filter::eq("user_id", user_id)])
        .await
}

pub async fn insert_folder(
    client: &SupabaseClient,
    folder: &NewFolder<'_>,
) -> Result<Vec<Row>, ProviderError> {
    client.insert(TABLE, folder).await
}

/// Delete the folder with this id. Decks inside it are left in place.
pub async fn delete_folder(client: &SupabaseClient, folder_id: &str) -> Result<(), ProviderError> {
    client.delete(TABLE, &[Filter::eq("id", folder_id)]).await
}
