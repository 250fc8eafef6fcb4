use crate::{
    ProviderError, SupabaseClient,
    models::{NewProfile, Row},
};

const TABLE: &str = "profiles";

pub async fn insert_profile(
    client: &SupabaseClient,
    profile: &NewProfile<'_>,
) -> Result<Vec<Row>, ProviderError> {
    client.insert(TABLE, profile).await
}
