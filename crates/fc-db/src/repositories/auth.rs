use crate::{
    ProviderError, SupabaseClient,
    models::{Credentials, Session, SignUp},
};

/// Exchange an email/password pair for a session
pub async fn sign_in_with_password(
    client: &SupabaseClient,
    credentials: &Credentials<'_>,
) -> Result<Session, ProviderError> {
    client
        .auth_post("token", &[("grant_type", "password")], credentials)
        .await
}

/// Create an account
pub async fn sign_up(
    client: &SupabaseClient,
    credentials: &Credentials<'_>,
) -> Result<SignUp, ProviderError> {
    let response: serde_json::Value = client.auth_post("signup", &[], credentials).await?;

    Ok(SignUp::from_value(response)?)
}
