use fc_db::{
    ProviderError, SupabaseClient,
    models::{Credentials, NewProfile},
    repositories::{auth, profile},
};

use super::{
    email::derive_email,
    models::{LoginRequest, LoginResponse, SignupResponse},
};
use crate::{error::ApiError, metrics};

pub const SIGNUP_SUCCESS_MESSAGE: &str = "User created successfully";

/// Sign in with a username and password.
///
/// Every failure, whether a wrong password, an unknown account or an
/// unreachable provider, is reported as `InvalidCredentials`.
pub async fn login(
    client: &SupabaseClient,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let email = derive_email(&request.username);
    let credentials = Credentials {
        email: &email,
        password: &request.password,
    };

    let session = metrics::observe_provider_call(
        "auth.sign_in",
        auth::sign_in_with_password(client, &credentials),
    )
    .await
    .map_err(|e| {
        tracing::info!(username = %request.username, error = %e, "Login rejected");
        metrics::record_auth_event("login", false);
        ApiError::InvalidCredentials
    })?;

    metrics::record_auth_event("login", true);

    Ok(LoginResponse {
        access_token: session.access_token,
        user: session.user,
    })
}

/// Create an account, then its profile row.
///
/// The two provider calls are independent: when the profile insert fails the
/// account already exists and is left as is.
pub async fn signup(
    client: &SupabaseClient,
    request: &LoginRequest,
) -> Result<SignupResponse, ApiError> {
    let email = derive_email(&request.username);
    let credentials = Credentials {
        email: &email,
        password: &request.password,
    };

    let account = metrics::observe_provider_call("auth.sign_up", auth::sign_up(client, &credentials))
        .await
        .map_err(|e| signup_failed(&request.username, e))?;

    let new_profile = NewProfile {
        id: &account.user.id,
        username: &request.username,
    };

    metrics::observe_provider_call(
        "profiles.insert",
        profile::insert_profile(client, &new_profile),
    )
    .await
    .map_err(|e| {
        tracing::warn!(
            user_id = %account.user.id,
            "Account created but profile insert failed, account left without profile"
        );
        signup_failed(&request.username, e)
    })?;

    metrics::record_auth_event("signup", true);
    tracing::info!(
        user_id = %account.user.id,
        confirmation_pending = account.session.is_none(),
        "Account created"
    );

    Ok(SignupResponse {
        message: SIGNUP_SUCCESS_MESSAGE,
        user: account.user,
    })
}

fn signup_failed(username: &str, err: ProviderError) -> ApiError {
    tracing::info!(%username, error = %err, "Signup rejected");
    metrics::record_auth_event("signup", false);

    ApiError::BadRequest(err.to_string())
}
