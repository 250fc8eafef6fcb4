use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use super::jwt::verify_access_token;
use crate::{error::ApiError, state::AuthConfig};

/// Who is calling a data route.
///
/// Without a configured JWT secret every caller is `Unverified` and user ids
/// in paths and bodies are taken at face value. With one, a valid provider
/// access token is required in the `Authorization: Bearer` header.
///
/// # Example
/// ```
/// use axum::extract::{Path, State};
/// use fc_api::{ApiState, auth::Caller, error::ApiError};
///
/// async fn user_route(
///     caller: Caller,
///     State(state): State<ApiState>,
///     Path(user_id): Path<String>,
/// ) -> Result<(), ApiError> {
///     caller.ensure_owns(&user_id)?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Unverified,
    User { user_id: String },
}

impl Caller {
    /// Reject a verified caller acting on another account's data
    pub fn ensure_owns(&self, user_id: &str) -> Result<(), ApiError> {
        match self {
            Self::Unverified => Ok(()),
            Self::User { user_id: own, .. } if own == user_id => Ok(()),
            Self::User { .. } => Err(ApiError::Forbidden(
                "You are not authorized to access this user's data".to_string(),
            )),
        }
    }
}

impl<S> FromRequestParts<S> for Caller
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_config = AuthConfig::from_ref(state);

        let Some(secret) = auth_config.jwt_secret.as_deref() else {
            return Ok(Self::Unverified);
        };

        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::Auth("Not authenticated".to_string()))?;

        let claims = verify_access_token(token, secret)?;

        Ok(Self::User {
            user_id: claims.sub,
        })
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
