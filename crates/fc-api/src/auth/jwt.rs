use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Audience the provider puts in tokens of signed-in users
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// Claims of a provider-issued access token
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: String,
    pub exp: usize,
}

/// Verify an HS256 access token signed with the project's JWT secret.
///
/// Only session tokens of signed-in users pass. Project API keys are signed
/// with the same secret but carry no audience and no subject, so both claims
/// are required and the subject must be non-empty.
pub fn verify_access_token(token: &str, jwt_secret: &str) -> Result<Claims, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[AUTHENTICATED_AUDIENCE]);
    validation.set_required_spec_claims(&["exp", "aud", "sub"]);

    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "rejected access token");
        ApiError::Auth("Invalid or expired token".to_string())
    })?;

    if token_data.claims.sub.trim().is_empty() {
        tracing::debug!("rejected access token without subject");
        return Err(ApiError::Auth("Invalid or expired token".to_string()));
    }

    Ok(token_data.claims)
}
