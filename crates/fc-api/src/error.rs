use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fc_db::ProviderError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Every login failure, whatever the provider said
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    Forbidden(String),
    /// Provider failure whose text is handed back to the caller as a 500
    #[error("{0}")]
    Upstream(String),
    /// Provider failure that is logged and reported without detail
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl ApiError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Upstream(_) | Self::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            Self::Provider(err) => {
                tracing::error!(
                    error = %err,
                    provider_status = ?err.status(),
                    "Provider call failed"
                );
                "Internal server error".to_string()
            }
            Self::Upstream(message) => {
                tracing::error!(error = %message, "Provider call failed");
                message.clone()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
