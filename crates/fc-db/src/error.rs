use serde::Deserialize;
use thiserror::Error;

/// Failure talking to the provider.
///
/// `Api` carries the provider's own message text unchanged; some routes hand
/// it straight back to the caller.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Invalid provider configuration: {0}")]
    Config(String),
    #[error("Provider request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected provider response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

/// Union of the auth service and table API error shapes.
///
/// Auth errors look like `{"code":422,"error_code":"...","msg":"..."}` or the
/// older `{"error":"invalid_grant","error_description":"..."}`; table errors
/// look like `{"code":"23505","message":"...","details":...,"hint":...}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    error_code: Option<String>,
    code: Option<serde_json::Value>,
}

impl ProviderError {
    /// Build an `Api` error from a non-success response body
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) else {
            return Self::Api {
                status,
                code: None,
                message: fallback_message(status, body),
            };
        };

        let code = parsed
            .error_code
            .or_else(|| match parsed.code {
                Some(serde_json::Value::String(code)) => Some(code),
                _ => None,
            })
            .or_else(|| parsed.error_description.as_ref().and(parsed.error.clone()));

        let message = parsed
            .msg
            .or(parsed.message)
            .or(parsed.error_description)
            .or(parsed.error)
            .unwrap_or_else(|| fallback_message(status, body));

        Self::Api {
            status,
            code,
            message,
        }
    }

    /// HTTP status returned by the provider, if the failure came from it
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn fallback_message(status: u16, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();

    if text.is_empty() {
        format!("Provider returned status {status}")
    } else {
        text.to_string()
    }
}
