use std::fmt;

use serde::{Deserialize, Serialize};

/// Columns a model does not name, passed through as the provider sent them
pub type ExtraColumns = serde_json::Map<String, serde_json::Value>;

/// Table row exactly as the provider returned it.
///
/// Rows are never decoded into fixed shapes: columns may be null, ids may be
/// integers or UUID strings, and tables may carry columns this service never
/// names. Callers get them back unchanged.
pub type Row = serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct NewProfile<'a> {
    pub id: &'a str,
    pub username: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewFolder<'a> {
    pub name: &'a str,
    pub user_id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewDeck<'a> {
    pub title: &'a str,
    pub class_id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCard<'a> {
    pub deck_id: &'a str,
    pub term: &'a str,
    pub definition: &'a str,
}

/// Email/password pair sent to the auth service
#[derive(Clone, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account object returned by the auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraColumns,
}

/// Session issued by a successful sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

/// Outcome of account creation.
///
/// Projects with auto-confirm enabled answer with a full session; projects
/// that require email confirmation answer with the bare account.
#[derive(Debug, Clone)]
pub struct SignUp {
    pub user: AuthUser,
    pub session: Option<Session>,
}

impl SignUp {
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if value.get("access_token").is_some() {
            let session: Session = serde_json::from_value(value)?;
            return Ok(Self {
                user: session.user.clone(),
                session: Some(session),
            });
        }

        Ok(Self {
            user: serde_json::from_value(value)?,
            session: None,
        })
    }
}
