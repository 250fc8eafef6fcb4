use std::fmt;

use serde::Deserialize;

/// Deployment environment, selects log format and transport hardening
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Process settings, read once at start-up.
///
/// Field names map to upper-case environment variables (`SUPABASE_URL`,
/// `SUPABASE_KEY`, `ENVIRONMENT`, `HOST`, `PORT`, `ALLOWED_ORIGINS`,
/// `SUPABASE_JWT_SECRET`).
#[derive(Clone, Deserialize)]
pub struct ApiConfig {
    pub supabase_url: String,
    pub supabase_key: String,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Comma-separated CORS origins; any origin is allowed when unset
    pub allowed_origins: Option<String>,
    /// Project JWT secret; when set, data routes require a provider-issued token
    pub supabase_jwt_secret: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

/// Secret names read from the Shuttle secret store
#[cfg(feature = "shuttle")]
const SETTING_NAMES: &[&str] = &[
    "SUPABASE_URL",
    "SUPABASE_KEY",
    "ENVIRONMENT",
    "HOST",
    "PORT",
    "ALLOWED_ORIGINS",
    "SUPABASE_JWT_SECRET",
];

impl ApiConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Load from explicit `(NAME, value)` pairs instead of the process environment
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    #[cfg(feature = "shuttle")]
    pub fn from_shuttle_secrets(
        secrets: &shuttle_runtime::SecretStore,
    ) -> Result<Self, envy::Error> {
        Self::from_vars(
            SETTING_NAMES
                .iter()
                .filter_map(|name| secrets.get(name).map(|value| (name.to_string(), value))),
        )
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `None` means no origin list was configured
    pub fn parsed_allowed_origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .allowed_origins
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        (!origins.is_empty()).then_some(origins)
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("supabase_url", &self.supabase_url)
            .field("supabase_key", &"<redacted>")
            .field("environment", &self.environment)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("allowed_origins", &self.allowed_origins)
            .field(
                "supabase_jwt_secret",
                &self.supabase_jwt_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
