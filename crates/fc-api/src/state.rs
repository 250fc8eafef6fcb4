use std::fmt;

use axum::extract::FromRef;
use fc_db::SupabaseClient;

use crate::{ApiConfig, config::Environment};

/// Shared, immutable request-handler state
#[derive(Clone, Debug)]
pub struct ApiState {
    pub supabase: SupabaseClient,
    pub environment: Environment,
    pub auth: AuthConfig,
}

/// Token verification settings for the `Caller` extractor
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// Verification is off when this is `None`
    pub jwt_secret: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("enforced", &self.jwt_secret.is_some())
            .finish()
    }
}

impl ApiState {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let supabase = fc_db::create_client(&config.supabase_url, &config.supabase_key)?;

        let jwt_secret = config
            .supabase_jwt_secret
            .clone()
            .filter(|secret| !secret.is_empty());

        if jwt_secret.is_none() {
            tracing::warn!(
                "SUPABASE_JWT_SECRET not set, data routes trust caller-supplied user ids"
            );
        }

        Ok(Self {
            supabase,
            environment: config.environment.clone(),
            auth: AuthConfig { jwt_secret },
        })
    }
}

impl FromRef<ApiState> for AuthConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.auth.clone()
    }
}
