pub mod client;
pub mod error;
pub mod models;
pub mod repositories;

pub use client::{Filter, SupabaseClient};
pub use error::ProviderError;

use anyhow::Context;

/// Create the provider client shared by every request handler.
///
/// Fails when either setting is blank so a misconfigured deployment stops at
/// start-up instead of on the first request.
pub fn create_client(url: &str, api_key: &str) -> anyhow::Result<SupabaseClient> {
    anyhow::ensure!(!url.trim().is_empty(), "provider URL must not be empty");
    anyhow::ensure!(!api_key.trim().is_empty(), "provider API key must not be empty");

    let client = SupabaseClient::new(url, api_key).context("failed to build provider client")?;

    Ok(client)
}
