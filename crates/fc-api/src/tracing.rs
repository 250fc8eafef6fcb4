//! Log output for the API process.
//!
//! Development gets pretty, multi-line events with source locations and
//! provider request traces from `fc_db`. Production gets one flattened JSON
//! object per event; the enclosing `request` span is attached so every line
//! carries its `request_id`, and provider-call failures keep their
//! `provider_status` field. `RUST_LOG` replaces the default directives.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Filter used when `RUST_LOG` is unset
const fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Development => "debug,fc_db=debug,tower_http=debug,hyper_util=info,reqwest=info",
        Environment::Production => "info,fc_db=info,tower_http=info,hyper_util=warn,reqwest=warn",
    }
}

/// Install the global subscriber. Call once, before serving.
pub fn init_tracing(env: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    // Exactly one of the two formatters is active
    let (pretty, json) = if env.is_production() {
        let json = tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .flatten_event(true)
            .with_target(true);
        (None, Some(json))
    } else {
        let pretty = tracing_subscriber::fmt::layer()
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .with_target(true);
        (Some(pretty), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .init();

    tracing::info!(environment = ?env, "Tracing initialized");
}
