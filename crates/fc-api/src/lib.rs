pub mod auth;
pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod folder;
pub mod metrics;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;
pub mod tracing;

pub use config::ApiConfig;
pub use state::{ApiState, AuthConfig};
