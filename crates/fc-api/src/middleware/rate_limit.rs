//! Per-client-IP rate limiting.
//!
//! Clients are keyed with `SmartIpKeyExtractor`, which reads `X-Forwarded-For`,
//! `X-Real-IP` or `Forwarded` before falling back to the peer address, so the
//! server must be run with connect info when not behind a proxy.

use std::time::Duration;

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
};

/// Login and signup: 5 requests per second (one every 200ms) with burst of 10
pub const AUTH_REPLENISH_MS: u64 = 200;
pub const AUTH_BURST_SIZE: u32 = 10;

/// Folder, deck and card routes: 10 requests per second with burst of 20
pub const GENERAL_REPLENISH_MS: u64 = 100;
pub const GENERAL_BURST_SIZE: u32 = 20;

/// Build a `GovernorLayer` that refills one request every `$replenish_ms`
/// milliseconds, up to `$burst` at once.
///
/// A macro rather than a function so the layer's generic parameters never
/// have to be spelled out.
#[macro_export]
macro_rules! make_rate_limit_layer {
    ($replenish_ms:expr, $burst:expr) => {{
        let config = ::tower_governor::governor::GovernorConfigBuilder::default()
            .key_extractor(::tower_governor::key_extractor::SmartIpKeyExtractor)
            .per_millisecond($replenish_ms)
            .burst_size($burst)
            .finish()
            .expect("rate limit period and burst size must be non-zero");

        ::tower_governor::GovernorLayer::new(config)
    }};
}

/// Constant delay on responses from credential-checking endpoints so
/// response time does not reveal which check failed
pub async fn timing_safe_middleware(req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    tokio::time::sleep(Duration::from_millis(50)).await;

    response
}

/// Apply timing-safe middleware to a router
pub fn apply_timing_safe<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn(timing_safe_middleware))
}
