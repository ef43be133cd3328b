//! StreamHub Observability
//!
//! - Console and rolling-file logging via `tracing`
//! - Per-request logging middleware
//! - Prometheus metrics and auth business counters
//!
//! File logging and metrics are compiled in by the `observability` feature
//! (default) and can be switched off at runtime with
//! `OBSERVABILITY_ENABLED=false`. With the feature off, [`init_tracing`] sets
//! up console logging only and every metrics function is a no-op.
//!
//! ```no_run
//! #[tokio::main]
//! async fn main() {
//!     let _guard = streamhub_observability::init_tracing();
//!     let metrics = streamhub_observability::init_metrics();
//!     // ... build and serve the router ...
//! }
//! ```

pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use logging::{LogGuard, init_tracing, logging_middleware};

#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, metrics_app, metrics_middleware, track_login_failure, track_login_success,
    track_token_issued, track_token_refresh, track_user_registered,
};
#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub fn is_observability_enabled() -> bool {
    use std::sync::OnceLock;

    static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| parse_enabled(&v))
            .unwrap_or(true)
    })
}

#[cfg(not(feature = "observability"))]
pub fn is_observability_enabled() -> bool {
    false
}

#[allow(dead_code)]
fn parse_enabled(value: &str) -> bool {
    let value = value.trim();
    !(value.eq_ignore_ascii_case("false") || value == "0")
}

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    #[derive(Clone, Debug)]
    pub struct PrometheusHandle;

    pub fn init_metrics() -> Option<PrometheusHandle> {
        None
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn metrics_app(_handle: PrometheusHandle) -> Router {
        Router::new()
    }

    pub fn track_login_success() {}
    pub fn track_login_failure(_reason: &str) {}
    pub fn track_token_refresh(_status: &str) {}
    pub fn track_token_issued(_kind: &str) {}
    pub fn track_user_registered() {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
