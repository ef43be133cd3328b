use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "streamhub=info,tower_http=warn,sqlx=warn";
const DEFAULT_LOG_DIR: &str = "storage/logs";

/// Keeps the non-blocking file writer alive. Drop it only at shutdown, or
/// buffered log lines are lost.
#[must_use]
#[derive(Debug, Default)]
pub struct LogGuard {
    #[cfg(feature = "observability")]
    _file: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Installs the global subscriber: a compact console layer plus, when
/// observability is on, a daily-rolling JSON file under `LOG_DIR`.
///
/// `RUST_LOG` overrides the default filter. Calling this twice is harmless;
/// the second call leaves the first subscriber in place.
pub fn init_tracing() -> LogGuard {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .boxed();

    #[allow(unused_mut)]
    let mut guard = LogGuard::default();
    #[allow(unused_mut)]
    let mut layers = vec![console_layer];

    #[cfg(feature = "observability")]
    if crate::is_observability_enabled() {
        if let Some((file_layer, file_guard)) = json_file_layer() {
            layers.push(file_layer);
            guard._file = Some(file_guard);
        }
    }

    if tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()
        .is_err()
    {
        return guard;
    }

    if !crate::is_observability_enabled() {
        info!("Observability disabled - console logging only");
    }
    guard
}

#[cfg(feature = "observability")]
fn json_file_layer<S>() -> Option<(
    Box<dyn Layer<S> + Send + Sync>,
    tracing_appender::non_blocking::WorkerGuard,
)>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    use tracing_appender::rolling::{RollingFileAppender, Rotation};

    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create log directory {}: {}", log_dir, e);
        return None;
    }

    let appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "streamhub.json");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer()
        .json()
        .with_writer(writer)
        .with_ansi(false)
        .with_current_span(true)
        .with_span_list(true)
        .boxed();

    Some((layer, guard))
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let request_id = uuid::Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Incoming request"
    );

    let response = next.run(req).await;
    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    match status {
        400..=499 => warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            "Client error"
        ),
        500..=599 => error!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            "Server error"
        ),
        _ => info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            "Request completed"
        ),
    }

    response
}
