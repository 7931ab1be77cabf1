/*!
 * Run Tracing
 * Structured tracing for simulation runs using the tracing crate
 *
 * Features:
 * - Run ID generation for correlating a report with its log lines
 * - JSON-formatted logs for structured parsing
 * - Elapsed-time recording when a run finishes
 */

use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Logs are written to stderr so that reports on stdout stay clean.
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - OSSIM_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("OSSIM_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_names(true)
                    .compact(),
            )
            .try_init()
    };

    if result.is_ok() {
        debug!(json = use_json, "Structured tracing initialized");
    }
}

/// Generate a unique run ID
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one simulation run
pub struct RunSpan {
    span: tracing::Span,
    start: Instant,
    command: String,
    run_id: String,
}

impl RunSpan {
    pub fn new(command: &str) -> Self {
        let run_id = generate_run_id();

        let span = span!(
            Level::INFO,
            "run",
            run_id = %run_id,
            command = command,
            duration_ms = tracing::field::Empty,
            result = tracing::field::Empty,
        );

        {
            let _entered = span.enter();
            info!(command = command, run_id = %run_id, "simulation started");
        }

        Self {
            span,
            start: Instant::now(),
            command: command.to_string(),
            run_id,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Enter the span context on the current thread
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }

    pub fn record_result(&self, success: bool) {
        self.span
            .record("result", if success { "success" } else { "error" });
    }

    pub fn record_error(&self, error: &str) {
        self.span.record("result", "error");
        let _entered = self.span.enter();
        warn!(command = %self.command, error = error, "simulation failed");
    }
}

impl Drop for RunSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        self.span.record("duration_ms", duration.as_millis() as u64);
        let _entered = self.span.enter();
        info!(
            run_id = %self.run_id,
            command = %self.command,
            duration_ms = duration.as_millis() as u64,
            "simulation finished"
        );
    }
}
