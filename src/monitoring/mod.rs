/*!
 * Monitoring
 * Structured logging and per-run tracing spans
 */

mod tracer;

pub use tracer::{generate_run_id, init_tracing, RunSpan};
