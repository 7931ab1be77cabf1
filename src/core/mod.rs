/*!
 * Core Module
 * Shared types, configuration, clock and error handling
 */

pub mod args;
pub mod config;
pub mod errors;
pub mod limits;
pub mod report;
pub mod time;
pub mod types;

// Re-export for convenience
pub use config::{OutputFormat, SimConfig};
pub use errors::*;
pub use report::{Report, RunHeader};
pub use time::{CancelToken, SimClock};
pub use types::*;
