/*!
 * OS Simulation Engine Library
 * CPU scheduling, demand paging and dining philosophers simulations
 */

pub mod commands;
pub mod core;
pub mod memory;
pub mod monitoring;
pub mod process;
pub mod sync;

// Re-exports
pub use commands::{execute, Command, Context};
pub use crate::core::{CancelToken, OutputFormat, Report, RunHeader, SimClock, SimConfig, SimError, SimResult};
pub use memory::{PagingReport, PagingSimulation, PolicyKind};
pub use monitoring::{init_tracing, RunSpan};
pub use process::{ScheduleReport, Scheduler, SchedulingPolicy};
pub use sync::{DiningConfig, DiningReport, DiningSimulation, Fairness};
