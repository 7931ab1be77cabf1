/*!
 * Process Module
 * Synthetic processes and CPU scheduling simulation
 */

pub mod scheduler;
pub mod types;
pub mod workload;

// Re-export for convenience
pub use scheduler::{ScheduleReport, Scheduler};
pub use types::{ProcessMetrics, SchedulingPolicy, SimProcess, Slice};
pub use workload::{priority_workload, round_robin_workload};
