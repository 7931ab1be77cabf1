/*!
 * Synchronization Module
 * Dining philosophers: ordered try-lock fork acquisition under contention
 */

pub mod fork;
pub mod monitor;
pub mod philosopher;
pub mod report;
pub mod simulation;

// Re-export for convenience
pub use fork::{Fork, ForkGuard};
pub use monitor::{DisplayMonitor, PhilosopherState, PhilosopherView, TableSnapshot};
pub use philosopher::{Philosopher, PhilosopherStats, Table, Timing};
pub use report::{DiningReport, Fairness};
pub use simulation::{DiningConfig, DiningSimulation, LiveView};
