/*!
 * Memory Module
 * Paging simulation with pluggable page replacement
 */

pub mod physical;
pub mod policy;
pub mod report;
pub mod simulation;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use physical::PhysicalMemory;
pub use policy::{FifoPolicy, LruPolicy, PolicyKind};
pub use report::{PagingReport, ProcessFaults, ReferenceEvent};
pub use simulation::PagingSimulation;
pub use traits::*;
pub use types::*;
