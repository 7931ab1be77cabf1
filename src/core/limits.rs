/*!
 * Simulation Limits and Constants
 *
 * Centralized location for defaults, clamps, random ranges and delays.
 * Organized by engine. Delays are in simulated seconds and are scaled by the
 * configured time unit.
 */

use std::time::Duration;

// =============================================================================
// SCHEDULER
// =============================================================================

/// Default number of synthesized processes
pub const DEFAULT_PROCESS_COUNT: u32 = 10;

/// Largest process count a command will synthesize; larger requests are clamped
pub const MAX_PROCESS_COUNT: u32 = 1_000;

/// Default round-robin quantum (seconds)
pub const DEFAULT_QUANTUM: u64 = 1;

/// Burst time range (seconds, inclusive)
pub const MIN_BURST: u64 = 1;
pub const MAX_BURST: u64 = 5;

/// Priority range (inclusive, 1 is most urgent)
pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 10;

// =============================================================================
// PAGING
// =============================================================================

/// Default number of paging processes
pub const DEFAULT_PAGING_PROCESSES: usize = 4;

/// Largest paging process count a command accepts
pub const MAX_PAGING_PROCESSES: usize = 100;

/// Default number of physical frames
pub const DEFAULT_FRAMES: usize = 10;

/// Largest frame pool a command accepts
pub const MAX_FRAMES: usize = 1_000;

/// Page table size range per process (inclusive)
pub const MIN_PAGES_PER_PROCESS: usize = 2;
pub const MAX_PAGES_PER_PROCESS: usize = 5;

/// Memory references replayed per run
pub const TOTAL_REFERENCES: usize = 30;

/// Pause before the first reference
pub const PAGING_WARMUP_DELAY: f64 = 1.0;

/// Pause between references
pub const REFERENCE_DELAY: f64 = 0.5;

// =============================================================================
// DINING PHILOSOPHERS
// =============================================================================

pub const DEFAULT_PHILOSOPHERS: usize = 5;
pub const MIN_PHILOSOPHERS: usize = 2;
pub const MAX_PHILOSOPHERS: usize = 20;

/// Run duration (seconds)
pub const DEFAULT_DURATION: u64 = 20;
pub const MIN_DURATION: u64 = 5;
pub const MAX_DURATION: u64 = 120;

/// Thinking time range (seconds)
pub const THINK_RANGE: (f64, f64) = (0.5, 2.0);

/// Eating time range (seconds)
pub const EAT_RANGE: (f64, f64) = (0.5, 1.5);

/// Backoff after a failed attempt to take both forks
pub const RETRY_BACKOFF: f64 = 0.1;

/// Pause between taking the first and second fork
pub const FORK_REACH_DELAY: f64 = 0.1;

/// Display refresh period of the main monitor loop
pub const DISPLAY_REFRESH: f64 = 0.5;

/// Meal-count spread above which starvation is reported
pub const STARVATION_MEAL_SPREAD: u32 = 3;

// =============================================================================
// TIME SCALE
// =============================================================================

/// Real duration of one simulated second
pub const DEFAULT_TIME_UNIT: Duration = Duration::from_secs(1);

/// Smallest accepted time unit
pub const MIN_TIME_UNIT: Duration = Duration::from_micros(1);
