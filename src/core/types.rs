/*!
 * Core Types
 * Common types used across the simulation engines
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulated process ID
pub type Pid = u32;

/// Page index within its owning process
pub type PageId = usize;

/// Physical frame index
pub type FrameId = usize;

/// Philosopher index around the table
pub type PhilosopherId = usize;

/// Fork index around the table
pub type ForkId = usize;

/// Simulated time in whole seconds (scheduler clock)
pub type SimSeconds = u64;

/// Logical clock value (paging access/allocation order)
pub type Tick = u64;

/// Priority level (1-10, lower is more urgent)
pub type Priority = u8;

/// A lenient argument fix-up applied before a run starts
///
/// Out-of-range values are clamped and unparseable optional values fall back
/// to their defaults; each such fix-up is listed in the report header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Adjustment {
    pub parameter: String,
    pub given: String,
    pub applied: String,
}

impl Adjustment {
    pub fn new(parameter: &str, given: impl ToString, applied: impl ToString) -> Self {
        Self {
            parameter: parameter.to_string(),
            given: given.to_string(),
            applied: applied.to_string(),
        }
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' adjusted to {}",
            self.parameter, self.given, self.applied
        )
    }
}
