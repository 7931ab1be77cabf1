/*!
 * Process Types
 * Simulated processes and scheduling metrics
 */

use crate::core::types::{Pid, Priority, SimSeconds};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheduling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingPolicy {
    /// Preemptive, fixed time quantum, FIFO ready queue
    RoundRobin,
    /// Non-preemptive, ascending priority value
    Priority,
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SchedulingPolicy::RoundRobin => write!(f, "Round Robin"),
            SchedulingPolicy::Priority => write!(f, "Priority"),
        }
    }
}

/// A synthetic process as seen by the scheduler
///
/// Arrival is at time zero for every process; `id` order is arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimProcess {
    pub id: Pid,
    pub burst_time: SimSeconds,
    /// Lower is more urgent; zero when the policy ignores priorities
    pub priority: Priority,
    pub remaining_time: SimSeconds,
    pub wait_time: SimSeconds,
    /// Completion time, set exactly once
    pub turnaround_time: Option<SimSeconds>,
}

impl SimProcess {
    pub fn new(id: Pid, burst_time: SimSeconds) -> Self {
        Self {
            id,
            burst_time,
            priority: 0,
            remaining_time: burst_time,
            wait_time: 0,
            turnaround_time: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn is_complete(&self) -> bool {
        self.turnaround_time.is_some()
    }

    /// Consume up to `slice` seconds of remaining work, returning the time actually used
    pub(crate) fn run_for(&mut self, slice: SimSeconds) -> SimSeconds {
        let used = slice.min(self.remaining_time);
        self.remaining_time -= used;
        used
    }

    pub(crate) fn complete_at(&mut self, now: SimSeconds) {
        debug_assert_eq!(self.remaining_time, 0);
        debug_assert!(self.turnaround_time.is_none());
        self.turnaround_time = Some(now);
    }

    pub fn metrics(&self) -> ProcessMetrics {
        ProcessMetrics {
            id: self.id,
            burst_time: self.burst_time,
            priority: self.priority,
            wait_time: self.wait_time,
            turnaround_time: self.turnaround_time.unwrap_or(0),
        }
    }
}

/// Per-process result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessMetrics {
    pub id: Pid,
    pub burst_time: SimSeconds,
    pub priority: Priority,
    pub wait_time: SimSeconds,
    pub turnaround_time: SimSeconds,
}

/// One contiguous stretch of CPU time granted to a process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Slice {
    pub pid: Pid,
    pub start: SimSeconds,
    pub length: SimSeconds,
    pub remaining_after: SimSeconds,
    pub completed: bool,
}

impl Slice {
    pub fn end(&self) -> SimSeconds {
        self.start + self.length
    }
}
