/*!
 * CPU Scheduler Simulation
 * Discrete-event Round Robin and Priority scheduling over synthetic processes
 *
 * Single-threaded: "running" a slice blocks the simulation thread for the
 * slice length scaled by the clock's time unit. All metrics are computed on
 * the simulated clock, so they do not depend on real sleep accuracy.
 */

use super::types::{SchedulingPolicy, SimProcess, Slice};
use crate::core::errors::SimResult;
use crate::core::limits::DEFAULT_QUANTUM;
use crate::core::time::SimClock;
use crate::core::types::SimSeconds;
use std::io::Write;
use tracing::info;

mod priority;
mod report;
mod round_robin;

pub use report::ScheduleReport;

/// CPU scheduler
pub struct Scheduler {
    policy: SchedulingPolicy,
    quantum: SimSeconds,
    clock: SimClock,
}

/// Outcome of a scheduling loop before report assembly
pub(super) struct Outcome {
    pub completed: Vec<SimProcess>,
    pub timeline: Vec<Slice>,
    pub interrupted: bool,
}

impl Scheduler {
    /// Create a round-robin scheduler; a zero quantum is raised to one second
    pub fn round_robin(quantum: SimSeconds, clock: SimClock) -> Self {
        Self {
            policy: SchedulingPolicy::RoundRobin,
            quantum: quantum.max(1),
            clock,
        }
    }

    /// Create a non-preemptive priority scheduler
    pub fn priority(clock: SimClock) -> Self {
        Self {
            policy: SchedulingPolicy::Priority,
            quantum: DEFAULT_QUANTUM,
            clock,
        }
    }

    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    pub fn quantum(&self) -> SimSeconds {
        self.quantum
    }

    /// Run the processes to completion (or until cancelled)
    ///
    /// Progress lines are written to `out` as the simulation advances.
    pub fn run(&self, processes: Vec<SimProcess>, out: &mut dyn Write) -> SimResult<ScheduleReport> {
        info!(
            policy = ?self.policy,
            quantum = self.quantum,
            processes = processes.len(),
            "Scheduler simulation starting"
        );

        let total = processes.len();
        let outcome = match self.policy {
            SchedulingPolicy::RoundRobin => self.run_round_robin(processes, out)?,
            SchedulingPolicy::Priority => self.run_priority(processes, out)?,
        };

        if outcome.interrupted {
            writeln!(out, "\nSimulation interrupted!")?;
        } else {
            writeln!(out, "\nSimulation complete!")?;
        }

        Ok(ScheduleReport::assemble(self, total, outcome))
    }
}

/// Header table printed before the run starts
pub(super) fn write_process_table(
    out: &mut dyn Write,
    processes: &[SimProcess],
    with_priority: bool,
) -> SimResult<()> {
    if with_priority {
        writeln!(out, "\nProcess ID\tBurst Time\tPriority (lower is higher)")?;
        for p in processes {
            writeln!(out, "{}\t\t{}s\t\t{}", p.id, p.burst_time, p.priority)?;
        }
    } else {
        writeln!(out, "\nProcess ID\tBurst Time\tRemaining Time")?;
        for p in processes {
            writeln!(out, "{}\t\t{}s\t\t{}s", p.id, p.burst_time, p.remaining_time)?;
        }
    }
    writeln!(out, "\nStarting simulation...\n")?;
    Ok(())
}
