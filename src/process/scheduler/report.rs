/*!
 * Scheduler Report
 * Per-process and aggregate scheduling metrics
 */

use super::{Outcome, Scheduler};
use crate::core::report::{Report, RunHeader};
use crate::core::types::{Pid, SimSeconds};
use crate::process::types::{ProcessMetrics, SchedulingPolicy, Slice};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScheduleReport {
    pub header: RunHeader,
    pub policy: SchedulingPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantum: Option<SimSeconds>,
    pub total_processes: usize,
    /// Completed processes in completion order
    pub processes: Vec<ProcessMetrics>,
    pub timeline: Vec<Slice>,
    pub average_wait: f64,
    pub average_turnaround: f64,
    pub interrupted: bool,
}

impl ScheduleReport {
    pub(super) fn assemble(scheduler: &Scheduler, total: usize, outcome: Outcome) -> Self {
        let processes: Vec<ProcessMetrics> =
            outcome.completed.iter().map(|p| p.metrics()).collect();

        // Means cover completed processes; an interrupted run has fewer of them
        let (average_wait, average_turnaround) = if processes.is_empty() {
            (0.0, 0.0)
        } else {
            let n = processes.len() as f64;
            let wait: SimSeconds = processes.iter().map(|p| p.wait_time).sum();
            let turnaround: SimSeconds = processes.iter().map(|p| p.turnaround_time).sum();
            (wait as f64 / n, turnaround as f64 / n)
        };

        let policy = scheduler.policy();
        Self {
            header: RunHeader::new(&format!("{} Scheduling", policy)),
            policy,
            quantum: (policy == SchedulingPolicy::RoundRobin).then(|| scheduler.quantum()),
            total_processes: total,
            processes,
            timeline: outcome.timeline,
            average_wait,
            average_turnaround,
            interrupted: outcome.interrupted,
        }
    }

    pub fn with_header(mut self, header: RunHeader) -> Self {
        self.header = header;
        self
    }

    pub fn process(&self, id: Pid) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// Total simulated time covered by the timeline
    pub fn makespan(&self) -> SimSeconds {
        self.timeline.last().map(Slice::end).unwrap_or(0)
    }
}

impl fmt::Display for ScheduleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;
        if self.interrupted {
            writeln!(
                f,
                "Interrupted: {} of {} processes completed",
                self.processes.len(),
                self.total_processes
            )?;
        }

        writeln!(f, "\nProcess metrics:")?;
        match self.policy {
            SchedulingPolicy::RoundRobin => {
                writeln!(f, "Process ID\tBurst Time\tWait Time\tTurnaround Time")?;
                for p in &self.processes {
                    writeln!(
                        f,
                        "{}\t\t{}s\t\t{}s\t\t{}s",
                        p.id, p.burst_time, p.wait_time, p.turnaround_time
                    )?;
                }
            }
            SchedulingPolicy::Priority => {
                writeln!(f, "Process ID\tBurst Time\tPriority\tWait Time\tTurnaround Time")?;
                for p in &self.processes {
                    writeln!(
                        f,
                        "{}\t\t{}s\t\t{}\t\t{}s\t\t{}s",
                        p.id, p.burst_time, p.priority, p.wait_time, p.turnaround_time
                    )?;
                }
            }
        }

        writeln!(f, "\nAverage Wait Time: {:.2}s", self.average_wait)?;
        writeln!(f, "Average Turnaround Time: {:.2}s", self.average_turnaround)
    }
}

impl Report for ScheduleReport {
    fn summary(&self) -> String {
        if self.interrupted {
            format!("{} scheduling simulation interrupted.", self.policy)
        } else {
            format!("{} scheduling simulation completed.", self.policy)
        }
    }

    fn header(&self) -> &RunHeader {
        &self.header
    }
}
