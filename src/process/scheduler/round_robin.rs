/*!
 * Round Robin Loop
 * FIFO ready queue with a fixed time quantum
 */

use super::{write_process_table, Outcome, Scheduler};
use crate::core::errors::SimResult;
use crate::process::types::{SimProcess, Slice};
use std::collections::VecDeque;
use std::io::Write;
use tracing::{debug, warn};

impl Scheduler {
    pub(super) fn run_round_robin(
        &self,
        processes: Vec<SimProcess>,
        out: &mut dyn Write,
    ) -> SimResult<Outcome> {
        writeln!(
            out,
            "Simulating Round Robin scheduling with {} processes and time quantum = {}s",
            processes.len(),
            self.quantum
        )?;
        write_process_table(out, &processes, false)?;

        let mut ready: VecDeque<SimProcess> = processes.into();
        let mut completed = Vec::with_capacity(ready.len());
        let mut timeline = Vec::new();
        let mut now = 0;
        let mut interrupted = false;

        while let Some(mut current) = ready.pop_front() {
            if self.clock.is_cancelled() {
                warn!(pending = ready.len() + 1, "Round robin interrupted");
                interrupted = true;
                break;
            }

            let finishing = current.remaining_time <= self.quantum;
            let start = now;
            let slice = current.run_for(self.quantum);

            if finishing {
                writeln!(out, "Running Process {} for {}s [COMPLETING]", current.id, slice)?;
            } else {
                writeln!(
                    out,
                    "Running Process {} for {}s [remaining: {}s]",
                    current.id, slice, current.remaining_time
                )?;
            }
            self.clock.sleep(slice as f64);
            now += slice;

            debug!(
                pid = current.id,
                start,
                slice,
                remaining = current.remaining_time,
                "Slice finished"
            );

            // Only processes sitting in the queue accrue wait time for this slice
            for waiting in ready.iter_mut() {
                waiting.wait_time += slice;
            }

            timeline.push(Slice {
                pid: current.id,
                start,
                length: slice,
                remaining_after: current.remaining_time,
                completed: finishing,
            });

            if finishing {
                current.complete_at(now);
                completed.push(current);
            } else {
                ready.push_back(current);
            }
        }

        Ok(Outcome {
            completed,
            timeline,
            interrupted,
        })
    }
}
