/*!
 * Priority Loop
 * Non-preemptive, ascending priority value, ties in arrival order
 */

use super::{write_process_table, Outcome, Scheduler};
use crate::core::errors::SimResult;
use crate::process::types::{SimProcess, Slice};
use std::io::Write;
use tracing::{debug, warn};

impl Scheduler {
    pub(super) fn run_priority(
        &self,
        mut processes: Vec<SimProcess>,
        out: &mut dyn Write,
    ) -> SimResult<Outcome> {
        writeln!(
            out,
            "Simulating Priority scheduling with {} processes",
            processes.len()
        )?;
        write_process_table(out, &processes, true)?;

        // sort_by_key is stable: equal priorities keep generation order
        processes.sort_by_key(|p| p.priority);

        let mut completed = Vec::with_capacity(processes.len());
        let mut timeline = Vec::with_capacity(processes.len());
        let mut now = 0;
        let mut interrupted = false;

        for mut process in processes {
            if self.clock.is_cancelled() {
                warn!(completed = completed.len(), "Priority scheduling interrupted");
                interrupted = true;
                break;
            }

            writeln!(
                out,
                "Running Process {} (priority: {}) for {}s",
                process.id, process.priority, process.burst_time
            )?;

            process.wait_time = now;
            let start = now;
            let slice = process.run_for(process.burst_time);
            self.clock.sleep(slice as f64);
            now += slice;
            process.complete_at(now);

            debug!(pid = process.id, priority = process.priority, start, slice, "Process finished");

            timeline.push(Slice {
                pid: process.id,
                start,
                length: slice,
                remaining_after: 0,
                completed: true,
            });
            completed.push(process);
        }

        Ok(Outcome {
            completed,
            timeline,
            interrupted,
        })
    }
}
