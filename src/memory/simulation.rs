/*!
 * Paging Simulation
 * Replays a reference string against physical memory and collects statistics
 */

use super::physical::PhysicalMemory;
use super::policy::PolicyKind;
use super::report::{PagingReport, ProcessFaults, ReferenceEvent};
use super::types::{MemoryReference, PagingProcess};
use crate::core::errors::SimResult;
use crate::core::limits::{
    MAX_PAGES_PER_PROCESS, MIN_PAGES_PER_PROCESS, PAGING_WARMUP_DELAY, REFERENCE_DELAY,
};
use crate::core::time::SimClock;
use rand::Rng;
use std::io::Write;
use tracing::{info, warn};

pub struct PagingSimulation {
    memory: PhysicalMemory,
    processes: Vec<PagingProcess>,
    clock: SimClock,
}

impl PagingSimulation {
    /// Build a simulation from explicit page counts, one process per entry
    ///
    /// An empty list yields a single one-page process.
    pub fn new(policy: PolicyKind, page_counts: &[usize], num_frames: usize, clock: SimClock) -> Self {
        let page_counts = if page_counts.is_empty() { &[1][..] } else { page_counts };
        let processes = page_counts
            .iter()
            .enumerate()
            .map(|(pid, &pages)| PagingProcess::new(pid as u32, pages.max(1)))
            .collect();
        Self {
            memory: PhysicalMemory::new(num_frames, policy),
            processes,
            clock,
        }
    }

    /// Build a simulation whose processes own between 2 and 5 pages each
    pub fn synthesize<R: Rng + ?Sized>(
        policy: PolicyKind,
        num_processes: usize,
        num_frames: usize,
        clock: SimClock,
        rng: &mut R,
    ) -> Self {
        let counts: Vec<usize> = (0..num_processes.max(1))
            .map(|_| rng.gen_range(MIN_PAGES_PER_PROCESS..=MAX_PAGES_PER_PROCESS))
            .collect();
        Self::new(policy, &counts, num_frames, clock)
    }

    pub fn processes(&self) -> &[PagingProcess] {
        &self.processes
    }

    pub fn memory(&self) -> &PhysicalMemory {
        &self.memory
    }

    /// Uniform random process, then uniform random page of that process
    pub fn random_references<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<MemoryReference> {
        (0..count)
            .map(|_| {
                let process = &self.processes[rng.gen_range(0..self.processes.len())];
                MemoryReference::new(process.process_id, rng.gen_range(0..process.page_count()))
            })
            .collect()
    }

    /// Resolve every reference in order
    ///
    /// Stops early, with the statistics gathered so far, if the clock is cancelled.
    pub fn run(&mut self, references: &[MemoryReference], out: &mut dyn Write) -> SimResult<PagingReport> {
        let policy = self.memory.policy_kind();
        info!(
            policy = %policy,
            processes = self.processes.len(),
            frames = self.memory.frames().len(),
            references = references.len(),
            "Paging simulation starting"
        );

        writeln!(out, "\nProcesses created:")?;
        for p in &self.processes {
            writeln!(out, "Process {}: {} pages", p.process_id, p.page_count())?;
        }
        writeln!(out, "\nSimulating {} memory references...", references.len())?;
        self.clock.sleep(PAGING_WARMUP_DELAY);

        let mut faults_by_process = vec![0usize; self.processes.len()];
        let mut events = Vec::with_capacity(references.len());
        let mut interrupted = false;

        for (index, &reference) in references.iter().enumerate() {
            if self.clock.is_cancelled() {
                warn!(processed = index, "Paging simulation interrupted");
                interrupted = true;
                break;
            }

            writeln!(
                out,
                "\nReference #{}: Process {} requests Page {}",
                index + 1,
                reference.process,
                reference.page
            )?;

            let access = self.memory.access(&mut self.processes, reference)?;
            if let Some(victim) = access.evicted() {
                writeln!(
                    out,
                    "Replacing {} with P{}:Page{} using {}",
                    victim, reference.process, reference.page, policy
                )?;
            }
            if access.is_hit() {
                writeln!(
                    out,
                    "PAGE HIT: Page {} of Process {} found in frame {}",
                    reference.page,
                    reference.process,
                    access.frame()
                )?;
            } else {
                faults_by_process[reference.process as usize] += 1;
                writeln!(
                    out,
                    "PAGE FAULT: Page {} of Process {} not in memory",
                    reference.page, reference.process
                )?;
            }

            writeln!(out, "\nPhysical Memory State:")?;
            writeln!(out, "--------------------")?;
            for frame in self.memory.frames() {
                writeln!(out, "{}", frame)?;
            }

            events.push(ReferenceEvent {
                index,
                reference,
                access,
            });
            self.clock.sleep(REFERENCE_DELAY);
        }

        writeln!(
            out,
            "\n\nSimulation {}!",
            if interrupted { "interrupted" } else { "complete" }
        )?;

        let per_process = self
            .processes
            .iter()
            .zip(faults_by_process)
            .map(|(p, faults)| ProcessFaults {
                process_id: p.process_id,
                faults,
                pages: p.page_count(),
                resident: p.resident_pages(),
            })
            .collect();

        Ok(PagingReport::new(
            policy,
            self.memory.frames().to_vec(),
            events,
            self.memory.faults(),
            self.memory.hits(),
            per_process,
            interrupted,
        ))
    }
}
