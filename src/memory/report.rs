/*!
 * Paging Report
 * Fault/hit statistics for one paging run
 */

use super::policy::PolicyKind;
use super::types::{Access, MemoryReference, PageFrame};
use crate::core::report::{Report, RunHeader};
use crate::core::types::Pid;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ReferenceEvent {
    pub index: usize,
    pub reference: MemoryReference,
    pub access: Access,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessFaults {
    pub process_id: Pid,
    /// Fault events raised by this process's references
    pub faults: usize,
    pub pages: usize,
    /// Pages still resident at the end of the run
    pub resident: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PagingReport {
    pub header: RunHeader,
    pub policy: PolicyKind,
    pub total_references: usize,
    pub faults: usize,
    pub hits: usize,
    pub hit_ratio: f64,
    pub per_process: Vec<ProcessFaults>,
    pub events: Vec<ReferenceEvent>,
    pub final_frames: Vec<PageFrame>,
    pub interrupted: bool,
}

impl PagingReport {
    pub(super) fn new(
        policy: PolicyKind,
        final_frames: Vec<PageFrame>,
        events: Vec<ReferenceEvent>,
        faults: usize,
        hits: usize,
        per_process: Vec<ProcessFaults>,
        interrupted: bool,
    ) -> Self {
        let total_references = events.len();
        let hit_ratio = if total_references > 0 {
            hits as f64 / total_references as f64
        } else {
            0.0
        };
        Self {
            header: RunHeader::new("Memory Paging"),
            policy,
            total_references,
            faults,
            hits,
            hit_ratio,
            per_process,
            events,
            final_frames,
            interrupted,
        }
    }

    pub fn with_header(mut self, header: RunHeader) -> Self {
        self.header = header;
        self
    }

    /// Pages evicted during the run, in order
    pub fn evictions(&self) -> impl Iterator<Item = &ReferenceEvent> {
        self.events.iter().filter(|e| e.access.evicted().is_some())
    }
}

impl fmt::Display for PagingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;
        if self.interrupted {
            writeln!(f, "Interrupted after {} references", self.total_references)?;
        }
        writeln!(f, "Algorithm: {}", self.policy)?;
        writeln!(f, "Page Faults: {}, Hits: {}", self.faults, self.hits)?;
        writeln!(
            f,
            "Hit Ratio: {:.2} ({:.2}%)",
            self.hit_ratio,
            self.hit_ratio * 100.0
        )?;

        writeln!(f, "\nPage Faults by Process:")?;
        for p in &self.per_process {
            writeln!(
                f,
                "Process {}: {} faults, {} of {} pages resident",
                p.process_id, p.faults, p.resident, p.pages
            )?;
        }

        writeln!(f, "\nFinal Memory State:")?;
        for frame in &self.final_frames {
            writeln!(f, "{}", frame)?;
        }
        Ok(())
    }
}

impl Report for PagingReport {
    fn summary(&self) -> String {
        if self.interrupted {
            "Memory paging simulation interrupted.".to_string()
        } else {
            "Memory paging simulation completed.".to_string()
        }
    }

    fn header(&self) -> &RunHeader {
        &self.header
    }
}
