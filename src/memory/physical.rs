/*!
 * Physical Memory
 * Fixed frame pool, reference resolution and eviction
 */

use super::policy::PolicyKind;
use super::traits::ReplacementPolicy;
use super::types::{Access, MemoryReference, PageFrame, PageKey, PagingProcess};
use crate::core::errors::{SimError, SimResult};
use crate::core::types::{FrameId, Tick};
use std::collections::HashSet;
use tracing::debug;

/// Physical memory with page frames
///
/// The logical clock and the policy's tracking structure belong to this
/// instance, so independent simulations never share state.
pub struct PhysicalMemory {
    frames: Vec<PageFrame>,
    policy: Box<dyn ReplacementPolicy>,
    clock: Tick,
    faults: usize,
    hits: usize,
}

impl PhysicalMemory {
    /// Create memory with `num_frames` frames (at least one)
    pub fn new(num_frames: usize, policy: PolicyKind) -> Self {
        Self::with_policy(num_frames, policy.build())
    }

    pub fn with_policy(num_frames: usize, policy: Box<dyn ReplacementPolicy>) -> Self {
        Self {
            frames: (0..num_frames.max(1)).map(PageFrame::new).collect(),
            policy,
            clock: 0,
            faults: 0,
            hits: 0,
        }
    }

    pub fn frames(&self) -> &[PageFrame] {
        &self.frames
    }

    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    pub fn faults(&self) -> usize {
        self.faults
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    fn free_frame(&self) -> Option<FrameId> {
        self.frames.iter().position(PageFrame::is_free)
    }

    fn tick(&mut self) -> Tick {
        self.clock += 1;
        self.clock
    }

    /// Resolve one reference, loading and evicting as needed
    ///
    /// `processes` is indexed by process id.
    pub fn access(
        &mut self,
        processes: &mut [PagingProcess],
        reference: MemoryReference,
    ) -> SimResult<Access> {
        let key = PageKey::new(reference.process, reference.page);
        let slot = reference.process as usize;
        match processes.get(slot) {
            Some(process) if reference.page < process.page_count() => {}
            _ => return Err(SimError::InvalidReference(key.to_string())),
        }

        if let Some(frame) = processes[slot].frame_of(reference.page) {
            self.hits += 1;
            let now = self.tick();
            processes[slot].pages[reference.page].last_access = now;
            debug!(page = %key, frame, "Page hit");
            return Ok(Access::Hit { frame });
        }

        self.faults += 1;

        let (frame, evicted) = match self.free_frame() {
            Some(frame) => (frame, None),
            None => {
                let frames = &self.frames;
                let recency = |frame: FrameId| {
                    frames[frame]
                        .resident
                        .and_then(|k| processes.get(k.owner as usize)?.page(k.page))
                        .map(|page| page.last_access)
                        .unwrap_or(Tick::MAX)
                };
                let victim = self.policy.select_victim(&recency).ok_or_else(|| {
                    SimError::Internal("no free frame and nothing to evict".into())
                })?;

                let evicted = self.frames[victim].resident.take();
                if let Some(old) = evicted {
                    if let Some(owner) = processes.get_mut(old.owner as usize) {
                        owner.page_table[old.page] = None;
                    }
                }
                (victim, evicted)
            }
        };

        let now = self.tick();
        let target = &mut self.frames[frame];
        target.resident = Some(key);
        target.allocated_at = now;
        processes[slot].pages[reference.page].last_access = now;
        self.policy.admit(frame);
        processes[slot].page_table[reference.page] = Some(frame);

        debug!(page = %key, frame, evicted = ?evicted, "Page fault");
        debug_assert!(self.is_consistent(processes));

        Ok(Access::Fault { frame, evicted })
    }

    /// Check the residency invariants
    ///
    /// - every present page-table entry points at a frame holding exactly that page
    /// - every occupied frame is referenced by its owner's page table
    /// - no frame is referenced twice
    /// - the policy tracks exactly the occupied frames
    pub fn is_consistent(&self, processes: &[PagingProcess]) -> bool {
        let mut claimed = HashSet::new();
        for process in processes {
            for (page, entry) in process.page_table.iter().enumerate() {
                if let Some(frame) = *entry {
                    let expected = Some(PageKey::new(process.process_id, page));
                    if self.frames.get(frame).map(|f| f.resident) != Some(expected) {
                        return false;
                    }
                    if !claimed.insert(frame) {
                        return false;
                    }
                }
            }
        }

        let occupied: HashSet<FrameId> = self
            .frames
            .iter()
            .filter(|f| !f.is_free())
            .map(|f| f.frame_id)
            .collect();
        let tracked = self.policy.tracked();
        let tracked_set: HashSet<FrameId> = tracked.iter().copied().collect();

        occupied == claimed && tracked_set == occupied && tracked.len() == tracked_set.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn setup(frames: usize, policy: PolicyKind, pages: &[usize]) -> (PhysicalMemory, Vec<PagingProcess>) {
        let processes = pages
            .iter()
            .enumerate()
            .map(|(pid, &n)| PagingProcess::new(pid as u32, n))
            .collect();
        (PhysicalMemory::new(frames, policy), processes)
    }

    #[test]
    fn test_hit_after_fault() {
        let (mut memory, mut procs) = setup(2, PolicyKind::Fifo, &[3]);
        let first = memory.access(&mut procs, MemoryReference::new(0, 1)).unwrap();
        assert_eq!(first, Access::Fault { frame: 0, evicted: None });
        let second = memory.access(&mut procs, MemoryReference::new(0, 1)).unwrap();
        assert_eq!(second, Access::Hit { frame: 0 });
        assert_eq!((memory.faults(), memory.hits()), (1, 1));
        assert_eq!(procs[0].frame_of(1), Some(0));
    }

    #[test]
    fn test_eviction_clears_owner_table() {
        let (mut memory, mut procs) = setup(1, PolicyKind::Fifo, &[2, 2]);
        memory.access(&mut procs, MemoryReference::new(0, 0)).unwrap();
        let access = memory.access(&mut procs, MemoryReference::new(1, 1)).unwrap();
        assert_eq!(
            access,
            Access::Fault {
                frame: 0,
                evicted: Some(PageKey::new(0, 0))
            }
        );
        assert_eq!(procs[0].frame_of(0), None);
        assert_eq!(procs[1].frame_of(1), Some(0));
        assert!(memory.is_consistent(&procs));
    }

    #[test]
    fn test_invalid_reference_rejected() {
        let (mut memory, mut procs) = setup(2, PolicyKind::Lru, &[2]);
        assert!(matches!(
            memory.access(&mut procs, MemoryReference::new(0, 5)),
            Err(SimError::InvalidReference(_))
        ));
        assert!(matches!(
            memory.access(&mut procs, MemoryReference::new(3, 0)),
            Err(SimError::InvalidReference(_))
        ));
        assert_eq!(memory.faults() + memory.hits(), 0);
    }

    #[test]
    fn test_zero_frames_raised_to_one() {
        let memory = PhysicalMemory::new(0, PolicyKind::Fifo);
        assert_eq!(memory.frames().len(), 1);
    }
}
