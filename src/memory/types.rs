/*!
 * Memory Types
 * Pages, frames and per-process page tables
 */

use crate::core::types::{FrameId, PageId, Pid, Tick};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a page across all processes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageKey {
    pub owner: Pid,
    pub page: PageId,
}

impl PageKey {
    pub fn new(owner: Pid, page: PageId) -> Self {
        Self { owner, page }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "P{}:Page{}", self.owner, self.page)
    }
}

/// Virtual page owned by a process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page_id: PageId,
    pub owner: Pid,
    /// Logical time of the latest load or hit
    pub last_access: Tick,
}

impl Page {
    pub fn key(&self) -> PageKey {
        PageKey::new(self.owner, self.page_id)
    }
}

/// Physical frame; owns the residency slot, not the page data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFrame {
    pub frame_id: FrameId,
    pub resident: Option<PageKey>,
    pub allocated_at: Tick,
}

impl PageFrame {
    pub fn new(frame_id: FrameId) -> Self {
        Self {
            frame_id,
            resident: None,
            allocated_at: 0,
        }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.resident.is_none()
    }
}

impl fmt::Display for PageFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.resident {
            Some(key) => write!(f, "Frame{}[{}]", self.frame_id, key),
            None => write!(f, "Frame{}[empty]", self.frame_id),
        }
    }
}

/// Process with a fixed set of pages and its page table
///
/// The page table is only mutated by `PhysicalMemory` on load and eviction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingProcess {
    pub process_id: Pid,
    pub pages: Vec<Page>,
    pub(crate) page_table: Vec<Option<FrameId>>,
}

impl PagingProcess {
    pub fn new(process_id: Pid, num_pages: usize) -> Self {
        let pages = (0..num_pages)
            .map(|page_id| Page {
                page_id,
                owner: process_id,
                last_access: 0,
            })
            .collect();
        Self {
            process_id,
            pages,
            page_table: vec![None; num_pages],
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, page_id: PageId) -> Option<&Page> {
        self.pages.get(page_id)
    }

    /// Frame currently holding the page, if resident
    pub fn frame_of(&self, page_id: PageId) -> Option<FrameId> {
        self.page_table.get(page_id).copied().flatten()
    }

    pub fn resident_pages(&self) -> usize {
        self.page_table.iter().filter(|e| e.is_some()).count()
    }
}

/// One synthetic memory reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryReference {
    pub process: Pid,
    pub page: PageId,
}

impl MemoryReference {
    pub fn new(process: Pid, page: PageId) -> Self {
        Self { process, page }
    }
}

/// Result of resolving one reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Access {
    Hit {
        frame: FrameId,
    },
    Fault {
        frame: FrameId,
        evicted: Option<PageKey>,
    },
}

impl Access {
    pub fn frame(&self) -> FrameId {
        match *self {
            Access::Hit { frame } | Access::Fault { frame, .. } => frame,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Access::Hit { .. })
    }

    pub fn evicted(&self) -> Option<PageKey> {
        match *self {
            Access::Fault { evicted, .. } => evicted,
            Access::Hit { .. } => None,
        }
    }
}
