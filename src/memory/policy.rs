/*!
 * Replacement Policies
 * FIFO and LRU victim selection
 */

use super::traits::ReplacementPolicy;
use crate::core::types::{FrameId, Tick};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Replacement policy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolicyKind {
    #[default]
    Fifo,
    Lru,
}

impl PolicyKind {
    /// Case-insensitive lookup; `None` for unknown names
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "FIFO" => Some(PolicyKind::Fifo),
            "LRU" => Some(PolicyKind::Lru),
            _ => None,
        }
    }

    pub fn build(self) -> Box<dyn ReplacementPolicy> {
        match self {
            PolicyKind::Fifo => Box::new(FifoPolicy::default()),
            PolicyKind::Lru => Box::new(LruPolicy::default()),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PolicyKind::Fifo => write!(f, "FIFO"),
            PolicyKind::Lru => write!(f, "LRU"),
        }
    }
}

/// Evicts the frame loaded longest ago
#[derive(Debug, Default)]
pub struct FifoPolicy {
    queue: VecDeque<FrameId>,
}

impl ReplacementPolicy for FifoPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }

    fn admit(&mut self, frame: FrameId) {
        if !self.queue.contains(&frame) {
            self.queue.push_back(frame);
        }
    }

    fn select_victim(&mut self, _last_access: &dyn Fn(FrameId) -> Tick) -> Option<FrameId> {
        self.queue.pop_front()
    }

    fn tracked(&self) -> Vec<FrameId> {
        self.queue.iter().copied().collect()
    }
}

/// Evicts the frame whose resident page was touched least recently
#[derive(Debug, Default)]
pub struct LruPolicy {
    frames: Vec<FrameId>,
}

impl ReplacementPolicy for LruPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }

    fn admit(&mut self, frame: FrameId) {
        if !self.frames.contains(&frame) {
            self.frames.push(frame);
        }
    }

    fn select_victim(&mut self, last_access: &dyn Fn(FrameId) -> Tick) -> Option<FrameId> {
        let (index, _) = self
            .frames
            .iter()
            .enumerate()
            .min_by_key(|&(_, frame)| last_access(*frame))?;
        Some(self.frames.remove(index))
    }

    fn tracked(&self) -> Vec<FrameId> {
        self.frames.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(PolicyKind::parse("lru"), Some(PolicyKind::Lru));
        assert_eq!(PolicyKind::parse("Fifo"), Some(PolicyKind::Fifo));
        assert_eq!(PolicyKind::parse("clock"), None);
    }

    #[test]
    fn test_fifo_order_ignores_recency() {
        let mut policy = FifoPolicy::default();
        policy.admit(2);
        policy.admit(0);
        policy.admit(2);
        assert_eq!(policy.tracked(), vec![2, 0]);
        assert_eq!(policy.select_victim(&|f| if f == 2 { 100 } else { 1 }), Some(2));
        assert_eq!(policy.select_victim(&|_| 0), Some(0));
        assert_eq!(policy.select_victim(&|_| 0), None);
    }

    #[test]
    fn test_lru_picks_oldest_access() {
        let mut policy = LruPolicy::default();
        for frame in 0..3 {
            policy.admit(frame);
        }
        let access = |f: FrameId| [7, 3, 9][f];
        assert_eq!(policy.select_victim(&access), Some(1));
        assert_eq!(policy.tracked(), vec![0, 2]);
    }
}
