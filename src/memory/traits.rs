/*!
 * Memory Traits
 * Page replacement abstraction
 */

use super::policy::PolicyKind;
use crate::core::types::{FrameId, Tick};

/// Page replacement policy
///
/// The tracked set must always equal the set of occupied frames:
/// `admit` is called for every load, and `select_victim` removes the frame it
/// returns.
pub trait ReplacementPolicy: Send + Sync {
    fn kind(&self) -> PolicyKind;

    /// Start tracking a freshly loaded frame
    fn admit(&mut self, frame: FrameId);

    /// Pick and stop tracking the frame to evict
    ///
    /// `last_access` reports the logical access time of a frame's resident page.
    fn select_victim(&mut self, last_access: &dyn Fn(FrameId) -> Tick) -> Option<FrameId>;

    /// Frames currently tracked, in policy order
    fn tracked(&self) -> Vec<FrameId>;
}
