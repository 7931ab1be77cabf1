/*!
 * Fork
 * Exclusive resource with non-blocking acquisition
 */

use crate::core::types::{ForkId, PhilosopherId};
use parking_lot::{Mutex, MutexGuard};

/// Shared fork between two neighbouring philosophers
///
/// Acquisition never blocks: `try_pick_up` either returns a guard or fails
/// immediately. The recorded owner is cleared before the lock is released.
#[derive(Debug)]
pub struct Fork {
    id: ForkId,
    lock: Mutex<()>,
    owner: Mutex<Option<PhilosopherId>>,
}

impl Fork {
    pub fn new(id: ForkId) -> Self {
        Self {
            id,
            lock: Mutex::new(()),
            owner: Mutex::new(None),
        }
    }

    pub fn id(&self) -> ForkId {
        self.id
    }

    /// Try to take the fork for `philosopher`
    pub fn try_pick_up(&self, philosopher: PhilosopherId) -> Option<ForkGuard<'_>> {
        let held = self.lock.try_lock()?;
        *self.owner.lock() = Some(philosopher);
        Some(ForkGuard { fork: self, _held: held })
    }

    /// Philosopher currently recorded as holding the fork
    pub fn owner(&self) -> Option<PhilosopherId> {
        *self.owner.lock()
    }

    pub fn is_available(&self) -> bool {
        !self.lock.is_locked()
    }
}

/// Proof of fork ownership; dropping it puts the fork down
#[must_use = "dropping the guard puts the fork down immediately"]
pub struct ForkGuard<'a> {
    fork: &'a Fork,
    _held: MutexGuard<'a, ()>,
}

impl ForkGuard<'_> {
    pub fn fork_id(&self) -> ForkId {
        self.fork.id
    }
}

impl Drop for ForkGuard<'_> {
    fn drop(&mut self) {
        // Runs before `_held` is dropped, so nobody sees a stale owner on an unlocked fork
        *self.fork.owner.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_exclusive_pick_up() {
        let fork = Fork::new(3);
        let guard = fork.try_pick_up(1).unwrap();
        assert_eq!(guard.fork_id(), 3);
        assert_eq!(fork.owner(), Some(1));
        assert!(fork.try_pick_up(2).is_none());
        assert_eq!(fork.owner(), Some(1));

        drop(guard);
        assert_eq!(fork.owner(), None);
        assert!(fork.is_available());
        assert!(fork.try_pick_up(2).is_some());
    }

    #[test]
    fn test_try_pick_up_never_blocks() {
        let fork = Arc::new(Fork::new(0));
        let _guard = fork.try_pick_up(0).unwrap();

        let contender = Arc::clone(&fork);
        let attempt = thread::spawn(move || contender.try_pick_up(1).is_some())
            .join()
            .unwrap();
        assert!(!attempt);
    }
}
