/*!
 * Simulation Clock
 * Scaled real-time delays and cooperative cancellation
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Cooperative cancellation flag shared between a run and its controller
///
/// Engines observe it at loop boundaries only; nothing is aborted mid-step.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Maps simulated seconds onto real time
#[derive(Debug, Clone)]
pub struct SimClock {
    unit: Duration,
    start: Instant,
    cancel: CancelToken,
}

impl SimClock {
    pub fn new(unit: Duration, cancel: CancelToken) -> Self {
        Self {
            unit,
            start: Instant::now(),
            cancel,
        }
    }

    /// Real duration of `units` simulated seconds
    #[inline]
    pub fn real(&self, units: f64) -> Duration {
        self.unit.mul_f64(units.max(0.0))
    }

    /// Simulated seconds represented by a real duration
    #[inline]
    pub fn units(&self, real: Duration) -> f64 {
        real.as_secs_f64() / self.unit.as_secs_f64()
    }

    /// Block the calling thread for `units` simulated seconds
    pub fn sleep(&self, units: f64) {
        let real = self.real(units);
        if !real.is_zero() {
            thread::sleep(real);
        }
    }

    /// Simulated seconds since the clock was created
    pub fn elapsed(&self) -> f64 {
        self.units(self.start.elapsed())
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn unit(&self) -> Duration {
        self.unit
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
