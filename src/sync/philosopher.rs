/*!
 * Philosopher Actor
 * Think / try to eat / eat cycle with ordered, non-blocking fork acquisition
 */

use super::fork::{Fork, ForkGuard};
use super::monitor::{DisplayMonitor, PhilosopherState, PhilosopherView};
use crate::core::limits::{EAT_RANGE, FORK_REACH_DELAY, RETRY_BACKOFF, THINK_RANGE};
use crate::core::time::SimClock;
use crate::core::types::{ForkId, PhilosopherId};
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, trace};

/// Timing profile of one philosopher, in simulated seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub think: (f64, f64),
    pub eat: (f64, f64),
    /// Pause between taking the first and the second fork
    pub reach_delay: f64,
    /// Pause before retrying after a failed attempt
    pub backoff: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            think: THINK_RANGE,
            eat: EAT_RANGE,
            reach_delay: FORK_REACH_DELAY,
            backoff: RETRY_BACKOFF,
        }
    }
}

impl Timing {
    /// Fixed think and eat durations
    pub fn fixed(think: f64, eat: f64) -> Self {
        Self {
            think: (think, think),
            eat: (eat, eat),
            ..Self::default()
        }
    }
}

/// Accumulated per-philosopher statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PhilosopherStats {
    pub id: PhilosopherId,
    pub meals: u32,
    pub thinking_time: f64,
    pub hungry_time: f64,
    pub eating_time: f64,
    pub failed_attempts: u64,
}

/// Shared table the actors run against
pub struct Table<'a> {
    pub forks: Vec<Fork>,
    pub monitor: DisplayMonitor<'a>,
}

impl<'a> Table<'a> {
    pub fn new(philosophers: usize, monitor: DisplayMonitor<'a>) -> Self {
        Self {
            forks: (0..philosophers).map(Fork::new).collect(),
            monitor,
        }
    }

    fn publish<F>(&self, id: PhilosopherId, update: F)
    where
        F: FnOnce(&mut PhilosopherView),
    {
        self.monitor.publish(id, &self.forks, update);
    }
}

pub struct Philosopher {
    id: PhilosopherId,
    left: ForkId,
    right: ForkId,
    timing: Timing,
    rng: StdRng,
    stats: PhilosopherStats,
}

impl Philosopher {
    /// Philosopher `id` of `seats`; left fork is `id`, right fork is `(id + 1) % seats`
    pub fn new(id: PhilosopherId, seats: usize, timing: Timing, rng: StdRng) -> Self {
        Self {
            id,
            left: id,
            right: (id + 1) % seats,
            timing,
            rng,
            stats: PhilosopherStats {
                id,
                ..PhilosopherStats::default()
            },
        }
    }

    pub fn id(&self) -> PhilosopherId {
        self.id
    }

    /// Acquisition order: even ids go right then left, odd ids left then right
    pub fn fork_order(&self) -> (ForkId, ForkId) {
        if self.id % 2 == 0 {
            (self.right, self.left)
        } else {
            (self.left, self.right)
        }
    }

    /// Run cycles until `duration` simulated seconds have passed on `clock`
    ///
    /// The deadline is only checked before thinking, so a started cycle always
    /// finishes. Cancellation is also honoured between retries.
    pub fn run(mut self, table: &Table<'_>, clock: &SimClock, duration: f64) -> PhilosopherStats {
        debug!(philosopher = self.id, order = ?self.fork_order(), "Philosopher seated");

        'cycles: while clock.elapsed() < duration && !clock.is_cancelled() {
            self.think(table, clock);

            while !self.try_to_eat(table, clock) {
                if clock.is_cancelled() {
                    break 'cycles;
                }
                clock.sleep(self.timing.backoff);
            }
        }

        self.stats
    }

    fn think(&mut self, table: &Table<'_>, clock: &SimClock) {
        table.publish(self.id, |v| v.state = PhilosopherState::Thinking);
        let think = self.draw(self.timing.think);
        clock.sleep(think);
        self.stats.thinking_time += think;
    }

    /// One attempt to take both forks and eat; false if either fork was busy
    fn try_to_eat(&mut self, table: &Table<'_>, clock: &SimClock) -> bool {
        table.publish(self.id, |v| v.state = PhilosopherState::Hungry);
        let attempt_start = Instant::now();
        let (first_id, second_id) = self.fork_order();

        let Some(first) = self.pick_up(table, first_id) else {
            self.fail_attempt(clock, attempt_start, first_id);
            return false;
        };

        clock.sleep(self.timing.reach_delay);

        let Some(second) = self.pick_up(table, second_id) else {
            self.put_down(table, first);
            self.fail_attempt(clock, attempt_start, second_id);
            return false;
        };

        self.eat(table, clock);

        self.put_down(table, second);
        self.put_down(table, first);
        true
    }

    fn eat(&mut self, table: &Table<'_>, clock: &SimClock) {
        table.publish(self.id, |v| v.state = PhilosopherState::Eating);
        let eat = self.draw(self.timing.eat);
        clock.sleep(eat);
        self.stats.eating_time += eat;
        self.stats.meals += 1;

        let meals = self.stats.meals;
        table.publish(self.id, |v| v.meals = meals);
        trace!(philosopher = self.id, meals, "Meal finished");
    }

    fn pick_up<'t>(&self, table: &'t Table<'_>, fork: ForkId) -> Option<ForkGuard<'t>> {
        let guard = table.forks[fork].try_pick_up(self.id)?;
        table.publish(self.id, |v| v.holding.push(fork));
        Some(guard)
    }

    /// Unpublish first, then release, so no two views ever claim one fork
    fn put_down(&self, table: &Table<'_>, guard: ForkGuard<'_>) {
        let fork = guard.fork_id();
        table.publish(self.id, |v| v.holding.retain(|&f| f != fork));
        drop(guard);
    }

    fn fail_attempt(&mut self, clock: &SimClock, attempt_start: Instant, busy: ForkId) {
        self.stats.hungry_time += clock.units(attempt_start.elapsed());
        self.stats.failed_attempts += 1;
        trace!(philosopher = self.id, fork = busy, "Fork busy, backing off");
    }

    fn draw(&mut self, (low, high): (f64, f64)) -> f64 {
        if high > low {
            self.rng.gen_range(low..=high)
        } else {
            low
        }
    }
}
