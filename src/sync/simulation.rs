/*!
 * Dining Philosophers Simulation
 * One thread per philosopher over a ring of shared forks
 *
 * The main thread refreshes the display until the configured duration has
 * elapsed (or the run is cancelled), then joins every actor. Actors stop
 * between cycles, and fork guards release on every exit path, so an
 * interrupted run still returns the statistics gathered so far.
 */

use super::monitor::{DisplayMonitor, TableSnapshot};
use super::philosopher::{Philosopher, PhilosopherStats, Table, Timing};
use super::report::{DiningReport, Fairness};
use crate::core::config::SimConfig;
use crate::core::errors::{SimError, SimResult};
use crate::core::limits::{
    DEFAULT_DURATION, DEFAULT_PHILOSOPHERS, DISPLAY_REFRESH, MAX_DURATION, MAX_PHILOSOPHERS,
    MIN_DURATION, MIN_PHILOSOPHERS,
};
use crate::core::report::RunHeader;
use crate::core::time::{CancelToken, SimClock};
use crate::core::types::PhilosopherId;
use std::collections::HashMap;
use std::io::Write;
use std::thread;
use tracing::{info, warn};

/// Dining philosophers parameters
#[derive(Debug, Clone)]
pub struct DiningConfig {
    /// Seats at the table, within [2, 20]
    pub philosophers: usize,
    /// Run length in simulated seconds, within [5, 120]
    pub duration: u64,
    /// Timing shared by every philosopher without an override
    pub timing: Timing,
    pub overrides: HashMap<PhilosopherId, Timing>,
    /// Period of the main display loop
    pub refresh: f64,
}

impl Default for DiningConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PHILOSOPHERS, DEFAULT_DURATION)
    }
}

impl DiningConfig {
    /// Create a configuration; both values are clamped into their allowed ranges
    pub fn new(philosophers: usize, duration: u64) -> Self {
        Self {
            philosophers: philosophers.clamp(MIN_PHILOSOPHERS, MAX_PHILOSOPHERS),
            duration: duration.clamp(MIN_DURATION, MAX_DURATION),
            timing: Timing::default(),
            overrides: HashMap::new(),
            refresh: DISPLAY_REFRESH,
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Give one philosopher its own timing profile
    pub fn with_override(mut self, id: PhilosopherId, timing: Timing) -> Self {
        self.overrides.insert(id, timing);
        self
    }

    pub fn timing_for(&self, id: PhilosopherId) -> Timing {
        self.overrides.get(&id).copied().unwrap_or(self.timing)
    }
}

/// Where the live table goes while the run is in progress
pub enum LiveView<'a> {
    /// No live rendering
    Headless,
    /// Render every update; optionally clear the terminal first
    Console {
        sink: Box<dyn Write + Send + 'a>,
        clear_screen: bool,
    },
}

pub struct DiningSimulation {
    config: DiningConfig,
    sim: SimConfig,
    cancel: CancelToken,
}

impl DiningSimulation {
    pub fn new(config: DiningConfig, sim: &SimConfig, cancel: CancelToken) -> Self {
        Self {
            config,
            sim: sim.clone(),
            cancel,
        }
    }

    pub fn config(&self) -> &DiningConfig {
        &self.config
    }

    pub fn run(&self, display: LiveView<'_>) -> SimResult<DiningReport> {
        self.run_observed(display, &mut |_| {})
    }

    /// Run, handing every periodic snapshot of the table to `observer`
    pub fn run_observed(
        &self,
        display: LiveView<'_>,
        observer: &mut dyn FnMut(&TableSnapshot),
    ) -> SimResult<DiningReport> {
        let seats = self.config.philosophers;
        let duration = self.config.duration as f64;

        info!(
            philosophers = seats,
            duration = self.config.duration,
            "Dining philosophers starting"
        );

        let monitor = match display {
            LiveView::Headless => DisplayMonitor::headless(seats),
            LiveView::Console { sink, clear_screen } => {
                DisplayMonitor::with_output(seats, sink, clear_screen)
            }
        };
        let table = Table::new(seats, monitor);
        let clock = SimClock::new(self.sim.time_unit, self.cancel.clone());
        let span = tracing::Span::current();

        let stats = thread::scope(|scope| -> SimResult<Vec<PhilosopherStats>> {
            let mut handles = Vec::with_capacity(seats);
            for id in 0..seats {
                let philosopher = Philosopher::new(
                    id,
                    seats,
                    self.config.timing_for(id),
                    self.sim.rng_for(id as u64),
                );
                let (table, clock, span) = (&table, &clock, span.clone());
                let spawned = thread::Builder::new()
                    .name(format!("philosopher-{}", id))
                    .spawn_scoped(scope, move || {
                        let _entered = span.enter();
                        philosopher.run(table, clock, duration)
                    });
                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        // Seated actors stop at their next loop boundary; the scope joins them
                        self.cancel.cancel();
                        return Err(e.into());
                    }
                }
            }

            while clock.elapsed() < duration && !clock.is_cancelled() {
                let snapshot = table.monitor.snapshot(&table.forks);
                table.monitor.render(&snapshot);
                observer(&snapshot);
                let remaining = (duration - clock.elapsed()).max(0.0);
                clock.sleep(self.config.refresh.min(remaining));
            }

            let mut stats = Vec::with_capacity(seats);
            let mut panicked = None;
            for (id, handle) in handles.into_iter().enumerate() {
                match handle.join() {
                    Ok(s) => stats.push(s),
                    Err(_) => panicked = panicked.or(Some(id)),
                }
            }
            match panicked {
                Some(id) => Err(SimError::ActorPanicked(id)),
                None => Ok(stats),
            }
        })?;

        let final_table = table.monitor.snapshot(&table.forks);
        table.monitor.render(&final_table);
        observer(&final_table);

        let interrupted = self.cancel.is_cancelled();
        let meals: Vec<u32> = stats.iter().map(|s| s.meals).collect();
        let fairness = Fairness::assess(&meals);
        match fairness {
            Fairness::PossibleStarvation { spread } => {
                warn!(spread, ?meals, "Possible starvation detected")
            }
            Fairness::Fair { spread } => info!(spread, ?meals, "Meal distribution fair"),
        }
        if interrupted {
            warn!("Dining philosophers interrupted; reporting partial statistics");
        }

        Ok(DiningReport {
            header: RunHeader::new("Dining Philosophers"),
            philosophers: seats,
            duration: self.config.duration,
            elapsed: clock.elapsed(),
            stats,
            fairness,
            final_table,
            interrupted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_clamps() {
        let config = DiningConfig::new(1, 500);
        assert_eq!(config.philosophers, 2);
        assert_eq!(config.duration, 120);
        let config = DiningConfig::new(50, 0);
        assert_eq!(config.philosophers, 20);
        assert_eq!(config.duration, 5);
    }

    #[test]
    fn test_override_lookup() {
        let config = DiningConfig::new(3, 5).with_override(2, Timing::fixed(0.1, 0.1));
        assert_eq!(config.timing_for(2), Timing::fixed(0.1, 0.1));
        assert_eq!(config.timing_for(0), Timing::default());
    }

    #[test]
    fn test_cancelled_run_returns_promptly() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let sim = DiningSimulation::new(
            DiningConfig::new(4, 120),
            &SimConfig::fast(1).with_time_unit(std::time::Duration::from_millis(1)),
            cancel,
        );
        let report = sim.run(LiveView::Headless).unwrap();
        assert!(report.interrupted);
        assert_eq!(report.total_meals(), 0);
        assert_eq!(report.stats.len(), 4);
    }
}
