/*!
 * Display Monitor
 * Shared table view of philosopher states and fork ownership
 *
 * Holds one owned snapshot of the table behind a single lock. Rendering works
 * on a cloned snapshot under a separate output lock, so console I/O never
 * runs while the state lock is held. Neither lock takes part in fork
 * arbitration.
 */

use super::fork::Fork;
use crate::core::types::{ForkId, PhilosopherId};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use tracing::debug;

/// Philosopher activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhilosopherState {
    Thinking,
    Hungry,
    Eating,
}

impl fmt::Display for PhilosopherState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhilosopherState::Thinking => write!(f, "Thinking"),
            PhilosopherState::Hungry => write!(f, "Hungry  "),
            PhilosopherState::Eating => write!(f, "Eating  "),
        }
    }
}

/// What the monitor knows about one philosopher
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhilosopherView {
    pub id: PhilosopherId,
    pub state: PhilosopherState,
    pub meals: u32,
    /// Forks this philosopher has published as held
    pub holding: Vec<ForkId>,
}

/// Consistent copy of the table at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSnapshot {
    pub version: u64,
    pub philosophers: Vec<PhilosopherView>,
    pub fork_owners: Vec<Option<PhilosopherId>>,
}

impl TableSnapshot {
    /// Forks that two or more philosophers claim to hold at once
    pub fn contested_forks(&self) -> Vec<ForkId> {
        let mut claims: HashMap<ForkId, usize> = HashMap::new();
        for view in &self.philosophers {
            for &fork in &view.holding {
                *claims.entry(fork).or_default() += 1;
            }
        }
        let mut contested: Vec<ForkId> = claims
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|(fork, _)| fork)
            .collect();
        contested.sort_unstable();
        contested
    }

    pub fn eating(&self) -> usize {
        self.philosophers
            .iter()
            .filter(|p| p.state == PhilosopherState::Eating)
            .count()
    }
}

impl fmt::Display for TableSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== DINING PHILOSOPHERS SIMULATION ===\n")?;
        let n = self.fork_owners.len();
        for view in &self.philosophers {
            let marker = |fork: ForkId| {
                if n > 0 && self.fork_owners[fork % n] == Some(view.id) {
                    "F"
                } else {
                    " "
                }
            };
            writeln!(
                f,
                "Philosopher {}: {} {} {} | Meals: {}",
                view.id,
                marker(view.id),
                view.state,
                marker(view.id + 1),
                view.meals
            )?;
        }
        writeln!(f, "----------------------------------------")
    }
}

struct Output<'a> {
    sink: Box<dyn Write + Send + 'a>,
    clear_screen: bool,
    last_rendered: u64,
}

pub struct DisplayMonitor<'a> {
    state: Mutex<(u64, Vec<PhilosopherView>)>,
    output: Option<Mutex<Output<'a>>>,
}

impl<'a> DisplayMonitor<'a> {
    /// Monitor without a console; snapshots only
    pub fn headless(philosophers: usize) -> Self {
        Self {
            state: Mutex::new((0, initial_views(philosophers))),
            output: None,
        }
    }

    /// Monitor rendering every update to `sink`
    pub fn with_output(
        philosophers: usize,
        sink: Box<dyn Write + Send + 'a>,
        clear_screen: bool,
    ) -> Self {
        Self {
            state: Mutex::new((0, initial_views(philosophers))),
            output: Some(Mutex::new(Output {
                sink,
                clear_screen,
                last_rendered: 0,
            })),
        }
    }

    /// Apply a change to one philosopher's view and render the new table
    pub fn publish<F>(&self, id: PhilosopherId, forks: &[Fork], update: F)
    where
        F: FnOnce(&mut PhilosopherView),
    {
        let (version, views) = {
            let mut guard = self.state.lock();
            let (version, views) = &mut *guard;
            if let Some(view) = views.get_mut(id) {
                update(view);
            }
            *version += 1;
            (*version, views.clone())
        };

        if self.output.is_some() {
            self.render(&Self::assemble(version, views, forks));
        }
    }

    /// Copy the current table
    pub fn snapshot(&self, forks: &[Fork]) -> TableSnapshot {
        let (version, views) = {
            let guard = self.state.lock();
            (guard.0, guard.1.clone())
        };
        Self::assemble(version, views, forks)
    }

    /// Render a snapshot unless a newer one was already drawn
    pub fn render(&self, snapshot: &TableSnapshot) {
        let Some(output) = &self.output else {
            return;
        };
        let mut output = output.lock();
        if snapshot.version < output.last_rendered {
            return;
        }
        output.last_rendered = snapshot.version;

        let clear = if output.clear_screen { "\x1b[H\x1b[J" } else { "" };
        let result = write!(output.sink, "{}{}", clear, snapshot).and_then(|_| output.sink.flush());
        if let Err(e) = result {
            debug!(error = %e, "Display render failed");
        }
    }

    fn assemble(version: u64, philosophers: Vec<PhilosopherView>, forks: &[Fork]) -> TableSnapshot {
        TableSnapshot {
            version,
            philosophers,
            fork_owners: forks.iter().map(Fork::owner).collect(),
        }
    }
}

fn initial_views(philosophers: usize) -> Vec<PhilosopherView> {
    (0..philosophers)
        .map(|id| PhilosopherView {
            id,
            state: PhilosopherState::Thinking,
            meals: 0,
            holding: Vec::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_publish_bumps_version() {
        let forks: Vec<Fork> = (0..3).map(Fork::new).collect();
        let monitor = DisplayMonitor::headless(3);
        monitor.publish(1, &forks, |v| v.state = PhilosopherState::Hungry);
        monitor.publish(1, &forks, |v| v.meals += 1);

        let snapshot = monitor.snapshot(&forks);
        assert_eq!(snapshot.version, 2);
        assert_eq!(snapshot.philosophers[1].state, PhilosopherState::Hungry);
        assert_eq!(snapshot.philosophers[1].meals, 1);
    }

    #[test]
    fn test_contested_forks_detected() {
        let snapshot = TableSnapshot {
            version: 1,
            philosophers: vec![
                PhilosopherView {
                    id: 0,
                    state: PhilosopherState::Eating,
                    meals: 0,
                    holding: vec![0, 1],
                },
                PhilosopherView {
                    id: 1,
                    state: PhilosopherState::Hungry,
                    meals: 0,
                    holding: vec![1],
                },
            ],
            fork_owners: vec![Some(0), Some(0)],
        };
        assert_eq!(snapshot.contested_forks(), vec![1]);
        assert_eq!(snapshot.eating(), 1);
    }

    #[test]
    fn test_render_shows_fork_markers() {
        let forks: Vec<Fork> = (0..2).map(Fork::new).collect();
        let buf = SharedBuf::default();
        let monitor = DisplayMonitor::with_output(2, Box::new(buf.clone()), false);

        let _left = forks[0].try_pick_up(0).unwrap();
        monitor.publish(0, &forks, |v| {
            v.state = PhilosopherState::Hungry;
            v.holding.push(0);
        });

        let text = String::from_utf8(buf.0.lock().clone()).unwrap();
        assert!(text.contains("Philosopher 0: F Hungry     | Meals: 0"));
        assert!(text.contains("Philosopher 1:   Thinking   | Meals: 0"));
    }

    #[test]
    fn test_stale_snapshot_not_rendered() {
        let forks: Vec<Fork> = (0..2).map(Fork::new).collect();
        let buf = SharedBuf::default();
        let monitor = DisplayMonitor::with_output(2, Box::new(buf.clone()), false);

        let stale = monitor.snapshot(&forks);
        monitor.publish(0, &forks, |v| v.meals = 4);
        let rendered = buf.0.lock().len();

        monitor.render(&stale);
        assert_eq!(buf.0.lock().len(), rendered);
    }
}
