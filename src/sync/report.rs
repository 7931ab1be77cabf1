/*!
 * Dining Report
 * Per-philosopher statistics and the fairness verdict
 */

use super::monitor::TableSnapshot;
use super::philosopher::PhilosopherStats;
use crate::core::limits::STARVATION_MEAL_SPREAD;
use crate::core::report::{Report, RunHeader};
use serde::Serialize;
use std::fmt;

/// Meal-count fairness verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Fairness {
    Fair { spread: u32 },
    PossibleStarvation { spread: u32 },
}

impl Fairness {
    /// Starvation is flagged when `max(meals) - min(meals)` exceeds the allowed spread
    pub fn assess(meals: &[u32]) -> Self {
        let max = meals.iter().copied().max().unwrap_or(0);
        let min = meals.iter().copied().min().unwrap_or(0);
        let spread = max - min;
        if spread > STARVATION_MEAL_SPREAD {
            Fairness::PossibleStarvation { spread }
        } else {
            Fairness::Fair { spread }
        }
    }

    pub fn is_fair(&self) -> bool {
        matches!(self, Fairness::Fair { .. })
    }
}

impl fmt::Display for Fairness {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Fairness::PossibleStarvation { spread } => write!(
                f,
                "WARNING: Possible starvation detected! Meal count difference {} > {}",
                spread, STARVATION_MEAL_SPREAD
            ),
            Fairness::Fair { .. } => {
                write!(f, "Resource distribution was fair. No starvation detected.")
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DiningReport {
    pub header: RunHeader,
    pub philosophers: usize,
    /// Configured duration, simulated seconds
    pub duration: u64,
    /// Measured run length including the final cycles, simulated seconds
    pub elapsed: f64,
    pub stats: Vec<PhilosopherStats>,
    pub fairness: Fairness,
    pub final_table: TableSnapshot,
    pub interrupted: bool,
}

impl DiningReport {
    pub fn with_header(mut self, header: RunHeader) -> Self {
        self.header = header;
        self
    }

    pub fn meals(&self) -> Vec<u32> {
        self.stats.iter().map(|s| s.meals).collect()
    }

    pub fn total_meals(&self) -> u32 {
        self.stats.iter().map(|s| s.meals).sum()
    }
}

impl fmt::Display for DiningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;
        if self.interrupted {
            writeln!(f, "\nSimulation interrupted!\n")?;
        } else {
            writeln!(f, "\nSimulation complete!\n")?;
        }

        writeln!(f, "Philosopher Statistics:")?;
        writeln!(f, "------------------------")?;
        for s in &self.stats {
            writeln!(
                f,
                "Phil {}: {} meals | Think: {:.1}s | Hungry: {:.1}s | Eating: {:.1}s",
                s.id, s.meals, s.thinking_time, s.hungry_time, s.eating_time
            )?;
        }
        writeln!(f, "\n{}", self.fairness)
    }
}

impl Report for DiningReport {
    fn summary(&self) -> String {
        if self.interrupted {
            "Dining Philosophers simulation interrupted.".to_string()
        } else {
            "Dining Philosophers simulation completed.".to_string()
        }
    }

    fn header(&self) -> &RunHeader {
        &self.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spread_threshold() {
        assert_eq!(Fairness::assess(&[2, 5, 4]), Fairness::Fair { spread: 3 });
        assert_eq!(
            Fairness::assess(&[1, 5, 4]),
            Fairness::PossibleStarvation { spread: 4 }
        );
        assert!(Fairness::assess(&[]).is_fair());
    }

    #[test]
    fn test_verdict_messages() {
        assert!(Fairness::assess(&[0, 9])
            .to_string()
            .starts_with("WARNING: Possible starvation detected!"));
        assert!(Fairness::assess(&[3, 3]).to_string().contains("fair"));
    }
}
