/*!
 * Workload Synthesis
 * Random process sets for the scheduler simulations
 */

use super::types::SimProcess;
use crate::core::limits::{MAX_BURST, MAX_PRIORITY, MIN_BURST, MIN_PRIORITY};
use rand::Rng;

/// Processes with ids 1..=count and bursts uniform in [1, 5]
pub fn round_robin_workload<R: Rng + ?Sized>(count: u32, rng: &mut R) -> Vec<SimProcess> {
    (1..=count)
        .map(|id| SimProcess::new(id, rng.gen_range(MIN_BURST..=MAX_BURST)))
        .collect()
}

/// As `round_robin_workload`, plus priorities uniform in [1, 10]
pub fn priority_workload<R: Rng + ?Sized>(count: u32, rng: &mut R) -> Vec<SimProcess> {
    (1..=count)
        .map(|id| {
            let burst = rng.gen_range(MIN_BURST..=MAX_BURST);
            SimProcess::new(id, burst).with_priority(rng.gen_range(MIN_PRIORITY..=MAX_PRIORITY))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ranges_and_ids() {
        let mut rng = StdRng::seed_from_u64(11);
        let procs = priority_workload(50, &mut rng);
        assert_eq!(procs.len(), 50);
        for (i, p) in procs.iter().enumerate() {
            assert_eq!(p.id, i as u32 + 1);
            assert!((1..=5).contains(&p.burst_time));
            assert!((1..=10).contains(&p.priority));
            assert_eq!(p.remaining_time, p.burst_time);
        }
    }

    #[test]
    fn test_round_robin_ignores_priority() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(round_robin_workload(8, &mut rng).iter().all(|p| p.priority == 0));
    }
}
