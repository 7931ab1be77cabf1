/*!
 * Scheduler Simulation Tests
 * Metric conservation and ordering for Round Robin and Priority runs
 */

use os_sim_engine::process::{priority_workload, round_robin_workload, SimProcess};
use os_sim_engine::{CancelToken, Scheduler, SimClock};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::time::Duration;

fn clock() -> SimClock {
    SimClock::new(Duration::from_micros(1), CancelToken::new())
}

#[test]
fn test_round_robin_reference_schedule() {
    let processes = vec![
        SimProcess::new(1, 3),
        SimProcess::new(2, 1),
        SimProcess::new(3, 4),
    ];
    let report = Scheduler::round_robin(2, clock())
        .run(processes, &mut io::sink())
        .unwrap();

    let order: Vec<u32> = report.processes.iter().map(|p| p.id).collect();
    assert_eq!(order, vec![2, 1, 3]);

    let p1 = report.process(1).unwrap();
    assert_eq!((p1.wait_time, p1.turnaround_time), (3, 6));
    let p3 = report.process(3).unwrap();
    assert_eq!((p3.wait_time, p3.turnaround_time), (4, 8));
    assert_eq!(report.makespan(), 8);
    assert!((report.average_wait - 3.0).abs() < 1e-9);
    assert!((report.average_turnaround - 17.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_priority_runs_in_ascending_priority() {
    let processes = vec![
        SimProcess::new(1, 2).with_priority(5),
        SimProcess::new(2, 3).with_priority(1),
        SimProcess::new(3, 1).with_priority(5),
        SimProcess::new(4, 4).with_priority(3),
    ];
    let report = Scheduler::priority(clock())
        .run(processes, &mut io::sink())
        .unwrap();

    let order: Vec<u32> = report.processes.iter().map(|p| p.id).collect();
    // Ties keep arrival order
    assert_eq!(order, vec![2, 4, 1, 3]);
    assert_eq!(report.process(2).unwrap().wait_time, 0);
    assert_eq!(report.process(4).unwrap().wait_time, 3);
    assert_eq!(report.process(1).unwrap().wait_time, 7);
    assert_eq!(report.process(3).unwrap().turnaround_time, 10);
}

#[test]
fn test_progress_lines_written() {
    let mut out = Vec::new();
    Scheduler::round_robin(1, clock())
        .run(vec![SimProcess::new(1, 2)], &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Running Process 1 for 1s [remaining: 1s]"));
    assert!(text.contains("Running Process 1 for 1s [COMPLETING]"));
    assert!(text.contains("Simulation complete!"));
}

#[test]
fn test_cancelled_run_reports_interrupted() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let clock = SimClock::new(Duration::from_micros(1), cancel);
    let report = Scheduler::round_robin(2, clock)
        .run(vec![SimProcess::new(1, 3)], &mut io::sink())
        .unwrap();
    assert!(report.interrupted);
    assert!(report.processes.is_empty());
    assert_eq!(report.total_processes, 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_robin_conserves_time(seed in any::<u64>(), count in 1u32..12, quantum in 1u64..6) {
        let processes = round_robin_workload(count, &mut StdRng::seed_from_u64(seed));
        let total_burst: u64 = processes.iter().map(|p| p.burst_time).sum();
        let report = Scheduler::round_robin(quantum, clock())
            .run(processes, &mut io::sink())
            .unwrap();

        prop_assert_eq!(report.processes.len(), count as usize);
        prop_assert_eq!(report.makespan(), total_burst);
        for p in &report.processes {
            prop_assert_eq!(p.turnaround_time, p.wait_time + p.burst_time);
            prop_assert!(p.turnaround_time <= total_burst);
        }

        // Each process completes in exactly one slice, its last
        for p in &report.processes {
            let slices: Vec<_> = report.timeline.iter().filter(|s| s.pid == p.id).collect();
            let completing = slices.iter().filter(|s| s.completed).count();
            prop_assert_eq!(completing, 1);
            prop_assert!(slices.last().unwrap().completed);
            prop_assert_eq!(slices.iter().map(|s| s.length).sum::<u64>(), p.burst_time);
            prop_assert!(slices.iter().all(|s| s.length <= quantum));
        }
    }

    #[test]
    fn prop_priority_is_sorted_and_gapless(seed in any::<u64>(), count in 1u32..12) {
        let processes = priority_workload(count, &mut StdRng::seed_from_u64(seed));
        let report = Scheduler::priority(clock())
            .run(processes, &mut io::sink())
            .unwrap();

        let priorities: Vec<u8> = report.processes.iter().map(|p| p.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        prop_assert_eq!(priorities, sorted);

        let mut now = 0;
        for p in &report.processes {
            prop_assert_eq!(p.wait_time, now);
            now += p.burst_time;
            prop_assert_eq!(p.turnaround_time, now);
        }
    }
}
