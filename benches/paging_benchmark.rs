/*!
 * Page Replacement Benchmark
 * FIFO vs LRU victim selection over random reference strings
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use os_sim_engine::memory::{MemoryReference, PagingProcess, PhysicalMemory, PolicyKind};
use os_sim_engine::{CancelToken, PagingSimulation, SimClock};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

const REFERENCES: usize = 10_000;

fn reference_string(processes: usize) -> (Vec<PagingProcess>, Vec<MemoryReference>) {
    let mut rng = StdRng::seed_from_u64(7);
    let clock = SimClock::new(Duration::from_micros(1), CancelToken::new());
    let sim = PagingSimulation::synthesize(PolicyKind::Fifo, processes, 1, clock, &mut rng);
    let references = sim.random_references(REFERENCES, &mut rng);
    (sim.processes().to_vec(), references)
}

fn benchmark_replacement(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_replacement");
    group.throughput(Throughput::Elements(REFERENCES as u64));

    let (processes, references) = reference_string(16);

    for frames in [4, 16, 64].iter() {
        for policy in [PolicyKind::Fifo, PolicyKind::Lru] {
            group.bench_with_input(
                BenchmarkId::new(policy.to_string(), frames),
                frames,
                |b, &frames| {
                    b.iter(|| {
                        let mut table = processes.clone();
                        let mut memory = PhysicalMemory::new(frames, policy);
                        for &reference in &references {
                            let access = memory.access(&mut table, reference).unwrap();
                            black_box(access);
                        }
                        black_box(memory.faults());
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, benchmark_replacement);
criterion_main!(benches);
