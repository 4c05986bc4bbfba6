use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use raffle::{
    DrawStateManagement, PoolManagement, RaffleState, ReelConfig, ReelPlan,
    draw::SecureSelector,
    pool::{Origin, Participant, ParticipantPool},
};
use std::hint::black_box;

/// Helper to create N distinct registrations
fn participants(n: usize) -> Vec<Participant> {
    (0..n)
        .map(|i| {
            Participant::new(
                format!("p{i}"),
                &format!("First{i}"),
                &format!("Last{i}"),
                Origin::Registration,
            )
        })
        .collect()
}

/// Benchmark reel plan building for growing pools
fn bench_reel_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("reel_plan_build");
    let config = ReelConfig::default();

    for size in [10, 100, 1_000] {
        let mut pool = ParticipantPool::new();
        pool.merge(participants(size));
        let winner = pool.available()[size / 2].id.clone();
        let mut selector = SecureSelector::new();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                ReelPlan::build(1, pool.available(), &winner, &config, &mut selector)
                    .expect("winner is in pool")
            });
        });
    }

    group.finish();
}

/// Benchmark merging a batch that is half duplicates
fn bench_merge(c: &mut Criterion) {
    let batch = participants(1_000);

    c.bench_function("merge_1000_half_duplicates", |b| {
        b.iter(|| {
            let mut pool = ParticipantPool::new();
            pool.merge(batch[..500].iter().cloned());
            black_box(pool.merge(batch.iter().cloned()))
        });
    });
}

/// Benchmark a complete start → complete → next round cycle
fn bench_draw_cycle(c: &mut Criterion) {
    let mut raffle = RaffleState::new();
    raffle.merge(participants(100));

    c.bench_function("draw_cycle_100", |b| {
        b.iter(|| {
            let plan = raffle.start_draw().expect("pool refills on exhaustion");
            raffle.animation_complete(plan.draw_id);
            black_box(raffle.next_round().expect("round ended"));
            raffle.drain_events();
        });
    });
}

criterion_group!(benches, bench_reel_plan, bench_merge, bench_draw_cycle);
criterion_main!(benches);
