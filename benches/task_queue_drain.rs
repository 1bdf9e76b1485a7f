//! Benchmarks `InMemoryTaskQueue` fill-then-drain at a few queue depths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fleetsched::domain::models::App;
use fleetsched::domain::ports::TaskQueue;
use fleetsched::services::InMemoryTaskQueue;
use tokio::runtime::Runtime;

fn bench_drain(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let mut group = c.benchmark_group("task_queue_drain");

    for depth in [10usize, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.to_async(&runtime).iter(|| async move {
                let queue = InMemoryTaskQueue::new();
                let apps: Vec<App> = (0..depth).map(|i| App::new(format!("app-{i}"), 1, 1.0)).collect();
                queue.add_all(apps).await;
                black_box(queue.remove_all().await)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_drain);
criterion_main!(benches);
