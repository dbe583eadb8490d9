use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spin_pool::pool::{Config, IdleStrategy, ThreadPool};
use std::hint::black_box;

fn create_pool(idle: IdleStrategy) -> ThreadPool {
    ThreadPool::with_config(Config {
        num_threads: Some(num_cpus::get()),
        idle,
        ..Default::default()
    })
    .unwrap()
}

// Benchmark 1: submit + await round trip
fn bench_submit_await(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_await");

    for size in [100, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));

        for idle in [IdleStrategy::Yield, IdleStrategy::Park] {
            let pool = create_pool(idle);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", idle), size),
                &size,
                |b, &size| {
                    b.iter(|| {
                        let handles: Vec<_> = (0..size)
                            .map(|i| pool.submit(move || black_box(i)))
                            .collect();
                        for handle in handles {
                            black_box(handle.await_result().unwrap());
                        }
                    });
                },
            );
        }
    }
    group.finish();
}

// Benchmark 2: small CPU-bound tasks
fn bench_cpu_work(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpu_work");
    let pool = create_pool(IdleStrategy::Yield);

    for iterations in [1_000u64, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("sum_of_squares", iterations),
            &iterations,
            |b, &iterations| {
                b.iter(|| {
                    let handles: Vec<_> = (0..64)
                        .map(|_| {
                            pool.submit_with(
                                |n: u64| (0..n).map(|x| x.wrapping_mul(x)).fold(0u64, u64::wrapping_add),
                                iterations,
                            )
                        })
                        .collect();
                    for handle in handles {
                        black_box(handle.await_result().unwrap());
                    }
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_submit_await, bench_cpu_work);
criterion_main!(benches);
