use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kinetic_sandbox::*;
use std::hint::black_box;

fn prepare_world(body_count: usize, mode: ResolutionMode, parallel: bool) -> World {
    let mut world = World::default();
    world.set_resolution_mode(mode);
    world.set_parallel_enabled(parallel);
    let columns = 40;
    for i in 0..body_count {
        let body = Body::circle(4.0)
            .position(10.0 + 15.0 * (i % columns) as f32, 10.0 + 15.0 * (i / columns) as f32)
            .velocity(((i * 7) % 50) as f32 - 25.0, ((i * 13) % 50) as f32 - 25.0)
            .build()
            .expect("valid body");
        world.add_body(body);
    }
    world
}

fn bench_world_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_tick");
    for &count in &[50usize, 200, 600] {
        group.bench_with_input(BenchmarkId::new("sequential", count), &count, |b, &count| {
            let mut world = prepare_world(count, ResolutionMode::Sequential, false);
            b.iter(|| world.tick(black_box(0.1)))
        });
        group.bench_with_input(BenchmarkId::new("snapshot", count), &count, |b, &count| {
            let mut world = prepare_world(count, ResolutionMode::Snapshot, false);
            b.iter(|| world.tick(black_box(0.1)))
        });
        group.bench_with_input(
            BenchmarkId::new("snapshot_parallel", count),
            &count,
            |b, &count| {
                let mut world = prepare_world(count, ResolutionMode::Snapshot, true);
                b.iter(|| world.tick(black_box(0.1)))
            },
        );
    }
    group.finish();
}

fn bench_sample_buffer(c: &mut Criterion) {
    c.bench_function("sample_buffer_enqueue_full", |b| {
        let mut buffer = SampleBuffer::new(500, 100.0).expect("valid buffer");
        let mut t = 0.0f32;
        b.iter(|| {
            t += 0.1;
            buffer.enqueue(black_box(t.sin()), t);
        })
    });

    c.bench_function("sample_buffer_autoscale", |b| {
        let mut buffer = SampleBuffer::new(500, 100.0).expect("valid buffer");
        for i in 0..500 {
            buffer.enqueue((i as f32 * 0.1).sin() * 40.0, i as f32);
        }
        b.iter(|| black_box(buffer.autoscale()))
    });
}

criterion_group!(benches, bench_world_tick, bench_sample_buffer);
criterion_main!(benches);
