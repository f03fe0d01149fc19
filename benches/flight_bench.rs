use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{DQuat, DVec3};
use orbiter::flight::orientation::OrientationTracker;
use orbiter::{FlightEngine, Options};

fn orientation_update_benchmark(c: &mut Criterion) {
    let tracker = OrientationTracker::new();
    let old = DVec3::new(0.0, 0.0, 2.75);
    let new = DVec3::new(0.045, 0.0, 2.7496);
    c.bench_function("orientation_update", |b| {
        b.iter(|| {
            black_box(tracker.update(
                black_box(DVec3::Z),
                black_box(new),
                black_box(old),
                black_box(DQuat::IDENTITY),
            ))
        })
    });
}

fn engine_advance_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_advance");

    for frames in [60_u32, 600, 6000] {
        group.bench_function(format!("{frames}_frames"), |b| {
            b.iter(|| {
                let Ok(mut engine) = FlightEngine::new(&Options::default(), 1.0)
                else {
                    return;
                };
                for i in 1..=frames {
                    let _ = black_box(engine.advance(f64::from(i) / 60.0));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, orientation_update_benchmark, engine_advance_benchmark);
criterion_main!(benches);
