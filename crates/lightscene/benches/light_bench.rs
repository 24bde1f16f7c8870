//! Criterion benchmarks for light tessellation and spotlight tracking.
//! Focus sizes: num_levels in {10, 50, 100, 200}.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p lightscene

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use lightscene::light::{DirectionalLightField, LightCfg, RadialLightField, Screen, ShadowCfg};
use lightscene::scene::{Scene, ScreenTracker, Scheduler};
use nalgebra::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_screens(n: usize, seed: u64) -> Vec<Screen> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let theta: f64 = rng.gen::<f64>() * std::f64::consts::TAU;
            let d = rng.gen_range(1.0..4.0);
            let mid = Vector2::new(theta.cos(), theta.sin()) * d;
            let half = Vector2::new(-theta.sin(), theta.cos()) * rng.gen_range(0.2..1.0);
            Screen::segment(mid - half, mid + half)
        })
        .collect()
}

fn bench_tessellation(c: &mut Criterion) {
    let mut group = c.benchmark_group("light");
    for &levels in &[10usize, 50, 100, 200] {
        group.bench_with_input(BenchmarkId::new("ambient_new", levels), &levels, |b, &n| {
            let cfg = LightCfg {
                num_levels: n,
                ..LightCfg::ambient()
            };
            b.iter(|| {
                let _light = RadialLightField::new(cfg.clone()).unwrap();
            })
        });

        group.bench_with_input(BenchmarkId::new("spotlight_recompute", levels), &levels, |b, &n| {
            let cfg = LightCfg {
                num_levels: n,
                ..LightCfg::spotlight()
            };
            let screens = random_screens(64, 7);
            b.iter_batched(
                || DirectionalLightField::new(cfg.clone(), ShadowCfg::default()).unwrap(),
                |mut spot| {
                    for s in &screens {
                        spot.recompute(Some(s));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_tracker(c: &mut Criterion) {
    c.bench_function("screen_tracker_100_ticks", |b| {
        b.iter_batched(
            || {
                let mut scene = Scene::new();
                let screen = scene.add_screen(Screen::segment(
                    Vector2::new(2.0, -0.5),
                    Vector2::new(2.0, 0.5),
                ));
                let spot = scene.add_spotlight(
                    DirectionalLightField::new(LightCfg::spotlight(), ShadowCfg::default())
                        .unwrap(),
                    Some(screen),
                );
                let mut sched = Scheduler::new();
                sched.add(ScreenTracker::new(spot));
                (scene, sched, screen)
            },
            |(mut scene, mut sched, screen)| {
                for _ in 0..100 {
                    if let Some(s) = scene.screen_mut(screen) {
                        s.rotate(0.01);
                    }
                    sched.tick(&mut scene, 1.0 / 60.0);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_tessellation, bench_tracker);
criterion_main!(benches);
