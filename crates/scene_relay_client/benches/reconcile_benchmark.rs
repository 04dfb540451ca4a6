//! Benchmark for snapshot decoding, reconciliation and frame stepping.
//!
//! TARGET: a 2,000-part snapshot decoded and reconciled well inside one
//! 100 ms poll interval; a frame over the same scene inside 1/60 s.
//!
//! Run with: cargo bench --package scene_relay_client --bench reconcile_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scene_relay_client::{Camera, HeadlessBackend, ParsedSnapshot, RenderLoop, SceneReconciler};
use serde_json::{json, Value};

const SHAPES: [&str; 5] = ["Block", "Ball", "Cylinder", "Wedge", "CornerWedge"];

fn snapshot_document(rng: &mut StdRng, count: usize) -> Value {
    let parts: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "id": format!("part-{i}"),
                "type": SHAPES[i % SHAPES.len()],
                "size": [rng.gen_range(1..5), rng.gen_range(1..5), rng.gen_range(1..5)],
                "pos": [
                    rng.gen_range(-100.0..100.0),
                    rng.gen_range(0.0..50.0),
                    rng.gen_range(-100.0..100.0)
                ],
                "rotation": [0, rng.gen_range(0.0..360.0), 0],
                "color": format!("#{:06x}", rng.gen_range(0..0x00ff_ffffu32)),
                "transparency": 0,
                "isPlayer": i % 50 == 0
            })
        })
        .collect();
    Value::Array(parts)
}

/// Same ids, every position moved: the steady-state poll.
fn jitter(rng: &mut StdRng, document: &Value) -> Value {
    let mut moved = document.clone();
    if let Some(parts) = moved.as_array_mut() {
        for part in parts {
            part["pos"] = json!([
                rng.gen_range(-100.0..100.0),
                rng.gen_range(0.0..50.0),
                rng.gen_range(-100.0..100.0)
            ]);
        }
    }
    moved
}

fn benchmark_decode(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut group = c.benchmark_group("snapshot_decode");

    for count in [100usize, 2_000] {
        let document = snapshot_document(&mut rng, count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &document, |b, doc| {
            b.iter(|| black_box(ParsedSnapshot::from_json(black_box(doc))))
        });
    }
    group.finish();
}

fn benchmark_steady_reconcile(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut group = c.benchmark_group("steady_reconcile");

    for count in [100usize, 2_000] {
        let base = snapshot_document(&mut rng, count);
        let frames: Vec<_> = (0..8)
            .filter_map(|_| ParsedSnapshot::from_json(&jitter(&mut rng, &base)).ok())
            .collect();

        let mut scene = SceneReconciler::new();
        let mut backend = HeadlessBackend::new();
        if let Some(first) = frames.first() {
            scene.reconcile(&first.parts, &mut backend);
        }

        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            let mut i = 0usize;
            b.iter(|| {
                i = i.wrapping_add(1);
                let snapshot = &frames[i % frames.len()];
                black_box(scene.reconcile(black_box(&snapshot.parts), &mut backend))
            });
        });
    }
    group.finish();
}

fn benchmark_membership_churn(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let full = ParsedSnapshot::from_json(&snapshot_document(&mut rng, 1_000)).unwrap_or_default();
    let half: Vec<_> = full.parts.iter().step_by(2).cloned().collect();

    c.bench_function("membership_churn_1000", |b| {
        let mut scene = SceneReconciler::new();
        let mut backend = HeadlessBackend::new();
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let parts = if flip { &full.parts } else { &half };
            black_box(scene.reconcile(parts, &mut backend))
        });
    });
}

fn benchmark_frame(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(11);
    let base = snapshot_document(&mut rng, 2_000);
    let moved = jitter(&mut rng, &base);

    // Targets differ from current transforms, so every frame interpolates.
    let mut scene = SceneReconciler::new();
    let mut backend = HeadlessBackend::new();
    for document in [&base, &moved] {
        let snapshot = ParsedSnapshot::from_json(document).unwrap_or_default();
        scene.reconcile(&snapshot.parts, &mut backend);
    }

    let camera = Camera::new(1280, 720);
    let mut render_loop = RenderLoop::default();

    c.bench_function("frame_2000_parts", |b| {
        b.iter(|| black_box(render_loop.frame(1.0 / 60.0, &mut scene, &mut backend, &camera)))
    });
}

criterion_group!(
    benches,
    benchmark_decode,
    benchmark_steady_reconcile,
    benchmark_membership_churn,
    benchmark_frame
);
criterion_main!(benches);
