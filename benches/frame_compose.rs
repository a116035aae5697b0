use chrono::NaiveTime;
use clock_viewer::camera::Camera;
use clock_viewer::clock::hand_angles;
use clock_viewer::scene::{MeshHandle, SceneOrchestrator};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;

/// Benchmark: full per-frame composition (view, projection, node models)
fn bench_compose_frame(c: &mut Criterion) {
    let scene = SceneOrchestrator::new(
        MeshHandle(0),
        MeshHandle(1),
        MeshHandle(2),
        Some(MeshHandle(3)),
    );
    let mut camera = Camera::new(Vec3::new(0.0, 0.0, 0.25));
    camera.process_mouse_delta(35.0, -12.0);
    let angles = hand_angles(&NaiveTime::from_hms_opt(10, 8, 0).unwrap());

    c.bench_function("compose_frame", |b| {
        b.iter(|| {
            black_box(scene.compose(
                black_box(&camera),
                black_box(angles),
                black_box(640.0 / 480.0),
            ))
        })
    });
}

/// Benchmark: orientation update plus view matrix, the hot input path
fn bench_mouse_delta_and_view(c: &mut Criterion) {
    let mut camera = Camera::new(Vec3::ZERO);

    c.bench_function("mouse_delta_and_view", |b| {
        b.iter(|| {
            camera.process_mouse_delta(black_box(1.3), black_box(-0.7));
            black_box(camera.view_matrix())
        })
    });
}

/// Benchmark: time-to-angle mapping
fn bench_hand_angles(c: &mut Criterion) {
    let time = NaiveTime::from_hms_opt(18, 42, 0).unwrap();

    c.bench_function("hand_angles", |b| {
        b.iter(|| black_box(hand_angles(black_box(&time))))
    });
}

criterion_group!(
    benches,
    bench_compose_frame,
    bench_mouse_delta_and_view,
    bench_hand_angles
);
criterion_main!(benches);
