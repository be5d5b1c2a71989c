//! Benchmarks for the per-frame and per-refresh paths

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use face_gesture_cursor::{
    constants::{
        FACE_MESH_LANDMARKS, LEFT_EYEBROW, LEFT_EYE_OUTER, MOUTH_LEFT_CORNER, MOUTH_RIGHT_CORNER,
        NOSE_TIP, RIGHT_EYEBROW, RIGHT_EYE_OUTER,
    },
    controller::{ControllerSettings, GestureCursorController},
    debouncer::GestureDebouncer,
    extractor::{FrameOutcome, GestureExtractor},
    filters::create_filter,
    frame_source::parse_frame,
    landmarks::{Landmark, LandmarkSet},
    motion::{Velocity, Viewport},
    pointer::LogPointerTarget,
    response_curve::{map_turn, Axis},
};
use rand::Rng;
use std::time::{Duration, Instant};

fn jitter(rng: &mut impl Rng) -> f64 {
    rng.gen_range(-0.002..0.002)
}

/// A face-mesh frame with slight jitter on every point
fn noisy_face(rng: &mut impl Rng, smile: f64, nose: (f64, f64)) -> LandmarkSet {
    let mut set = LandmarkSet::new(
        (0..FACE_MESH_LANDMARKS)
            .map(|_| Landmark::new(rng.gen_range(0.3..0.7), rng.gen_range(0.3..0.7)))
            .collect(),
    );
    let half_mouth = 0.1 * smile;
    set.set(MOUTH_LEFT_CORNER, Landmark::new(0.5 - half_mouth + jitter(rng), 0.72));
    set.set(MOUTH_RIGHT_CORNER, Landmark::new(0.5 + half_mouth + jitter(rng), 0.72));
    set.set(LEFT_EYE_OUTER, Landmark::new(0.38, 0.42));
    set.set(RIGHT_EYE_OUTER, Landmark::new(0.62, 0.42));
    set.set(LEFT_EYEBROW, Landmark::new(0.38, 0.37 + jitter(rng)));
    set.set(RIGHT_EYEBROW, Landmark::new(0.62, 0.37 + jitter(rng)));
    set.set(NOSE_TIP, Landmark::new(nose.0 + jitter(rng), nose.1 + jitter(rng)));
    set
}

fn bench_frame_processing(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_processing");
    let mut rng = rand::thread_rng();

    let frames: Vec<LandmarkSet> = (0..100)
        .map(|i| {
            let t = f64::from(i) * 0.1;
            noisy_face(&mut rng, 1.0 + 0.15 * t.sin().max(0.0), (0.5 + 0.2 * t.cos(), 0.5))
        })
        .collect();

    group.bench_function("extract", |b| {
        let mut extractor = GestureExtractor::default();
        extractor.process(&frames[0]);
        extractor.process(&frames[0]);
        b.iter(|| {
            for frame in &frames {
                black_box(extractor.process(black_box(frame)));
            }
        });
    });

    group.bench_function("extract_and_debounce", |b| {
        let mut extractor = GestureExtractor::default();
        let mut debouncer = GestureDebouncer::default();
        extractor.process(&frames[0]);
        extractor.process(&frames[0]);
        let t0 = Instant::now();
        b.iter(|| {
            for (i, frame) in frames.iter().enumerate() {
                if let FrameOutcome::Tracked(r) = extractor.process(frame) {
                    let now = t0 + Duration::from_millis(i as u64 * 33);
                    black_box(debouncer.update(now, r.smile_ratio, r.eyebrow_ratio));
                }
            }
        });
    });

    let lines: Vec<String> = frames
        .iter()
        .take(10)
        .map(|f| serde_json::to_string(&serde_json::json!({ "multiFaceLandmarks": [f] })).unwrap())
        .collect();
    group.bench_function("parse_stream_line", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(parse_frame(black_box(line)).unwrap());
            }
        });
    });

    group.finish();
}

fn bench_response_curve(c: &mut Criterion) {
    let offsets: Vec<f64> = (0..1000).map(|i| f64::from(i) / 1000.0 - 0.5).collect();
    c.bench_function("map_turn", |b| {
        b.iter(|| {
            for &o in &offsets {
                black_box(map_turn(black_box(o), Axis::Horizontal));
            }
        });
    });
}

fn bench_render_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_tick");

    for filter_name in ["none", "exponential:0.5", "moving_average:5"] {
        group.bench_with_input(BenchmarkId::new("refresh", filter_name), &filter_name, |b, name| {
            let t0 = Instant::now();
            let target = LogPointerTarget::new(Viewport::new(1920.0, 1080.0));
            let filter = create_filter(name).unwrap();
            let mut controller =
                GestureCursorController::new(target, ControllerSettings::default(), t0).with_filter(filter);
            controller.start_tracking();

            let mut rng = rand::thread_rng();
            let face = noisy_face(&mut rng, 1.0, (0.4, 0.55));
            controller.on_landmarks(t0, &face);
            controller.on_landmarks(t0, &face);
            controller.on_landmarks(t0, &face);

            let mut tick = 0u32;
            b.iter(|| {
                tick += 1;
                let now = t0 + Duration::from_micros(16_667 * u64::from(tick));
                black_box(controller.on_display_refresh(now))
            });
        });
    }

    group.finish();
}

fn bench_velocity_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("velocity_filters");
    let mut rng = rand::thread_rng();
    let samples: Vec<Velocity> = (0..100)
        .map(|_| Velocity::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect();

    for name in ["none", "exponential:0.3", "moving_average:10"] {
        let mut filter = create_filter(name).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                for &v in &samples {
                    black_box(filter.apply(black_box(v)));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_frame_processing,
    bench_response_curve,
    bench_render_tick,
    bench_velocity_filters
);
criterion_main!(benches);
