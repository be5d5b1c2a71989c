//! End-to-end tests of the landmark → gesture → pointer pipeline


use face_gesture_cursor::{
    controller::{ControllerSettings, GestureCursorController, StatusLevel},
    debouncer::GestureState,
    extractor::{CalibrationStage, FrameOutcome},
    landmarks::LandmarkSet,
    pointer::PointerEventKind,
};
use std::time::{Duration, Instant};
use test_helpers::{face, neutral_face, RecordingTarget, NEUTRAL_BROW_GAP, NEUTRAL_MOUTH_WIDTH};

fn ms(base: Instant, offset: u64) -> Instant {
    base + Duration::from_millis(offset)
}

fn controller(t0: Instant) -> GestureCursorController<RecordingTarget> {
    let mut c = GestureCursorController::new(
        RecordingTarget::new(1280.0, 720.0),
        ControllerSettings::default(),
        t0,
    );
    c.start_tracking();
    c
}

fn calibrated(t0: Instant) -> GestureCursorController<RecordingTarget> {
    let mut c = controller(t0);
    c.on_landmarks(t0, &neutral_face());
    c.on_landmarks(t0, &neutral_face());
    c
}

#[test]
fn test_first_frame_only_captures_baseline() {
    let t0 = Instant::now();
    let mut c = controller(t0);

    // Head turned far off centre: still only a baseline
    let outcome = c.on_landmarks(t0, &face(1.0, 1.0, (0.9, 0.9)));
    assert_eq!(
        outcome,
        Some(FrameOutcome::Calibrating {
            stage: CalibrationStage::MouthWidth,
            smile_ratio: None
        })
    );
    assert!(c.target().events.is_empty());
    assert_eq!(c.velocity().x, 0.0);
    assert_eq!(c.velocity().y, 0.0);

    let baseline = c.extractor().baseline_mouth_width().unwrap();
    assert!((baseline - NEUTRAL_MOUTH_WIDTH).abs() < 1e-9);

    match c.on_landmarks(ms(t0, 33), &face(1.08, 1.0, (0.5, 0.5))) {
        Some(FrameOutcome::Calibrating {
            stage: CalibrationStage::EyebrowDistance,
            smile_ratio: Some(ratio),
        }) => assert!((ratio - 1.08).abs() < 1e-9),
        other => panic!("unexpected outcome {other:?}"),
    }
    let brow = c.extractor().baseline_eyebrow_distance().unwrap();
    assert!((brow - NEUTRAL_BROW_GAP).abs() < 1e-9);
}

#[test]
fn test_smile_sequence_fires_once() {
    let t0 = Instant::now();
    let mut c = calibrated(t0);

    let ratios = [1.0, 1.12, 1.12, 1.03];
    let mut clicks_after = Vec::new();
    for (i, ratio) in ratios.iter().enumerate() {
        c.on_landmarks(ms(t0, 1000 + i as u64 * 600), &face(*ratio, 1.0, (0.5, 0.5)));
        clicks_after.push(c.target().count(PointerEventKind::Click));
    }

    assert_eq!(clicks_after, vec![0, 1, 1, 1]);
    assert_eq!(c.debouncer().smile_state(), GestureState::Idle);
}

#[test]
fn test_eyebrow_suppressed_after_smile() {
    let t0 = Instant::now();
    let mut c = calibrated(t0);

    c.on_landmarks(ms(t0, 1000), &face(1.2, 1.0, (0.5, 0.5)));
    assert_eq!(c.target().count(PointerEventKind::Click), 1);

    c.on_landmarks(ms(t0, 1300), &face(1.0, 1.3, (0.5, 0.5)));
    assert_eq!(c.target().count(PointerEventKind::ContextMenu), 0);

    c.on_landmarks(ms(t0, 1501), &face(1.0, 1.3, (0.5, 0.5)));
    assert_eq!(c.target().count(PointerEventKind::ContextMenu), 1);
}

#[test]
fn test_eyebrow_own_cooldown() {
    let t0 = Instant::now();
    let mut c = calibrated(t0);

    c.on_landmarks(ms(t0, 1000), &face(1.0, 1.3, (0.5, 0.5)));
    c.on_landmarks(ms(t0, 1100), &neutral_face());
    c.on_landmarks(ms(t0, 1700), &face(1.0, 1.3, (0.5, 0.5)));
    assert_eq!(c.target().count(PointerEventKind::ContextMenu), 1);

    c.on_landmarks(ms(t0, 1800), &neutral_face());
    c.on_landmarks(ms(t0, 2100), &face(1.0, 1.3, (0.5, 0.5)));
    assert_eq!(c.target().count(PointerEventKind::ContextMenu), 2);
}

#[test]
fn test_click_lands_at_cursor() {
    let t0 = Instant::now();
    let mut c = calibrated(t0);

    // Nose left of centre in the mirrored image: cursor heads right
    c.on_landmarks(ms(t0, 10), &face(1.0, 1.0, (0.2, 0.5)));
    for i in 1..=3 {
        c.on_display_refresh(t0 + Duration::from_secs_f64(0.016_67 * f64::from(i)));
    }
    let pos = c.position();
    assert!(pos.x > 640.0);

    c.on_landmarks(ms(t0, 1000), &face(1.2, 1.0, (0.2, 0.5)));
    let click = c
        .target()
        .events
        .iter()
        .find(|e| e.kind == PointerEventKind::Click)
        .copied()
        .unwrap();
    assert_eq!(click.position, pos);
}

#[test]
fn test_cursor_keeps_moving_between_frames() {
    let t0 = Instant::now();
    let mut c = calibrated(t0);
    c.on_landmarks(t0, &face(1.0, 1.0, (0.5, 0.8)));

    let mut last_y = c.position().y;
    for i in 1..=4 {
        let pos = c.on_display_refresh(t0 + Duration::from_secs_f64(0.016_67 * f64::from(i)));
        assert!(pos.y > last_y);
        last_y = pos.y;
    }
    assert_eq!(c.target().count(PointerEventKind::Move), 4);
}

#[test]
fn test_cursor_pinned_to_viewport_edge() {
    let t0 = Instant::now();
    let mut c = calibrated(t0);
    c.on_landmarks(t0, &face(1.0, 1.0, (0.0, 1.0)));

    for i in 1..=200 {
        let pos = c.on_display_refresh(ms(t0, i * 16));
        assert!((0.0..=1280.0).contains(&pos.x));
        assert!((0.0..=720.0).contains(&pos.y));
    }
    let pos = c.position();
    assert_eq!((pos.x, pos.y), (1280.0, 720.0));
}

#[test]
fn test_lost_face_keeps_velocity() {
    let t0 = Instant::now();
    let mut c = calibrated(t0);
    c.on_landmarks(t0, &face(1.0, 1.0, (0.8, 0.5)));
    let v = c.velocity();
    assert!(v.x < 0.0);

    assert_eq!(c.on_landmarks(ms(t0, 33), &LandmarkSet::empty()), Some(FrameOutcome::NoFace));
    assert_eq!(c.velocity(), v);
    assert_eq!(c.status().level, StatusLevel::Warning);
    assert_eq!(c.status().text, "No face detected");
}

#[test]
fn test_flash_reverts_after_duration() {
    let t0 = Instant::now();
    let mut c = calibrated(t0);
    c.on_landmarks(ms(t0, 1000), &face(1.2, 1.0, (0.5, 0.5)));

    c.on_display_refresh(ms(t0, 1100));
    c.on_display_refresh(ms(t0, 1149));
    c.on_display_refresh(ms(t0, 1150));

    let colors: Vec<&str> = c.target().indicators.iter().map(|i| i.color.as_str()).collect();
    assert_eq!(colors, vec!["#00ff00", "#00ff00", "#ff0000"]);
}
