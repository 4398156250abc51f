use std::f32::consts::PI;

use giftclip_reveal_core::{
    config::{GridConfig, RevealConfig, Strategy},
    CoverageModel, GridCoverage, Point, RevealEngine, RevealEvent, Size,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Trace {
    surface: Size,
    segments: Vec<Vec<Point>>,
}

fn trace(name: &str) -> Trace {
    giftclip_test_fixtures::gestures::load(name).expect("gesture fixture")
}

fn replay_trace(engine: &mut RevealEngine, t: &Trace) {
    for seg in &t.segments {
        for p in seg {
            engine.apply_sample(*p, t.surface);
        }
        engine.end_gesture();
    }
}

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

/// Tap the centres of the first `n` cells of a 10x10 grid (500x500 surface).
fn tap_cells(engine: &mut RevealEngine, n: usize) {
    let surface = Size::new(500.0, 500.0);
    for i in 0..n {
        let col = (i % 10) as f32;
        let row = (i / 10) as f32;
        engine.apply_sample(Point::new(col * 50.0 + 25.0, row * 50.0 + 25.0), surface);
        engine.end_gesture();
    }
}

#[test]
fn grid_reveal_waits_for_settle_delay() {
    let mut engine = RevealEngine::new(&RevealConfig::default(), 4).unwrap();
    tap_cells(&mut engine, 40);
    assert!(!engine.revealed());
    assert!(engine.take_events().is_empty());

    tap_cells(&mut engine, 41);
    assert!(engine.revealed());
    approx(engine.coverage(), 0.41, 1e-6);
    let events = engine.take_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        RevealEvent::ThresholdCrossed { token: 4, strategy: Strategy::Grid, .. }
    ));
    assert!(engine.settle_pending());

    engine.update(0.1);
    assert!(engine.take_events().is_empty());
    assert!(!engine.settled());

    engine.update(0.25);
    let events = engine.take_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], RevealEvent::Revealed { token: 4, .. }));
    assert!(engine.settled());
}

#[test]
fn samples_after_reveal_are_ignored() {
    let mut engine = RevealEngine::new(&RevealConfig::default(), 0).unwrap();
    tap_cells(&mut engine, 45);
    let frozen = engine.coverage();
    approx(frozen, 0.41, 1e-6);
    engine.update(1.0);
    let _ = engine.take_events();

    tap_cells(&mut engine, 100);
    assert_eq!(engine.coverage(), frozen);
    engine.update(1.0);
    assert!(engine.take_events().is_empty());
}

#[test]
fn partial_progress_survives_release() {
    let mut engine = RevealEngine::new(&RevealConfig::default(), 0).unwrap();
    tap_cells(&mut engine, 20);
    engine.end_gesture();
    engine.end_gesture();
    approx(engine.coverage(), 0.2, 1e-6);
}

#[test]
fn cancelled_settle_never_fires() {
    let mut engine = RevealEngine::new(&RevealConfig::default(), 9).unwrap();
    tap_cells(&mut engine, 50);
    let _ = engine.take_events();
    assert!(engine.cancel_pending());
    engine.update(5.0);
    assert!(engine.take_events().is_empty());
    assert!(engine.revealed());
    assert!(!engine.settled());
}

#[test]
fn zero_settle_delay_reveals_immediately() {
    let cfg = RevealConfig {
        settle_delay_ms: 0,
        ..RevealConfig::default()
    };
    let mut engine = RevealEngine::new(&cfg, 2).unwrap();
    tap_cells(&mut engine, 41);
    let events = engine.take_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[1], RevealEvent::Revealed { token: 2, .. }));
}

#[test]
fn zigzag_fixture_covers_whole_grid() {
    let t = trace("zigzag-full");
    let mut grid = GridCoverage::new(GridConfig::default());
    for seg in &t.segments {
        for p in seg {
            grid.apply(*p, t.surface);
        }
        grid.end_gesture();
    }
    assert_eq!(grid.total_cells(), 8);
    assert_eq!(grid.coverage(), 1.0);
}

#[test]
fn diagonal_swipe_reveals_half_the_grid() {
    let t = trace("diagonal-swipe");
    let mut grid = GridCoverage::new(GridConfig::default());
    for p in &t.segments[0] {
        grid.apply(*p, t.surface);
    }
    assert_eq!(grid.revealed_cells(), 4);
    assert_eq!(grid.coverage(), 0.5);
    assert!(grid.threshold_crossed());
}

#[test]
fn scribble_crosses_stroke_threshold_at_22_samples() {
    let t = trace("scribble");
    let mut engine = RevealEngine::new(&RevealConfig::with_strategy(Strategy::Stroke), 1).unwrap();
    replay_trace(&mut engine, &t);
    assert!(engine.revealed());
    let expected = 22.0 * PI * 40.0 * 40.0 * 0.7 / (300.0 * 300.0);
    approx(engine.coverage(), expected, 1e-5);
}

#[test]
fn fling_fixture_unwraps_without_settle() {
    let t = trace("fling-up");
    let mut engine = RevealEngine::new(&RevealConfig::with_strategy(Strategy::Fling), 3).unwrap();

    // first segment stops short and is released
    for p in &t.segments[0] {
        engine.apply_sample(*p, t.surface);
    }
    engine.end_gesture();
    assert!(!engine.revealed());
    assert_eq!(engine.coverage(), 0.0);

    for p in &t.segments[1] {
        engine.apply_sample(*p, t.surface);
    }
    assert!(engine.revealed());
    assert!(!engine.settle_pending());
    let events = engine.take_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[1], RevealEvent::Revealed { token: 3, coverage } if coverage == 1.0));
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = RevealConfig::default();
    cfg.grid.cell_size = 0.0;
    assert!(RevealEngine::new(&cfg, 0).is_err());
}
