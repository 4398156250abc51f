use std::thread;

use serde::Deserialize;

use giftclip_orchestrator::{
    ClipConfig, ClipController, ClipEvent, Intent, MediaSignal, NullSink, SharedClip,
};
use giftclip_playback_core::SessionStatus;
use giftclip_reveal_core::{Point, RevealEvent, Size, Strategy};
use giftclip_test_fixtures::{configs, gestures};

#[derive(Deserialize)]
struct Trace {
    surface: Size,
    segments: Vec<Vec<Point>>,
}

fn config(name: &str) -> ClipConfig {
    let json = configs::json(name).expect("config fixture");
    ClipConfig::from_json(&json).expect("valid config fixture")
}

fn ready_controller(cfg: ClipConfig) -> ClipController {
    let mut clip = ClipController::new(cfg)
        .expect("controller")
        .with_sink(Box::new(NullSink));
    let session = clip.snapshot().session.expect("session");
    clip.signal(MediaSignal::Ready { session }).unwrap();
    clip
}

fn play_trace(clip: &mut ClipController, name: &str) {
    let trace: Trace = gestures::load(name).expect("gesture fixture");
    for segment in &trace.segments {
        for p in segment {
            clip.dispatch(Intent::PointerSample {
                x: p.x,
                y: p.y,
                width: trace.surface.width,
                height: trace.surface.height,
            })
            .unwrap();
        }
        clip.dispatch(Intent::PointerReleased).unwrap();
    }
}

#[test]
fn fling_unwrap_plays_without_settle() {
    let cfg = config("fling-unwrap");
    assert_eq!(cfg.reveal.strategy, Strategy::Fling);
    let mut clip = ready_controller(cfg);
    play_trace(&mut clip, "fling-up");

    let snap = clip.snapshot();
    assert!(snap.revealed);
    assert_eq!(snap.coverage, 1.0);
    assert_eq!(snap.status, SessionStatus::Playing);

    let out = clip.update(0.0);
    let reveal: Vec<_> = out
        .events
        .iter()
        .filter_map(|e| match e {
            ClipEvent::Reveal(ev) => Some(ev.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(reveal.len(), 2);
    assert!(matches!(reveal[0], RevealEvent::ThresholdCrossed { .. }));
    assert!(matches!(reveal[1], RevealEvent::Revealed { .. }));
}

#[test]
fn stroke_unwrap_settles_after_delay() {
    let cfg = config("stroke-unwrap");
    assert_eq!(cfg.reveal.strategy, Strategy::Stroke);
    let mut clip = ready_controller(cfg);
    play_trace(&mut clip, "scribble");

    let snap = clip.snapshot();
    assert!(snap.revealed);
    assert!(snap.coverage > 0.85);
    assert_eq!(snap.status, SessionStatus::Ready);

    clip.update(0.35);
    assert_eq!(clip.snapshot().status, SessionStatus::Playing);
}

#[test]
fn partial_swipe_keeps_gate_closed() {
    let mut cfg = ClipConfig::default();
    cfg.reveal.grid.threshold = 0.9;
    let mut clip = ready_controller(cfg);
    play_trace(&mut clip, "diagonal-swipe");
    clip.update(1.0);
    let snap = clip.snapshot();
    assert!(!snap.revealed);
    assert!((snap.coverage - 0.5).abs() < 1e-6);
    assert_eq!(snap.status, SessionStatus::Ready);
}

#[test]
fn shared_handle_serializes_threads() {
    let shared = SharedClip::new(
        ClipController::new(ClipConfig::default())
            .unwrap()
            .with_sink(Box::new(NullSink)),
    );
    let session = shared.snapshot().session.unwrap();
    shared.signal(MediaSignal::Ready { session }).unwrap();

    let workers: Vec<_> = (0..5)
        .map(|row| {
            let handle = shared.clone();
            thread::spawn(move || {
                for col in 0..10 {
                    handle
                        .dispatch(Intent::PointerSample {
                            x: col as f32 * 50.0 + 25.0,
                            y: row as f32 * 50.0 + 25.0,
                            width: 500.0,
                            height: 500.0,
                        })
                        .unwrap();
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }

    // Interleaved drags may interpolate across rows, so only a lower bound holds.
    let coverage = shared.snapshot().coverage;
    assert!(coverage >= 0.41, "coverage {coverage}");
    assert!(shared.with(|c| c.reveal().revealed()));
    shared.update(0.5);
    assert_eq!(shared.snapshot().status, SessionStatus::Playing);
}
