use std::time::{Duration, Instant};

use mandelview_core::{evaluate, EngineConfig, View};
use mandelview_render::{colorize, Engine, FrameBuffer, Rgb};

fn config(width: u32, height: u32, workers: usize) -> EngineConfig {
    EngineConfig {
        width,
        height,
        max_iterations: 128,
        max_detail_level: 3,
        interaction_threshold_ms: 10,
        workers: Some(workers),
    }
}

fn settle(engine: &mut Engine) {
    let later = Instant::now() + Duration::from_secs(5);
    while engine.needs_render() {
        engine.render_next_frame_at(later).unwrap();
    }
}

#[test]
fn end_to_end_progressive_render() {
    let mut engine = Engine::new(config(120, 90, 4)).unwrap();
    settle(&mut engine);
    assert_eq!(engine.detail_level(), 3);

    let buf = engine.buffer().unwrap();
    assert_eq!(buf.pixels().len(), 120 * 90 * 3);

    // The default view shows both the set and its exterior.
    let pixels: Vec<Rgb> = (0..90)
        .flat_map(|y| (0..120).map(move |x| (x, y)))
        .map(|(x, y)| buf.pixel(x, y))
        .collect();
    assert!(pixels.iter().any(|&p| p == Rgb::BLACK));
    assert!(pixels.iter().any(|&p| p != Rgb::BLACK));
}

#[test]
fn full_detail_matches_direct_evaluation() {
    let (w, h) = (48, 30);
    let mut engine = Engine::new(config(w, h, 3)).unwrap();
    engine.zoom_by(2.5).unwrap();
    engine.pan(-0.4, 0.1).unwrap();
    settle(&mut engine);

    let mapping = engine.viewport().view().mapping(w, h);
    for y in 0..h {
        for x in 0..w {
            let c = mapping.pixel_to_complex(x, y);
            assert_eq!(
                engine.buffer().unwrap().pixel(x, y),
                colorize(evaluate(c.re, c.im, 128), 128),
                "pixel ({x}, {y})"
            );
        }
    }
}

#[test]
fn worker_count_does_not_change_full_detail_output() {
    let view = View::new(mandelview_core::Complex::new(-0.75, 0.1), 3.0).unwrap();
    let frames: Vec<Vec<u8>> = [1, 2, 5, 7]
        .into_iter()
        .map(|workers| {
            let mut engine = Engine::new(config(53, 41, workers)).unwrap();
            engine.render_frame(view, 3).unwrap();
            engine.buffer().unwrap().pixels().to_vec()
        })
        .collect();

    for frame in &frames[1..] {
        assert_eq!(frame, &frames[0]);
    }
}

#[test]
fn coarse_frames_sample_fewer_points() {
    let mut engine = Engine::new(config(64, 64, 2)).unwrap();
    let coarse = engine.render_frame(View::default(), 0).unwrap();
    let fine = engine.render_frame(View::default(), 3).unwrap();

    assert_eq!(coarse.stride, 8);
    assert_eq!(coarse.samples, 8 * 8);
    assert_eq!(fine.samples, 64 * 64);
}

#[test]
fn presenter_sees_each_completed_frame() {
    let mut engine = Engine::new(config(32, 24, 2)).unwrap();
    let mut seen = Vec::new();
    for _ in 0..3 {
        engine
            .render_and_present(&mut |frame: &FrameBuffer| {
                seen.push((frame.width(), frame.height()));
            })
            .unwrap();
    }
    assert_eq!(seen, vec![(32, 24); 3]);
}

#[test]
fn reset_returns_to_default_view() {
    let mut engine = Engine::new(config(16, 16, 1)).unwrap();
    engine.zoom_by_wheel(-360.0).unwrap();
    engine.pan(1.0, 1.0).unwrap();
    assert_ne!(engine.viewport().view(), View::default());

    engine.reset_view();
    assert_eq!(engine.viewport().view(), View::default());
    assert!(engine.needs_render());
}
