//! Integration tests for the star field.
//!
//! These drive the public API the same way the window does: queue events,
//! tick the scheduler, and inspect the stars and the recorded segments.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use starstream::recycle::{choose_edge, recycle};
use starstream::render::trail_tail;
use starstream::{
    FieldEvent, FrameScheduler, PointerKind, RespawnEdge, SegmentBuffer, Star, StarStore,
    Starfield, StarfieldConfig, Vec2, Viewport,
};

fn field(width: f32, height: f32, scale: f32) -> Starfield {
    Starfield::seeded(
        StarfieldConfig::default(),
        Viewport::from_logical(width, height, scale),
        0xC0FFEE,
    )
}

// ============================================================================
// Star count
// ============================================================================

#[test]
fn test_star_count_matches_viewport() {
    for (w, h) in [(1280.0, 720.0), (375.0, 812.0), (1920.0, 1080.0), (10.0, 10.0)] {
        let field = field(w, h, 1.0);
        let expected = ((w + h) / 50.0_f32).round() as usize;
        assert_eq!(field.stars().len(), expected, "viewport {w}x{h}");
    }
}

#[test]
fn test_star_count_survives_resizes_and_frames() {
    let mut field = field(1280.0, 720.0, 1.0);
    let mut surface = SegmentBuffer::default();
    let mut scheduler = FrameScheduler::new();
    scheduler.start();

    for (w, h, s) in [(320.0, 240.0, 1.0), (2560.0, 1440.0, 2.0), (800.0, 600.0, 1.5)] {
        field.push_event(FieldEvent::Resize(Viewport::from_logical(w, h, s)));
        for _ in 0..10 {
            scheduler.tick(&mut field, &mut surface);
        }
        assert_eq!(field.stars().len(), 40);
        assert_eq!(surface.segments.len(), 40);
    }
}

#[test]
fn test_zero_stars_renders_empty_frame() {
    let mut field = field(10.0, 10.0, 1.0);
    assert!(field.stars().is_empty());

    let mut surface = SegmentBuffer::default();
    let mut scheduler = FrameScheduler::new();
    scheduler.start();
    assert!(scheduler.tick(&mut field, &mut surface));
    assert!(surface.segments.is_empty());
    assert_eq!(surface.clears, 1);
}

// ============================================================================
// Placement bounds
// ============================================================================

#[test]
fn test_stars_stay_within_margin_under_heavy_input() {
    let mut field = field(800.0, 600.0, 2.0);
    let mut surface = SegmentBuffer::default();
    let mut scheduler = FrameScheduler::new();
    scheduler.start();

    let viewport = *field.viewport();
    let margin = field.config().overflow_threshold;

    // Sweep the pointer around in big circles to force recycling on every edge
    for frame in 0..600 {
        let angle = frame as f32 * 0.05;
        field.push_event(FieldEvent::PointerMove {
            x: 400.0 + angle.cos() * 300.0,
            y: 300.0 + angle.sin() * 300.0,
            kind: if frame % 200 < 100 { PointerKind::Mouse } else { PointerKind::Touch },
        });
        scheduler.tick(&mut field, &mut surface);

        for star in field.stars() {
            assert!(
                viewport.contains_with_margin(star.x, star.y, margin),
                "frame {frame}: star at ({}, {}) escaped",
                star.x,
                star.y
            );
        }
    }
    assert!(field.recycled() > 0);
}

#[test]
fn test_every_recycle_outcome_is_in_bounds() {
    let mut rng = SmallRng::seed_from_u64(99);
    let config = StarfieldConfig::default();
    let viewport = Viewport::from_logical(500.0, 400.0, 1.0);

    for velocity in [
        Vec2::ZERO,
        Vec2::new(5.0, 0.0),
        Vec2::new(-5.0, 0.0),
        Vec2::new(0.0, 5.0),
        Vec2::new(0.0, -5.0),
        Vec2::new(3.0, -3.0),
        Vec2::new(-0.5, 40.0),
    ] {
        for _ in 0..200 {
            let mut star = Star { x: 9999.0, y: -9999.0, z: 7.0 };
            recycle(&mut star, velocity, &viewport, &config, &mut rng);
            assert!(viewport.contains_with_margin(star.x, star.y, config.overflow_threshold));
        }
    }
}

// ============================================================================
// Velocity decay
// ============================================================================

#[test]
fn test_velocity_decays_to_rest() {
    let mut field = field(800.0, 600.0, 1.0);
    field.push_event(FieldEvent::PointerMove { x: 0.0, y: 0.0, kind: PointerKind::Touch });
    field.push_event(FieldEvent::PointerMove { x: 400.0, y: -240.0, kind: PointerKind::Touch });
    field.apply_events();

    // Let the drift catch up with the target before input stops
    for _ in 0..5 {
        field.step();
    }

    let mut previous = field.velocity().current.length();
    let mut steps = 0;
    while field.velocity().current.length() > 1e-3 {
        field.step();
        let magnitude = field.velocity().current.length();
        assert!(magnitude <= previous, "speed grew from {previous} to {magnitude}");
        previous = magnitude;
        steps += 1;
        assert!(steps < 500, "velocity did not settle");
    }
}

#[test]
fn test_velocity_with_zero_target_shrinks_geometrically() {
    let mut field = field(800.0, 600.0, 1.0);
    field.set_target_velocity(Vec2::new(50.0, 0.0));
    field.step();
    field.set_target_velocity(Vec2::ZERO);

    let mut previous = field.velocity().current.x;
    for _ in 0..20 {
        field.step();
        let current = field.velocity().current.x;
        assert!((current - previous * 0.2).abs() < 1e-4);
        previous = current;
    }
}

// ============================================================================
// Depth
// ============================================================================

#[test]
fn test_depth_grows_without_recycling() {
    // With no input, 30 frames of zoom move a star at most ~30px, inside the margin
    let mut field = field(4000.0, 4000.0, 1.0);
    let mut before: Vec<f32> = field.stars().iter().map(|s| s.z).collect();

    for _ in 0..30 {
        field.step();
        let after: Vec<f32> = field.stars().iter().map(|s| s.z).collect();
        for (a, b) in after.iter().zip(&before) {
            assert!(a >= b);
        }
        before = after;
    }
    assert_eq!(field.recycled(), 0);
}

// ============================================================================
// Recycling
// ============================================================================

#[test]
fn test_rightward_drift_respawns_on_left_edge() {
    let mut rng = SmallRng::seed_from_u64(5);
    let config = StarfieldConfig::default();
    let viewport = Viewport::from_logical(640.0, 480.0, 1.0);

    for _ in 0..100 {
        let mut star = Star {
            x: viewport.width + config.overflow_threshold + 1.0,
            y: 200.0,
            z: 1.3,
        };
        let edge = recycle(&mut star, Vec2::new(5.0, 0.0), &viewport, &config, &mut rng);

        assert_eq!(edge, RespawnEdge::Left);
        assert_eq!(star.x, -config.overflow_threshold);
        assert!(star.y >= 0.0 && star.y <= viewport.height);
        assert!(star.z >= config.min_scale && star.z < 1.0);
    }
}

#[test]
fn test_still_field_respawns_from_center() {
    let mut rng = SmallRng::seed_from_u64(6);
    let config = StarfieldConfig::default();
    let viewport = Viewport::from_logical(640.0, 480.0, 2.0);

    for _ in 0..100 {
        let mut star = Star { x: -80.0, y: 2000.0, z: 4.0 };
        let edge = recycle(&mut star, Vec2::ZERO, &viewport, &config, &mut rng);

        assert_eq!(edge, RespawnEdge::Center);
        assert_eq!(star.z, 0.1);
        assert!(star.x >= 0.0 && star.x <= viewport.width);
        assert!(star.y >= 0.0 && star.y <= viewport.height);
    }
}

#[test]
fn test_edge_choice_is_stochastic_for_diagonal_drift() {
    let mut rng = SmallRng::seed_from_u64(12);
    let mut left = 0;
    let mut top = 0;
    for _ in 0..1000 {
        match choose_edge(Vec2::new(2.0, 2.0), 1.0, &mut rng) {
            RespawnEdge::Left => left += 1,
            RespawnEdge::Top => top += 1,
            other => panic!("unexpected edge {other:?}"),
        }
    }
    assert!(left > 400 && top > 400, "left {left}, top {top}");
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_tiny_velocity_tail_is_floored() {
    let tail = trail_tail(Vec2::new(0.02, -0.03), 2.0, 0.5);
    assert_eq!(tail, Vec2::new(0.5, -0.5));
    assert_ne!(tail, Vec2::new(0.04, -0.06));
}

#[test]
fn test_rendered_segments_follow_stars() {
    let mut field = field(600.0, 400.0, 2.0);
    let mut surface = SegmentBuffer::default();
    field.render(&mut surface);

    let config = *field.config();
    assert_eq!(surface.segments.len(), field.stars().len());
    for (segment, star) in surface.segments.iter().zip(field.stars()) {
        assert_eq!(segment.from, Vec2::new(star.x, star.y));
        // At rest the tail is the floored (0.5, 0.5)
        assert_eq!(segment.to - segment.from, Vec2::new(0.5, 0.5));
        assert!((segment.width - config.star_size * star.z * 2.0).abs() < 1e-5);

        let alpha = segment.color[3];
        let base = config.star_color[3];
        assert!(alpha >= base * 0.5 - 1e-6 && alpha <= base + 1e-6);
        assert_eq!(&segment.color[..3], &config.star_color[..3]);
    }
}

#[test]
fn test_flicker_varies_between_frames() {
    let mut field = field(600.0, 400.0, 1.0);
    let mut first = SegmentBuffer::default();
    let mut second = SegmentBuffer::default();
    field.render(&mut first);
    field.render(&mut second);

    let changed = first
        .segments
        .iter()
        .zip(&second.segments)
        .filter(|(a, b)| a.color[3] != b.color[3])
        .count();
    assert!(changed > 0);
}

// ============================================================================
// Pointer input
// ============================================================================

#[test]
fn test_first_move_after_leave_sets_baseline_only() {
    let mut field = field(800.0, 600.0, 1.0);
    field.push_event(FieldEvent::PointerMove { x: 100.0, y: 100.0, kind: PointerKind::Mouse });
    field.push_event(FieldEvent::PointerMove { x: 108.0, y: 100.0, kind: PointerKind::Mouse });
    field.apply_events();
    let target = field.velocity().target;
    assert_eq!(target, Vec2::new(1.0, 0.0));

    field.push_event(FieldEvent::PointerLeave);
    field.push_event(FieldEvent::PointerMove { x: 700.0, y: 500.0, kind: PointerKind::Mouse });
    field.apply_events();
    assert_eq!(field.velocity().target, target);

    field.push_event(FieldEvent::PointerMove { x: 700.0, y: 516.0, kind: PointerKind::Mouse });
    field.apply_events();
    assert_eq!(field.velocity().target, Vec2::new(1.0, 2.0));
}

#[test]
fn test_events_between_frames_apply_before_next_step() {
    let mut field = field(800.0, 600.0, 1.0);
    let mut surface = SegmentBuffer::default();
    let mut scheduler = FrameScheduler::new();
    scheduler.start();

    scheduler.tick(&mut field, &mut surface);
    assert_eq!(field.velocity().current, Vec2::ZERO);

    field.push_event(FieldEvent::PointerMove { x: 0.0, y: 0.0, kind: PointerKind::Touch });
    field.push_event(FieldEvent::PointerMove { x: 0.0, y: 80.0, kind: PointerKind::Touch });
    scheduler.tick(&mut field, &mut surface);

    // target 10 -> decayed 9.6 -> smoothed 7.68, all within the same tick
    assert!((field.velocity().current.y - 7.68).abs() < 1e-4);
    assert_eq!(field.pending_events(), 0);
}

#[test]
fn test_store_generate_is_public() {
    let mut rng = SmallRng::seed_from_u64(1);
    let store = StarStore::generate(3, 0.5, &mut rng);
    assert_eq!(store.len(), 3);
    assert!(store.iter().all(|s| s.z >= 0.5 && s.z < 1.0));
}
