//! Trail rendering.
//!
//! Each star is drawn as one short round-capped segment pointing along the
//! current drift. Drawing goes through the [`DrawSurface`] trait so the
//! same pass feeds the GPU surface in the window and a recording surface in
//! tests.

use glam::Vec2;
use rand::Rng;

use crate::config::StarfieldConfig;
use crate::field::Starfield;
use crate::star::Star;
use crate::viewport::Viewport;

/// One stroked line segment with round caps, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSegment {
    pub from: Vec2,
    pub to: Vec2,
    /// Stroke width in physical pixels.
    pub width: f32,
    /// Linear RGBA, alpha already multiplied by the flicker.
    pub color: [f32; 4],
}

/// An immediate-mode 2D target the trail pass draws into.
pub trait DrawSurface {
    /// Discard everything drawn in the previous frame.
    fn clear(&mut self);

    /// Stroke one segment with round caps.
    fn stroke_segment(&mut self, segment: &TrailSegment);
}

/// Surface that keeps the segments of the current frame in memory.
///
/// Useful for tests and for hosts that batch drawing themselves.
#[derive(Debug, Default, Clone)]
pub struct SegmentBuffer {
    pub segments: Vec<TrailSegment>,
    pub clears: usize,
}

impl DrawSurface for SegmentBuffer {
    fn clear(&mut self) {
        self.segments.clear();
        self.clears += 1;
    }

    fn stroke_segment(&mut self, segment: &TrailSegment) {
        self.segments.push(*segment);
    }
}

/// Trail vector for the given drift velocity.
///
/// Each component is `velocity * tail_factor`, pushed out to at least
/// `min_tail` in magnitude so a stroke never degenerates to a point. The
/// sign is preserved; an exact zero becomes positive.
pub fn trail_tail(velocity: Vec2, tail_factor: f32, min_tail: f32) -> Vec2 {
    let floor = |v: f32| {
        if v.abs() >= min_tail {
            v
        } else if v < 0.0 {
            -min_tail
        } else {
            min_tail
        }
    };
    let raw = velocity * tail_factor;
    Vec2::new(floor(raw.x), floor(raw.y))
}

/// Build the segment for one star. `flicker` scales the stroke alpha.
pub fn trail_segment(
    star: &Star,
    tail: Vec2,
    viewport: &Viewport,
    config: &StarfieldConfig,
    flicker: f32,
) -> TrailSegment {
    let from = Vec2::new(star.x, star.y);
    let [r, g, b, a] = config.star_color;
    TrailSegment {
        from,
        to: from + tail,
        width: config.star_size * star.z * viewport.scale,
        color: [r, g, b, a * flicker],
    }
}

impl<R: Rng> Starfield<R> {
    /// Stroke every star onto `surface`, resampling each star's flicker.
    ///
    /// The caller is responsible for clearing the surface first.
    pub fn render<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        let config = *self.config();
        let viewport = *self.viewport();
        let tail = trail_tail(self.velocity().current, config.tail_factor, config.min_tail);
        let floor = config.flicker_floor;

        let Starfield { stars, rng, .. } = self;
        for star in stars.iter() {
            let flicker = floor + (1.0 - floor) * rng.gen::<f32>();
            surface.stroke_segment(&trail_segment(star, tail, &viewport, &config, flicker));
        }
    }
}
