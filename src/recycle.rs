//! Respawning stars that drift out of bounds.
//!
//! When the field is moving, stars re-enter from the edge the field is
//! scrolling away from, so they appear to stream in from the direction of
//! travel. When the field is nearly still, stars are reborn anywhere on the
//! surface at a small depth, which reads as emerging from the vanishing point.

use glam::Vec2;
use rand::Rng;

use crate::config::StarfieldConfig;
use crate::star::{random_depth, Star};
use crate::viewport::Viewport;

/// Where a recycled star re-enters the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RespawnEdge {
    /// Anywhere on the surface, at the center-respawn depth.
    Center,
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Pick the respawn edge for the given drift velocity.
///
/// Below `threshold` on both axes the star respawns at the center. Otherwise
/// an axis is drawn with probability proportional to its speed, and the edge
/// opposite the direction of travel along that axis is returned.
pub fn choose_edge<R: Rng + ?Sized>(velocity: Vec2, threshold: f32, rng: &mut R) -> RespawnEdge {
    let vx = velocity.x.abs();
    let vy = velocity.y.abs();

    if vx <= threshold && vy <= threshold {
        return RespawnEdge::Center;
    }

    // vx + vy > threshold >= 0 here, so the division is safe
    let roll: f32 = rng.gen();
    let axis = if vx > vy {
        if roll < vx / (vx + vy) {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    } else if roll < vy / (vx + vy) {
        Axis::Vertical
    } else {
        Axis::Horizontal
    };

    match axis {
        Axis::Horizontal if velocity.x > 0.0 => RespawnEdge::Left,
        Axis::Horizontal => RespawnEdge::Right,
        Axis::Vertical if velocity.y > 0.0 => RespawnEdge::Top,
        Axis::Vertical => RespawnEdge::Bottom,
    }
}

/// Respawn `star` according to the current drift and return the edge used.
///
/// The resulting position always lies within the viewport expanded by the
/// overflow threshold.
pub fn recycle<R: Rng + ?Sized>(
    star: &mut Star,
    velocity: Vec2,
    viewport: &Viewport,
    config: &StarfieldConfig,
    rng: &mut R,
) -> RespawnEdge {
    let edge = choose_edge(velocity, config.edge_respawn_speed, rng);
    let margin = config.overflow_threshold;

    match edge {
        RespawnEdge::Center => {
            star.z = config.center_respawn_depth;
            star.place(viewport, rng);
            return edge;
        }
        RespawnEdge::Left => {
            star.x = -margin;
            star.y = viewport.height * rng.gen::<f32>();
        }
        RespawnEdge::Right => {
            star.x = viewport.width + margin;
            star.y = viewport.height * rng.gen::<f32>();
        }
        RespawnEdge::Top => {
            star.x = viewport.width * rng.gen::<f32>();
            star.y = -margin;
        }
        RespawnEdge::Bottom => {
            star.x = viewport.width * rng.gen::<f32>();
            star.y = viewport.height + margin;
        }
    }

    star.z = random_depth(config.min_scale, rng);
    edge
}
