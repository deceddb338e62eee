//! Field-wide drift velocity.

use glam::Vec2;

/// The shared drift velocity of the field.
///
/// `target` is written by pointer input; `current` relaxes toward it once
/// per frame. `zoom` is the constant outward rate and never changes with
/// input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    /// Smoothed screen-space drift applied to stars.
    pub current: Vec2,
    /// Pointer-driven goal the drift relaxes toward.
    pub target: Vec2,
    /// Outward zoom rate, added to every star depth each frame.
    pub zoom: f32,
}

impl Velocity {
    pub fn new(zoom: f32) -> Self {
        Self {
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            zoom,
        }
    }

    /// Add a pointer contribution to the target.
    pub fn push_target(&mut self, delta: Vec2) {
        self.target += delta;
    }

    /// One frame of relaxation: decay the target, then pull the current
    /// velocity a fixed fraction of the way toward it.
    ///
    /// Both factors apply per frame, not per second.
    pub fn relax(&mut self, decay: f32, smoothing: f32) {
        self.target *= decay;
        self.current += (self.target - self.current) * smoothing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relax_single_frame() {
        let mut velocity = Velocity::new(0.0005);
        velocity.target = Vec2::new(10.0, -5.0);

        velocity.relax(0.96, 0.8);

        assert!((velocity.target.x - 9.6).abs() < 1e-5);
        assert!((velocity.target.y + 4.8).abs() < 1e-5);
        assert!((velocity.current.x - 7.68).abs() < 1e-5);
        assert!((velocity.current.y + 3.84).abs() < 1e-5);
        assert_eq!(velocity.zoom, 0.0005);
    }

    #[test]
    fn test_relax_at_rest_stays_at_rest() {
        let mut velocity = Velocity::new(0.0005);
        for _ in 0..100 {
            velocity.relax(0.96, 0.8);
        }
        assert_eq!(velocity.current, Vec2::ZERO);
    }

    #[test]
    fn test_push_target_accumulates() {
        let mut velocity = Velocity::new(0.0);
        velocity.push_target(Vec2::new(1.0, 2.0));
        velocity.push_target(Vec2::new(0.5, -1.0));
        assert_eq!(velocity.target, Vec2::new(1.5, 1.0));
        assert_eq!(velocity.current, Vec2::ZERO);
    }
}
