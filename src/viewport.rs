//! Drawing-surface dimensions.

/// Size of the drawing surface in physical pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in physical pixels.
    pub width: f32,
    /// Height in physical pixels.
    pub height: f32,
    /// Device pixel ratio (physical pixels per logical pixel).
    pub scale: f32,
}

impl Viewport {
    /// Build a viewport from a logical size and a device pixel ratio.
    ///
    /// A non-positive or non-finite ratio falls back to 1.
    pub fn from_logical(width: f32, height: f32, scale: f32) -> Self {
        let scale = sanitize_scale(scale);
        Self {
            width: width.max(0.0) * scale,
            height: height.max(0.0) * scale,
            scale,
        }
    }

    /// Build a viewport from a physical size, as reported by the window.
    pub fn from_physical(width: u32, height: u32, scale: f64) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            scale: sanitize_scale(scale as f32),
        }
    }

    /// Size in logical pixels.
    pub fn logical_size(&self) -> (f32, f32) {
        (self.width / self.scale, self.height / self.scale)
    }

    /// Center of the surface in physical pixels.
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Number of stars this viewport calls for: one per `divisor` logical
    /// pixels of `width + height`, rounded to the nearest integer.
    pub fn star_count(&self, divisor: f32) -> usize {
        if divisor <= 0.0 {
            return 0;
        }
        let (w, h) = self.logical_size();
        ((w + h) / divisor).round().max(0.0) as usize
    }

    /// Whether a point lies inside the surface expanded by `margin` on every side.
    pub fn contains_with_margin(&self, x: f32, y: f32, margin: f32) -> bool {
        x >= -margin && x <= self.width + margin && y >= -margin && y <= self.height + margin
    }
}

fn sanitize_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}
