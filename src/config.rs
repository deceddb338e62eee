//! Tuning constants for the star field.
//!
//! Every constant has a matching field on [`StarfieldConfig`], whose
//! `Default` reproduces the published look. The builder methods return a
//! modified copy so a config can be assembled inline:
//!
//! ```
//! use starstream::StarfieldConfig;
//!
//! let config = StarfieldConfig::default()
//!     .with_star_size(4.0)
//!     .with_overflow_threshold(80.0);
//! assert_eq!(config.star_size, 4.0);
//! ```

/// Stroke color of every trail, `#ffffff53`.
pub const STAR_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0x53 as f32 / 255.0];
/// Base trail width in logical pixels at depth 1.
pub const STAR_SIZE: f32 = 3.0;
/// Lower bound of a freshly assigned depth.
pub const STAR_MIN_SCALE: f32 = 0.9;
/// Margin a star may travel past the visible bounds before it is recycled.
pub const OVERFLOW_THRESHOLD: f32 = 50.0;
/// One star per this many logical pixels of `width + height`.
pub const STAR_DENSITY_DIVISOR: f32 = 50.0;
/// Constant outward zoom rate, added to every depth each frame.
pub const ZOOM_RATE: f32 = 0.0005;
/// Per-frame decay of the pointer-driven target velocity.
pub const TARGET_DECAY: f32 = 0.96;
/// Per-frame smoothing factor pulling the velocity toward its target.
pub const VELOCITY_SMOOTHING: f32 = 0.8;
/// Pointer deltas are divided by `POINTER_DIVISOR * scale`.
pub const POINTER_DIVISOR: f32 = 8.0;
/// Depth given to stars that respawn near the vanishing point.
pub const CENTER_RESPAWN_DEPTH: f32 = 0.1;
/// Speed one axis must exceed before respawns stream in from an edge.
pub const EDGE_RESPAWN_SPEED: f32 = 1.0;
/// Trail length as a multiple of the current velocity.
pub const TAIL_FACTOR: f32 = 2.0;
/// Smallest magnitude of either trail component.
pub const MIN_TAIL: f32 = 0.5;
/// Lowest flicker multiplier applied to the stroke alpha.
pub const FLICKER_FLOOR: f32 = 0.5;

/// Tuning for a [`Starfield`](crate::Starfield).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarfieldConfig {
    /// Linear RGBA stroke color; alpha is multiplied by the per-frame flicker.
    pub star_color: [f32; 4],
    /// Trail width at depth 1, before device pixel scaling.
    pub star_size: f32,
    /// Fresh depths are drawn from `[min_scale, 1)`.
    pub min_scale: f32,
    /// Out-of-bounds margin in physical pixels.
    pub overflow_threshold: f32,
    /// Logical pixels of `width + height` per star.
    pub density_divisor: f32,
    /// Outward zoom rate (`velocity.z`).
    pub zoom_rate: f32,
    /// Multiplier applied to the target velocity every frame.
    pub target_decay: f32,
    /// Fraction of the gap to the target closed every frame.
    pub smoothing: f32,
    /// Divisor turning pointer deltas into target velocity.
    pub pointer_divisor: f32,
    /// Depth of a star respawned across the whole viewport.
    pub center_respawn_depth: f32,
    /// Axis speed above which stars respawn on an edge.
    pub edge_respawn_speed: f32,
    /// Trail length as a multiple of velocity.
    pub tail_factor: f32,
    /// Minimum magnitude of each trail component.
    pub min_tail: f32,
    /// Lower bound of the per-star alpha flicker.
    pub flicker_floor: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            star_color: STAR_COLOR,
            star_size: STAR_SIZE,
            min_scale: STAR_MIN_SCALE,
            overflow_threshold: OVERFLOW_THRESHOLD,
            density_divisor: STAR_DENSITY_DIVISOR,
            zoom_rate: ZOOM_RATE,
            target_decay: TARGET_DECAY,
            smoothing: VELOCITY_SMOOTHING,
            pointer_divisor: POINTER_DIVISOR,
            center_respawn_depth: CENTER_RESPAWN_DEPTH,
            edge_respawn_speed: EDGE_RESPAWN_SPEED,
            tail_factor: TAIL_FACTOR,
            min_tail: MIN_TAIL,
            flicker_floor: FLICKER_FLOOR,
        }
    }
}

impl StarfieldConfig {
    /// Set the trail stroke color (RGBA, 0.0-1.0).
    pub fn with_star_color(mut self, color: [f32; 4]) -> Self {
        self.star_color = color;
        self
    }

    /// Set the trail width at depth 1.
    pub fn with_star_size(mut self, size: f32) -> Self {
        self.star_size = size;
        self
    }

    /// Set the lower bound of fresh depths. Clamped to `[0, 1]`.
    pub fn with_min_scale(mut self, min_scale: f32) -> Self {
        self.min_scale = min_scale.clamp(0.0, 1.0);
        self
    }

    /// Set the out-of-bounds margin.
    pub fn with_overflow_threshold(mut self, threshold: f32) -> Self {
        self.overflow_threshold = threshold.max(0.0);
        self
    }

    /// Set how many logical pixels of `width + height` produce one star.
    pub fn with_density_divisor(mut self, divisor: f32) -> Self {
        self.density_divisor = divisor;
        self
    }

    /// Set the outward zoom rate. Negative rates are clamped to zero so
    /// depth keeps growing.
    pub fn with_zoom_rate(mut self, rate: f32) -> Self {
        self.zoom_rate = rate.max(0.0);
        self
    }
}
