//! The star-field simulation context.
//!
//! [`Starfield`] owns every piece of mutable state the simulation needs
//! (stars, velocity, viewport, pointer, RNG) and an inbound event queue.
//! Hosts push [`FieldEvent`]s whenever the platform reports them; the queue
//! is drained at the start of every frame, so anything delivered between two
//! frames is fully applied before the next simulate step.
//!
//! ```
//! use starstream::{FieldEvent, PointerKind, Starfield, StarfieldConfig, Viewport};
//!
//! let viewport = Viewport::from_logical(800.0, 600.0, 1.0);
//! let mut field = Starfield::seeded(StarfieldConfig::default(), viewport, 42);
//! assert_eq!(field.stars().len(), 28);
//!
//! field.push_event(FieldEvent::PointerMove { x: 10.0, y: 10.0, kind: PointerKind::Mouse });
//! field.push_event(FieldEvent::PointerMove { x: 50.0, y: 10.0, kind: PointerKind::Mouse });
//! field.apply_events();
//! field.step();
//! assert!(field.velocity().current.x > 0.0);
//! ```

use std::collections::VecDeque;

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::StarfieldConfig;
use crate::input::{PointerKind, PointerTracker};
use crate::recycle::recycle;
use crate::star::StarStore;
use crate::velocity::Velocity;
use crate::viewport::Viewport;

/// A notification from the host, applied between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldEvent {
    /// The surface changed size or pixel ratio.
    Resize(Viewport),
    /// The pointer moved to logical coordinates `(x, y)`.
    PointerMove { x: f32, y: f32, kind: PointerKind },
    /// The pointer left the tracked region, or the touch ended.
    PointerLeave,
}

/// Simulation state for one drawing surface.
pub struct Starfield<R: Rng = SmallRng> {
    config: StarfieldConfig,
    viewport: Viewport,
    velocity: Velocity,
    pub(crate) stars: StarStore,
    pointer: PointerTracker,
    events: VecDeque<FieldEvent>,
    recycled: u64,
    pub(crate) rng: R,
}

impl Starfield<SmallRng> {
    /// Create a field seeded from system entropy.
    pub fn new(config: StarfieldConfig, viewport: Viewport) -> Self {
        Self::with_rng(config, viewport, SmallRng::from_entropy())
    }

    /// Create a field with a fixed seed, for reproducible runs.
    pub fn seeded(config: StarfieldConfig, viewport: Viewport, seed: u64) -> Self {
        Self::with_rng(config, viewport, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Starfield<R> {
    /// Create a field driven by the given RNG.
    ///
    /// The star count is derived from `viewport` here and never changes.
    pub fn with_rng(config: StarfieldConfig, viewport: Viewport, mut rng: R) -> Self {
        let count = viewport.star_count(config.density_divisor);
        let mut stars = StarStore::generate(count, config.min_scale, &mut rng);
        stars.place_all(&viewport, &mut rng);

        tracing::info!(
            stars = count,
            width = viewport.width,
            height = viewport.height,
            scale = viewport.scale,
            "star field created"
        );

        Self {
            config,
            viewport,
            velocity: Velocity::new(config.zoom_rate),
            stars,
            pointer: PointerTracker::new(),
            events: VecDeque::new(),
            recycled: 0,
            rng,
        }
    }

    // ========== Events ==========

    /// Queue a host event. It takes effect at the next [`apply_events`](Self::apply_events).
    pub fn push_event(&mut self, event: FieldEvent) {
        self.events.push_back(event);
    }

    /// Number of events waiting to be applied.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Apply every queued event in arrival order.
    pub fn apply_events(&mut self) {
        while let Some(event) = self.events.pop_front() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: FieldEvent) {
        match event {
            FieldEvent::Resize(viewport) => self.resize(viewport),
            FieldEvent::PointerMove { x, y, kind } => {
                let push = self.pointer.on_move(
                    x,
                    y,
                    kind,
                    self.config.pointer_divisor,
                    self.viewport.scale,
                );
                self.velocity.push_target(push);
            }
            FieldEvent::PointerLeave => self.pointer.on_leave(),
        }
    }

    /// Adopt a new viewport and scatter every star across it.
    ///
    /// The store keeps its size and the velocity is left untouched.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.stars.place_all(&self.viewport, &mut self.rng);
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            scale = viewport.scale,
            stars = self.stars.len(),
            "viewport resized"
        );
    }

    // ========== Simulation ==========

    /// Advance the simulation by one frame.
    pub fn step(&mut self) {
        self.velocity
            .relax(self.config.target_decay, self.config.smoothing);

        let drift = self.velocity.current;
        let zoom = self.velocity.zoom;
        let center = self.viewport.center();
        let margin = self.config.overflow_threshold;

        for star in self.stars.iter_mut() {
            // Parallax: nearer (larger z) stars drift faster
            star.x += drift.x * star.z;
            star.y += drift.y * star.z;

            // Radial zoom away from the center
            star.x += (star.x - center.x) * zoom * star.z;
            star.y += (star.y - center.y) * zoom * star.z;

            star.z += zoom;

            if !self.viewport.contains_with_margin(star.x, star.y, margin) {
                recycle(star, drift, &self.viewport, &self.config, &mut self.rng);
                self.recycled += 1;
            }
        }
    }

    // ========== Accessors ==========

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn velocity(&self) -> &Velocity {
        &self.velocity
    }

    /// Overwrite the target velocity, as a programmatic nudge.
    pub fn set_target_velocity(&mut self, target: Vec2) {
        self.velocity.target = target;
    }

    pub fn stars(&self) -> &StarStore {
        &self.stars
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    /// Total number of recycles since creation.
    pub fn recycled(&self) -> u64 {
        self.recycled
    }
}
