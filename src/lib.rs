//! # starstream
//!
//! A field of drifting light-trail "stars" whose drift direction and speed
//! follow pointer motion with momentum and decay.
//!
//! The simulation core ([`Starfield`]) is independent of any window: it owns
//! the stars, the drift velocity, the viewport and a queue of host events,
//! and draws through the [`DrawSurface`] trait. [`Simulation`] wraps it in a
//! winit window with a wgpu surface.
//!
//! ## Quick Start
//!
//! ```ignore
//! use starstream::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     Simulation::new()
//!         .with_title("Stars")
//!         .with_config(StarfieldConfig::default().with_star_size(4.0))
//!         .run()
//! }
//! ```
//!
//! ## Headless
//!
//! ```
//! use starstream::prelude::*;
//!
//! let viewport = Viewport::from_logical(1280.0, 720.0, 2.0);
//! let mut field = Starfield::seeded(StarfieldConfig::default(), viewport, 7);
//! let mut surface = SegmentBuffer::default();
//! let mut scheduler = FrameScheduler::new();
//!
//! scheduler.start();
//! field.push_event(FieldEvent::PointerMove { x: 0.0, y: 0.0, kind: PointerKind::Mouse });
//! scheduler.tick(&mut field, &mut surface);
//!
//! assert_eq!(surface.segments.len(), field.stars().len());
//! ```
//!
//! ## How a frame works
//!
//! 1. Queued [`FieldEvent`]s are applied in arrival order.
//! 2. The pointer-driven target velocity decays and the drift velocity
//!    relaxes toward it.
//! 3. Every star drifts by `velocity * z` (parallax), is pushed away from the
//!    center by the zoom rate, and grows in depth.
//! 4. Stars past the overflow margin are recycled, streaming back in from
//!    the edge the field is moving away from.
//! 5. Each star is stroked as a short round-capped trail.

pub mod config;
mod error;
pub mod field;
mod gpu;
pub mod input;
pub mod recycle;
pub mod render;
pub mod scheduler;
mod simulation;
pub mod star;
pub mod time;
pub mod velocity;
pub mod viewport;

pub use config::StarfieldConfig;
pub use error::{GpuError, SimulationError};
pub use field::{FieldEvent, Starfield};
pub use glam::Vec2;
pub use input::{PointerKind, PointerTracker};
pub use recycle::RespawnEdge;
pub use render::{DrawSurface, SegmentBuffer, TrailSegment};
pub use scheduler::FrameScheduler;
pub use simulation::Simulation;
pub use star::{Star, StarStore};
pub use velocity::Velocity;
pub use viewport::Viewport;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::{
        DrawSurface, FieldEvent, FrameScheduler, PointerKind, SegmentBuffer, Simulation,
        SimulationError, Star, Starfield, StarfieldConfig, TrailSegment, Vec2, Viewport,
    };
}
