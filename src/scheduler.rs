//! Frame scheduling.
//!
//! The scheduler is host-agnostic: the window calls [`FrameScheduler::tick`]
//! once per display refresh, tests call it directly. A tick drains queued
//! events, clears the surface, steps the simulation and draws it.

use rand::Rng;

use crate::field::Starfield;
use crate::render::DrawSurface;
use crate::time::FrameClock;

/// Drives one simulate + render cycle per tick until stopped.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    running: bool,
    clock: FrameClock,
}

impl FrameScheduler {
    /// Create a stopped scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin producing frames.
    pub fn start(&mut self) {
        if !self.running {
            tracing::debug!("frame scheduler started");
        }
        self.running = true;
    }

    /// Stop producing frames. Further ticks are no-ops until restarted.
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!(
                frames = self.clock.frame(),
                elapsed = ?self.clock.elapsed(),
                "frame scheduler stopped"
            );
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run one frame: apply pending events, clear, simulate, render.
    ///
    /// Returns `false` without touching anything when the scheduler is
    /// stopped, `true` when a frame was produced and another should be
    /// scheduled.
    pub fn tick<R, S>(&mut self, field: &mut Starfield<R>, surface: &mut S) -> bool
    where
        R: Rng,
        S: DrawSurface + ?Sized,
    {
        if !self.running {
            return false;
        }

        field.apply_events();
        surface.clear();
        field.step();
        field.render(surface);

        if self.clock.tick() {
            tracing::debug!(fps = self.clock.fps(), frame = self.clock.frame(), "frame rate");
        }
        true
    }

    /// Frames produced so far.
    pub fn frames(&self) -> u64 {
        self.clock.frame()
    }

    /// Latest FPS measurement.
    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }
}
