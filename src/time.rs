//! Frame counting and FPS measurement.
//!
//! The simulation itself is stepped once per frame with fixed per-frame
//! factors, so nothing here feeds back into it. [`FrameClock`] exists for
//! reporting: the window title and debug logs.
//!
//! ```
//! use starstream::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! clock.tick();
//! clock.tick();
//! assert_eq!(clock.frame(), 2);
//! ```

use std::time::{Duration, Instant};

/// Counts frames and measures frames per second over a sliding interval.
#[derive(Debug)]
pub struct FrameClock {
    /// When the clock was created.
    start: Instant,
    /// Total frames since start.
    frame_count: u64,
    /// FPS measured over the last complete interval.
    fps: f32,
    /// Frame count at the last FPS update.
    fps_frame_count: u64,
    /// Time of the last FPS update.
    fps_update_time: Instant,
    /// How often FPS is recomputed.
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Create a clock that recomputes FPS every 500 ms.
    pub fn new() -> Self {
        Self::with_interval(Duration::from_millis(500))
    }

    /// Create a clock with a custom FPS interval.
    pub fn with_interval(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: interval,
        }
    }

    /// Count one frame. Returns `true` when the FPS figure was refreshed.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> bool {
        self.frame_count += 1;

        let since = now.saturating_duration_since(self.fps_update_time);
        if since < self.fps_update_interval {
            return false;
        }

        let frames = self.frame_count - self.fps_frame_count;
        self.fps = frames as f32 / since.as_secs_f32();
        self.fps_frame_count = self.frame_count;
        self.fps_update_time = now;
        true
    }

    /// Frames counted since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Most recent FPS measurement, 0 until the first interval completes.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Wall time since creation.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
