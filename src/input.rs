//! Pointer handling for the star field.
//!
//! [`PointerTracker`] turns consecutive pointer positions into contributions
//! to the field's target velocity. Mouse and touch take different sign
//! paths that both end up as "natural drag": the mouse grabs the background
//! and pulls it along, a finger pushes it.
//!
//! ```
//! use starstream::input::{PointerKind, PointerTracker};
//!
//! let mut pointer = PointerTracker::new();
//!
//! // The first move only records a baseline
//! let first = pointer.on_move(100.0, 100.0, PointerKind::Touch, 8.0, 1.0);
//! assert_eq!(first, glam::Vec2::ZERO);
//!
//! // Later moves contribute delta / (8 * scale)
//! let push = pointer.on_move(116.0, 100.0, PointerKind::Touch, 8.0, 1.0);
//! assert_eq!(push, glam::Vec2::new(2.0, 0.0));
//! ```

use glam::Vec2;

/// Source of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

impl PointerKind {
    /// Sign applied to raw coordinates before the delta is taken.
    fn coordinate_sign(self) -> f32 {
        match self {
            PointerKind::Mouse => -1.0,
            PointerKind::Touch => 1.0,
        }
    }

    /// Sign applied to the finished contribution.
    fn contribution_sign(self) -> f32 {
        match self {
            PointerKind::Mouse => -1.0,
            PointerKind::Touch => 1.0,
        }
    }
}

/// Last known pointer position, used only to compute deltas.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    /// Last position in the kind's own coordinate space. `None` after a leave.
    last: Option<Vec2>,
    kind: PointerKind,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer move at logical coordinates `(x, y)` and return the
    /// contribution to the target velocity.
    ///
    /// Returns zero when there is no baseline yet: after construction, after
    /// [`on_leave`](Self::on_leave), or when the input kind changed since the
    /// previous move.
    pub fn on_move(&mut self, x: f32, y: f32, kind: PointerKind, divisor: f32, scale: f32) -> Vec2 {
        let position = Vec2::new(x, y) * kind.coordinate_sign();

        let contribution = match self.last {
            Some(last) if kind == self.kind => {
                let offset = position - last;
                offset / (divisor * scale) * kind.contribution_sign()
            }
            Some(_) => {
                tracing::trace!(?kind, "pointer kind changed, resetting baseline");
                Vec2::ZERO
            }
            None => Vec2::ZERO,
        };

        self.last = Some(position);
        self.kind = kind;
        contribution
    }

    /// Forget the baseline so the next move cannot jump against a stale position.
    pub fn on_leave(&mut self) {
        self.last = None;
    }

    /// Whether a baseline position is currently held.
    pub fn is_tracking(&self) -> bool {
        self.last.is_some()
    }

    /// Kind of the most recent move.
    pub fn kind(&self) -> PointerKind {
        self.kind
    }
}
