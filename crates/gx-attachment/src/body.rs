//! The physical side of a mobile biomolecule.

use gx_core::{BiomoleculeKind, Rect, Vector2};
use gx_motion::{MotionBounds, MotionStrategy};

/// Position, shape, bounds, and the motion strategy currently moving them.
///
/// `shape` is relative to `position`.  The state machine replaces `motion`
/// and toggles `movable_by_user` on state entry; nothing else writes them.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentBody {
    pub position:        Vector2,
    pub shape:           Rect,
    pub bounds:          MotionBounds,
    pub motion:          MotionStrategy,
    pub movable_by_user: bool,
}

impl AgentBody {
    pub fn new(position: Vector2, shape: Rect, bounds: MotionBounds) -> Self {
        Self {
            position,
            shape,
            bounds,
            motion: MotionStrategy::Stillness,
            movable_by_user: true,
        }
    }

    /// A body sized for `kind`, centred on its position.
    pub fn for_kind(kind: BiomoleculeKind, position: Vector2, bounds: MotionBounds) -> Self {
        let (w, h) = kind.size();
        Self::new(position, Rect::centered(Vector2::ZERO, w, h), bounds)
    }

    /// `true` if the shape at the current position lies inside the bounds.
    pub fn in_bounds(&self) -> bool {
        self.bounds.contains(self.position, &self.shape)
    }

    /// Move to the nearest legal position to `target`.
    pub fn place_within_bounds(&mut self, target: Vector2) {
        self.position = self.bounds.clamp(target, &self.shape);
    }
}
