//! Motion bounds.

use gx_core::{Rect, Vector2};

/// The region an entity's bounding shape must stay inside.
///
/// Shapes are expressed relative to the entity position, so the set of legal
/// *positions* is the region shrunk by the shape on every side.  When the
/// shape is larger than the region along an axis, the legal positions along
/// that axis collapse to the region's centre line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MotionBounds {
    region: Rect,
}

impl MotionBounds {
    pub fn new(region: Rect) -> Self {
        Self { region }
    }

    /// Bounds that never constrain anything.  Used for entities whose
    /// position is owned by an external driver.
    pub fn unbounded() -> Self {
        Self { region: Rect::everything() }
    }

    #[inline]
    pub fn region(&self) -> Rect {
        self.region
    }

    /// `true` if `shape` placed at `position` lies entirely inside the region.
    pub fn contains(&self, position: Vector2, shape: &Rect) -> bool {
        self.region.contains_rect(&shape.translated(position))
    }

    /// The nearest legal position to `position` for an entity with `shape`.
    pub fn clamp(&self, position: Vector2, shape: &Rect) -> Vector2 {
        self.legal_positions(shape).clamp(position)
    }

    fn legal_positions(&self, shape: &Rect) -> Rect {
        let mut min = self.region.min - shape.min;
        let mut max = self.region.max - shape.max;
        if min.x > max.x {
            let mid = (min.x + max.x) * 0.5;
            min.x = mid;
            max.x = mid;
        }
        if min.y > max.y {
            let mid = (min.y + max.y) * 0.5;
            min.y = mid;
            max.y = mid;
        }
        Rect { min, max }
    }
}

impl Default for MotionBounds {
    fn default() -> Self {
        Self::unbounded()
    }
}
