//! Directed wandering toward a (possibly moving) destination.

use std::f64::consts::FRAC_PI_4;

use gx_core::{AgentRng, Rect, SiteId, Vector2};

use crate::{MotionBounds, MotionEnvironment};

/// Approach speed in picometres per second.
pub const MEANDER_SPEED: f64 = 750.0;

/// Largest random deviation of the heading from the straight line to the
/// destination.  Must stay below 90° so every step closes distance.
pub const MAX_MEANDER_ANGLE: f64 = FRAC_PI_4;

/// What a meandering entity is heading for.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Destination {
    /// A fixed point in model space.
    Point(Vector2),
    /// The live position of an attachment site, re-read every tick.
    Site(SiteId),
}

/// Biased random motion with an attraction toward `destination − offset`.
///
/// Each step moves `MEANDER_SPEED · dt` along the direction to the target,
/// rotated by a random angle in `±MAX_MEANDER_ANGLE`.  When the target is
/// within one step the entity lands exactly on it, so approaches converge
/// without oscillating around an arrival threshold.
///
/// A target the entity's bounds keep it from reaching is replaced by the
/// nearest legal position, so every approach ends somewhere.
#[derive(Clone, Debug, PartialEq)]
pub struct MeanderToDestination {
    destination: Destination,
    offset:      Vector2,
}

impl MeanderToDestination {
    pub fn new(destination: Destination, offset: Vector2) -> Self {
        Self { destination, offset }
    }

    pub fn destination(&self) -> Destination {
        self.destination
    }

    /// The point being approached this tick, or `None` if a tracked site is gone.
    pub fn target(&self, env: &dyn MotionEnvironment) -> Option<Vector2> {
        let anchor = match self.destination {
            Destination::Point(p) => p,
            Destination::Site(site) => env.site_position(site)?,
        };
        Some(anchor - self.offset)
    }

    /// [`target`][Self::target] moved to the nearest position `bounds`
    /// allow for an entity with `shape`.
    pub fn reachable_target(
        &self,
        env:    &dyn MotionEnvironment,
        shape:  &Rect,
        bounds: &MotionBounds,
    ) -> Option<Vector2> {
        self.target(env).map(|t| bounds.clamp(t, shape))
    }

    pub(crate) fn next_location(
        &mut self,
        current: Vector2,
        shape:   &Rect,
        bounds:  &MotionBounds,
        env:     &dyn MotionEnvironment,
        dt:      f64,
        rng:     &mut AgentRng,
    ) -> Vector2 {
        let Some(target) = self.reachable_target(env, shape, bounds) else {
            return current;
        };
        let to_target = target - current;
        let step = MEANDER_SPEED * dt;
        if to_target.magnitude() <= step {
            return target;
        }
        let deviation = rng.gen_range(-MAX_MEANDER_ANGLE..=MAX_MEANDER_ANGLE);
        current + to_target.normalized().rotated(deviation) * step
    }
}
