//! Undirected wandering.

use gx_core::{AgentRng, Range, Rect, Vector2};

use crate::{step_toward, MotionBounds};

/// Drift speed band in picometres per second; a new speed is drawn on every
/// retarget.
pub const RANDOM_WALK_SPEED: Range = Range { min: 100.0, max: 250.0 };

/// Farthest a new wander target may be from the current position.
pub const RANDOM_WALK_REACH: f64 = 400.0;

/// Mean time between spontaneous direction changes.
pub const DIRECTION_CHANGE_MEAN_SECS: f64 = 0.75;

/// Random-walk state: the point currently drifted toward and the speed.
///
/// Each tick the walk retargets with probability `1 − exp(−dt / mean)`, or
/// unconditionally once the target is reached.  Targets are clamped into the
/// bounds before they are adopted, so the walk never asks to leave them.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RandomWalk {
    target: Option<Vector2>,
    speed:  f64,
}

impl RandomWalk {
    pub fn new() -> Self {
        Self::default()
    }

    /// The point currently being drifted toward, if one has been chosen.
    pub fn target(&self) -> Option<Vector2> {
        self.target
    }

    pub(crate) fn next_location(
        &mut self,
        current: Vector2,
        shape:   &Rect,
        bounds:  &MotionBounds,
        dt:      f64,
        rng:     &mut AgentRng,
    ) -> Vector2 {
        let retarget = match self.target {
            None => true,
            Some(t) if t == current => true,
            Some(_) => rng.gen_bool(1.0 - (-dt / DIRECTION_CHANGE_MEAN_SECS).exp()),
        };
        if retarget {
            let reach = rng.gen_range(0.0..=RANDOM_WALK_REACH);
            let wander = current + Vector2::from_polar(reach, rng.angle());
            self.target = Some(bounds.clamp(wander, shape));
            self.speed = RANDOM_WALK_SPEED.sample(rng);
        }
        match self.target {
            Some(target) => step_toward(current, target, self.speed * dt),
            None => current,
        }
    }
}
