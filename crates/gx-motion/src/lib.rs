//! `gx-motion`: motion bounds and motion strategies.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                        |
//! |-----------------|-----------------------------------------------------------------|
//! | [`bounds`]      | `MotionBounds`: region an entity's shape must stay inside       |
//! | [`environment`] | `MotionEnvironment` trait: live positions of sites and strands |
//! | [`strategy`]    | `MotionStrategy` closed enum and its dispatch                   |
//! | [`random_walk`] | `RandomWalk` state                                              |
//! | [`meander`]     | `MeanderToDestination` state, `Destination`                     |
//!
//! # Motion model
//!
//! A strategy is a pure position-update rule: given the current position,
//! the entity's shape, its bounds, and `dt`, it returns the next position.
//! It never decides attachment transitions; the attachment state machine
//! swaps strategies on state entry.  Every strategy except `Stillness`
//! clamps its result into the bounds, so an entity can never be moved
//! outside them by its own motion.

pub mod bounds;
pub mod environment;
pub mod meander;
pub mod random_walk;
pub mod strategy;


pub use bounds::MotionBounds;
pub use environment::{EmptyEnvironment, MotionEnvironment};
pub use meander::{Destination, MeanderToDestination};
pub use random_walk::RandomWalk;
pub use strategy::MotionStrategy;

use gx_core::Vector2;

/// Move from `from` toward `to` by at most `max_step`, landing exactly on `to`
/// when it is within reach.
#[inline]
pub fn step_toward(from: Vector2, to: Vector2, max_step: f64) -> Vector2 {
    let delta = to - from;
    let distance = delta.magnitude();
    if distance <= max_step {
        to
    } else {
        from + delta * (max_step / distance)
    }
}
