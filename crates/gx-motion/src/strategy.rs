//! The `MotionStrategy` closed variant set.

use gx_core::{AgentRng, BiomoleculeId, MessengerRnaId, Rect, SiteId, Vector2};

use crate::{Destination, MeanderToDestination, MotionBounds, MotionEnvironment, RandomWalk};

/// A per-tick position-update rule.
///
/// Owned by the entity it moves and swapped wholesale by the attachment state
/// machine on state entry.  Variants that carry state (`RandomWalk`,
/// `MeanderToDestination`) keep only motion bookkeeping, never attachment
/// decisions.
#[derive(Clone, Debug, PartialEq)]
pub enum MotionStrategy {
    /// Hold position.  Used whenever an external driver owns the position.
    Stillness,

    /// Undirected drift inside the bounds.
    RandomWalk(RandomWalk),

    /// Biased drift toward a destination.
    MeanderToDestination(MeanderToDestination),

    /// Sit on a site's live position.
    FollowAttachmentSite { site: SiteId, offset: Vector2 },

    /// Track the point where an mRNA strand is being consumed.
    DestroyerTrackingRna { mrna: MessengerRnaId, offset: Vector2 },

    /// Track the point on an mRNA strand a ribosome has translated up to.
    RibosomeTranslatingRna {
        mrna:     MessengerRnaId,
        ribosome: BiomoleculeId,
        offset:   Vector2,
    },
}

impl MotionStrategy {
    pub fn random_walk() -> Self {
        MotionStrategy::RandomWalk(RandomWalk::new())
    }

    /// Meander toward `site`'s live position minus `offset`.
    pub fn meander_to_site(site: SiteId, offset: Vector2) -> Self {
        MotionStrategy::MeanderToDestination(MeanderToDestination::new(
            Destination::Site(site),
            offset,
        ))
    }

    /// Meander toward a fixed point.
    pub fn meander_to_point(point: Vector2) -> Self {
        MotionStrategy::MeanderToDestination(MeanderToDestination::new(
            Destination::Point(point),
            Vector2::ZERO,
        ))
    }

    /// Short label for logs.
    pub fn name(&self) -> &'static str {
        match self {
            MotionStrategy::Stillness                     => "stillness",
            MotionStrategy::RandomWalk(_)                 => "random walk",
            MotionStrategy::MeanderToDestination(_)       => "meander to destination",
            MotionStrategy::FollowAttachmentSite { .. }   => "follow attachment site",
            MotionStrategy::DestroyerTrackingRna { .. }   => "destroyer tracking RNA",
            MotionStrategy::RibosomeTranslatingRna { .. } => "ribosome translating RNA",
        }
    }

    /// Compute the position after `dt` seconds.
    ///
    /// `shape` is the entity's bounding rectangle relative to its position.
    /// Every variant except `Stillness` clamps its result into `bounds`.
    pub fn next_location(
        &mut self,
        current: Vector2,
        shape:   &Rect,
        bounds:  &MotionBounds,
        env:     &dyn MotionEnvironment,
        dt:      f64,
        rng:     &mut AgentRng,
    ) -> Vector2 {
        let next = match self {
            MotionStrategy::Stillness => return current,
            MotionStrategy::RandomWalk(walk) => {
                walk.next_location(current, shape, bounds, dt, rng)
            }
            MotionStrategy::MeanderToDestination(meander) => {
                meander.next_location(current, shape, bounds, env, dt, rng)
            }
            MotionStrategy::FollowAttachmentSite { site, offset } => env
                .site_position(*site)
                .map_or(current, |p| p - *offset),
            MotionStrategy::DestroyerTrackingRna { mrna, offset } => env
                .destroyer_attachment_location(*mrna)
                .map_or(current, |p| p - *offset),
            MotionStrategy::RibosomeTranslatingRna { mrna, ribosome, offset } => env
                .ribosome_attachment_location(*mrna, *ribosome)
                .map_or(current, |p| p - *offset),
        };
        bounds.clamp(next, shape)
    }
}

impl Default for MotionStrategy {
    fn default() -> Self {
        MotionStrategy::Stillness
    }
}
