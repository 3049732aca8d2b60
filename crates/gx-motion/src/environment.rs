//! Live-position queries that follower strategies need each tick.

use gx_core::{BiomoleculeId, MessengerRnaId, SiteId, Vector2};

/// Read-only view of the positions that strategies track.
///
/// Implemented by the world that owns attachment sites and mRNA strands.
/// Every query returns `None` when the target no longer exists; strategies
/// then hold their current position.
pub trait MotionEnvironment {
    /// Current position of an attachment site.
    fn site_position(&self, site: SiteId) -> Option<Vector2>;

    /// Point on `mrna` where `ribosome` is currently translating.
    fn ribosome_attachment_location(
        &self,
        mrna:     MessengerRnaId,
        ribosome: BiomoleculeId,
    ) -> Option<Vector2>;

    /// Point on `mrna` where its destroyer is currently consuming the strand.
    fn destroyer_attachment_location(&self, mrna: MessengerRnaId) -> Option<Vector2>;
}

/// An environment that resolves nothing.  Suitable for entities whose
/// strategies never track anything (free-floating strands and proteins).
pub struct EmptyEnvironment;

impl MotionEnvironment for EmptyEnvironment {
    fn site_position(&self, _site: SiteId) -> Option<Vector2> {
        None
    }

    fn ribosome_attachment_location(
        &self,
        _mrna:     MessengerRnaId,
        _ribosome: BiomoleculeId,
    ) -> Option<Vector2> {
        None
    }

    fn destroyer_attachment_location(&self, _mrna: MessengerRnaId) -> Option<Vector2> {
        None
    }
}
