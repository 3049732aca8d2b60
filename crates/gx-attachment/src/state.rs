//! The generic attachment states.

use std::fmt;

/// The closed set of attachment states every mobile biomolecule moves
/// through.  How each state behaves depends on the agent's [`Role`][crate::Role].
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum AttachmentState {
    /// Wandering and proposing to nearby sites each tick.  Initial state.
    #[default]
    UnattachedAndAvailable,
    /// Holding a reservation and approaching the site.
    MovingTowardsAttachment,
    /// Bound to the site; role work runs here.
    Attached,
    /// Cooling down after detaching; proposes nothing.
    UnattachedButUnavailable { elapsed_secs: f64 },
}

impl AttachmentState {
    pub fn name(&self) -> &'static str {
        match self {
            AttachmentState::UnattachedAndAvailable            => "unattached and available",
            AttachmentState::MovingTowardsAttachment           => "moving towards attachment",
            AttachmentState::Attached                          => "attached",
            AttachmentState::UnattachedButUnavailable { .. }   => "unattached but unavailable",
        }
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        matches!(self, AttachmentState::Attached)
    }

    #[inline]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, AttachmentState::UnattachedButUnavailable { .. })
    }
}

impl fmt::Display for AttachmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
