//! Notable outcomes of a state-machine step, reported to the driver.

use gx_core::{BiomoleculeId, GeneId, MessengerRnaId, ProteinId, SiteId};

/// Something that happened to an agent or the structures it works on.
///
/// Returned from [`AttachmentStateMachine::step`][crate::AttachmentStateMachine::step]
/// in the order they occurred.  The driver forwards them to observers;
/// nothing inside the core consumes them.
#[derive(Debug, Clone, PartialEq)]
pub enum AttachmentEvent {
    /// A proposal was accepted; the agent now approaches `site`.
    SiteReserved { agent: BiomoleculeId, site: SiteId },

    /// The agent reached `site` and bound to it.
    Attached { agent: BiomoleculeId, site: SiteId },

    /// The agent let go of `site` (completed work, stochastic detach, or a
    /// forced transition).
    Detached { agent: BiomoleculeId, site: SiteId },

    /// A polymerase reached the terminator and released a full-length mRNA.
    MessengerRnaCompleted {
        polymerase: BiomoleculeId,
        gene:       GeneId,
        mrna:       MessengerRnaId,
        length_bp:  usize,
    },

    /// A ribosome finished reading a strand and released the protein.
    ProteinCompleted {
        ribosome: BiomoleculeId,
        mrna:     MessengerRnaId,
        protein:  ProteinId,
    },

    /// A destroyer consumed a strand completely; the strand and its sites
    /// no longer exist.
    MessengerRnaDestroyed {
        destroyer: BiomoleculeId,
        mrna:      MessengerRnaId,
    },
}

impl AttachmentEvent {
    /// The agent the event concerns.
    pub fn agent(&self) -> BiomoleculeId {
        match *self {
            AttachmentEvent::SiteReserved { agent, .. }
            | AttachmentEvent::Attached { agent, .. }
            | AttachmentEvent::Detached { agent, .. } => agent,
            AttachmentEvent::MessengerRnaCompleted { polymerase, .. } => polymerase,
            AttachmentEvent::ProteinCompleted { ribosome, .. }        => ribosome,
            AttachmentEvent::MessengerRnaDestroyed { destroyer, .. }  => destroyer,
        }
    }
}
