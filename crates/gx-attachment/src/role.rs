//! Per-kind specializations of the attachment state machine.
//!
//! The generic states are shared; a [`Role`] decides what `Attached` does,
//! whether an approaching agent may be dragged, and where on a site the
//! agent rests.  Roles that build or consume something carry the progress
//! handle for the work in flight.

use gx_core::{BiomoleculeKind, Vector2};

use crate::{Destruction, Transcript, Translation};

/// Per-second detach rate of a transcription factor on a site of affinity 0.
/// The effective rate scales with `1 − affinity`.
pub const TF_DETACH_RATE: f64 = 0.5;

/// Time a polymerase spends changing conformation on the promoter before
/// transcription starts.
pub const POLYMERASE_CONFORMATION_SECS: f64 = 1.0;

pub const TRANSCRIPTION_SPEED_BP_PER_SEC: f64 = 20.0;

pub const TRANSLATION_SPEED_BP_PER_SEC: f64 = 15.0;

pub const DESTRUCTION_SPEED_BP_PER_SEC: f64 = 30.0;

/// What an attached polymerase is doing.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum PolymeraseWork {
    #[default]
    Idle,
    Conforming { elapsed_secs: f64 },
    Transcribing(Transcript),
}

/// The closed set of agent roles, one per [`BiomoleculeKind`] family.
#[derive(Clone, Debug, PartialEq)]
pub enum Role {
    TranscriptionFactor,
    RnaPolymerase(PolymeraseWork),
    Ribosome(Option<Translation>),
    MessengerRnaDestroyer(Option<Destruction>),
}

impl Role {
    pub fn for_kind(kind: BiomoleculeKind) -> Self {
        match kind {
            BiomoleculeKind::TranscriptionFactor(_) => Role::TranscriptionFactor,
            BiomoleculeKind::RnaPolymerase          => Role::RnaPolymerase(PolymeraseWork::Idle),
            BiomoleculeKind::Ribosome               => Role::Ribosome(None),
            BiomoleculeKind::MessengerRnaDestroyer  => Role::MessengerRnaDestroyer(None),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::TranscriptionFactor      => "transcription factor",
            Role::RnaPolymerase(_)         => "RNA polymerase",
            Role::Ribosome(_)              => "ribosome",
            Role::MessengerRnaDestroyer(_) => "mRNA destroyer",
        }
    }

    /// Offset subtracted from a site's position to get the agent position
    /// when bound: every agent rests on top of its site.
    pub fn destination_offset(kind: BiomoleculeKind) -> Vector2 {
        let (_, height) = kind.size();
        Vector2::new(0.0, -height * 0.5)
    }

    /// Ribosomes and destroyers lock onto a strand once committed; the user
    /// cannot pull them off mid-approach.
    pub fn draggable_while_approaching(&self) -> bool {
        !matches!(self, Role::Ribosome(_) | Role::MessengerRnaDestroyer(_))
    }

    /// Only transcription factors can be dragged off a site.
    pub fn draggable_while_attached(&self) -> bool {
        matches!(self, Role::TranscriptionFactor)
    }

    /// A ribosome binds on its first approach step without an arrival check.
    pub fn attaches_without_arrival(&self) -> bool {
        matches!(self, Role::Ribosome(_))
    }

    /// `true` while construction or destruction work is in flight.
    pub fn has_work_in_progress(&self) -> bool {
        match self {
            Role::TranscriptionFactor      => false,
            Role::RnaPolymerase(work)      => *work != PolymeraseWork::Idle,
            Role::Ribosome(t)              => t.is_some(),
            Role::MessengerRnaDestroyer(d) => d.is_some(),
        }
    }
}
