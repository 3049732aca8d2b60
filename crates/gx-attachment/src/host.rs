//! The `AttachmentHost` trait: the boundary between agents and the world
//! that owns sites and strands.

use gx_core::{AgentRng, BiomoleculeId, BiomoleculeKind, SiteId, Vector2};
use gx_motion::MotionEnvironment;

use crate::{AttachmentResult, Destruction, SiteStore, Transcript, Translation};

/// What a proposing agent tells the host about itself.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    pub agent:    BiomoleculeId,
    pub kind:     BiomoleculeKind,
    pub position: Vector2,
}

/// Everything a state machine needs from the world it lives in.
///
/// The world owns every attachment site and every structure built or
/// consumed by attached agents.  Work methods take the agent's progress
/// handle and apply it; the handle itself is advanced by the agent.
///
/// `abort_*` methods are infallible: they are called on forced exits and
/// must leave the world consistent even if the structure is already gone.
pub trait AttachmentHost: MotionEnvironment {
    fn sites(&self) -> &SiteStore;

    fn sites_mut(&mut self) -> &mut SiteStore;

    /// Find a compatible, free, eligible site near the candidate and propose
    /// to it.  Returns the reserved site, or `None` if every proposal was
    /// refused.
    fn propose_attachments(&mut self, candidate: &Candidate, rng: &mut AgentRng) -> Option<SiteId>;

    // ── Transcription ─────────────────────────────────────────────────────

    /// Start an empty mRNA at the gene whose promoter is `site`.
    fn begin_transcription(
        &mut self,
        polymerase: BiomoleculeId,
        site:       SiteId,
    ) -> AttachmentResult<Transcript>;

    /// Grow the mRNA to the transcript's progress.  Returns the position of
    /// the transcription cursor on the DNA.
    fn extend_transcription(&mut self, transcript: &Transcript) -> AttachmentResult<Vector2>;

    /// Release the finished mRNA into the cytoplasm.
    fn complete_transcription(&mut self, transcript: &Transcript) -> AttachmentResult<()>;

    /// Discard a partial mRNA.
    fn abort_transcription(&mut self, transcript: &Transcript);

    // ── Translation ───────────────────────────────────────────────────────

    /// Start a protein on the mRNA that owns `site`.
    fn begin_translation(
        &mut self,
        ribosome: BiomoleculeId,
        site:     SiteId,
    ) -> AttachmentResult<Translation>;

    /// Record translation progress on the strand and grow the protein.
    fn advance_translation(&mut self, translation: &Translation) -> AttachmentResult<()>;

    /// Release the protein and return the strand to the cytoplasm.
    fn complete_translation(&mut self, translation: &Translation) -> AttachmentResult<()>;

    /// Discard the partial protein and return the strand to the cytoplasm.
    fn abort_translation(&mut self, translation: &Translation);

    // ── Destruction ───────────────────────────────────────────────────────

    /// Start consuming the mRNA that owns `site`.
    fn begin_destruction(
        &mut self,
        destroyer: BiomoleculeId,
        site:      SiteId,
    ) -> AttachmentResult<Destruction>;

    /// Shorten the strand to match the consumed length.
    fn advance_destruction(&mut self, destruction: &Destruction) -> AttachmentResult<()>;

    /// Remove the consumed strand and its sites.
    fn complete_destruction(&mut self, destruction: &Destruction) -> AttachmentResult<()>;

    /// Remove a partly consumed strand and its sites.
    fn abort_destruction(&mut self, destruction: &Destruction);
}
