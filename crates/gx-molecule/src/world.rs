//! `CellWorld`: everything in the cell except the mobile biomolecules.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use gx_attachment::{
    AttachmentError, AttachmentHost, AttachmentResult, Candidate, Destruction, SiteKind,
    SiteOwner, SiteStore, Transcript, Translation,
};
use gx_core::rng::{MESSENGER_RNA_STREAM, PROTEIN_STREAM};
use gx_core::{
    AgentRng, BiomoleculeId, GeneId, GxError, MessengerRnaId, ProteinId, SiteId, Vector2,
};
use gx_motion::{MotionBounds, MotionEnvironment};

use crate::{DnaMolecule, Gene, GeneConfig, MessengerRna, MoleculeResult, Protein};

/// Agents only propose to sites within this distance.
pub const ATTACHMENT_SEARCH_RADIUS: f64 = 3_000.0;

pub const RIBOSOME_SITE_AFFINITY: f64 = 0.8;

pub const DESTROYER_SITE_AFFINITY: f64 = 0.05;

/// Offset of a growing mRNA's leading end from the start of the transcribed
/// region on the DNA.
pub const MRNA_SYNTHESIS_OFFSET: Vector2 = Vector2::new(0.0, 400.0);

/// Offset of a growing protein from the point its ribosome is reading.
pub const PROTEIN_GROWTH_OFFSET: Vector2 = Vector2::new(0.0, 600.0);

/// Owns the DNA, every attachment site, and the arenas of mRNA strands and
/// proteins.  Implements [`AttachmentHost`] so state machines can reserve
/// sites and drive transcription, translation, and destruction.
pub struct CellWorld {
    seed:           u64,
    sites:          SiteStore,
    dna:            DnaMolecule,
    mrnas:          BTreeMap<MessengerRnaId, MessengerRna>,
    proteins:       BTreeMap<ProteinId, Protein>,
    next_mrna:      MessengerRnaId,
    next_protein:   ProteinId,
    /// Where released strands and proteins may drift.
    cytoplasm:      MotionBounds,
    protein_counts: BTreeMap<GeneId, usize>,
}

impl CellWorld {
    pub fn new(seed: u64, dna: DnaMolecule, cytoplasm: MotionBounds) -> Self {
        Self {
            seed,
            sites: SiteStore::new(),
            dna,
            mrnas: BTreeMap::new(),
            proteins: BTreeMap::new(),
            next_mrna: MessengerRnaId(0),
            next_protein: ProteinId(0),
            cytoplasm,
            protein_counts: BTreeMap::new(),
        }
    }

    pub fn add_gene(&mut self, config: &GeneConfig) -> MoleculeResult<GeneId> {
        self.dna.add_gene(config, &mut self.sites)
    }

    #[inline] pub fn dna(&self) -> &DnaMolecule { &self.dna }
    #[inline] pub fn cytoplasm(&self) -> MotionBounds { self.cytoplasm }

    #[inline]
    pub fn gene(&self, id: GeneId) -> Option<&Gene> {
        self.dna.gene(id)
    }

    #[inline]
    pub fn messenger_rna(&self, id: MessengerRnaId) -> Option<&MessengerRna> {
        self.mrnas.get(&id)
    }

    /// Strands in ascending id order.
    pub fn messenger_rnas(&self) -> impl Iterator<Item = &MessengerRna> {
        self.mrnas.values()
    }

    #[inline]
    pub fn protein(&self, id: ProteinId) -> Option<&Protein> {
        self.proteins.get(&id)
    }

    pub fn proteins(&self) -> impl Iterator<Item = &Protein> {
        self.proteins.values()
    }

    /// Completed proteins made from `gene`'s transcripts.
    pub fn protein_count(&self, gene: GeneId) -> usize {
        self.protein_counts.get(&gene).copied().unwrap_or(0)
    }

    /// Agents reserving or occupying any of `owner`'s sites, ascending.
    pub fn site_holders(&self, owner: SiteOwner) -> Vec<BiomoleculeId> {
        let mut holders: Vec<BiomoleculeId> = self
            .sites
            .ids_owned_by(owner)
            .into_iter()
            .filter_map(|id| self.sites.get(id).and_then(|s| s.holder()))
            .collect();
        holders.sort_unstable();
        holders.dedup();
        holders
    }

    // ── Per-tick update ───────────────────────────────────────────────────

    /// Advance the passive structures: regulate genes, move strands and
    /// released proteins, and carry each strand's sites along with it.
    pub fn step(&mut self, dt: f64) {
        self.dna.update_affinities(&mut self.sites);

        for mrna in self.mrnas.values_mut() {
            mrna.step(dt);
            let leading_end = mrna.leading_end();
            for id in mrna.site_ids() {
                if let Some(site) = self.sites.get_mut(id) {
                    site.update_position(leading_end);
                }
            }
        }

        for protein in self.proteins.values_mut().filter(|p| p.is_released()) {
            protein.step(dt);
        }
    }

    // ── Removal and reset ─────────────────────────────────────────────────

    /// Remove a strand, its sites, and any protein still growing on it.
    ///
    /// Agents holding the strand's sites must be forced off first; their
    /// sites are gone after this call.
    pub fn remove_messenger_rna(&mut self, id: MessengerRnaId) -> MoleculeResult<MessengerRna> {
        let mrna = self.mrnas.remove(&id).ok_or(GxError::MessengerRnaNotFound(id))?;
        self.sites.remove_owned_by(SiteOwner::MessengerRna(id));
        self.proteins.retain(|_, p| {
            !matches!(p.state(), crate::ProteinState::Growing { mrna, .. } if mrna == id)
        });
        debug!(mrna = %id, "mRNA removed");
        Ok(mrna)
    }

    /// Discard every strand and protein and free every gene site.
    pub fn reset(&mut self) {
        for id in std::mem::take(&mut self.mrnas).into_keys() {
            self.sites.remove_owned_by(SiteOwner::MessengerRna(id));
        }
        self.proteins.clear();
        let gene_ids: Vec<GeneId> = self.dna.genes().map(|g| g.id()).collect();
        for gene in gene_ids {
            for site in self.sites.ids_owned_by(SiteOwner::Gene(gene)) {
                if let Some(site) = self.sites.get_mut(site) {
                    site.release();
                }
            }
        }
        self.dna.update_affinities(&mut self.sites);
        self.next_mrna = MessengerRnaId(0);
        self.next_protein = ProteinId(0);
        self.protein_counts.clear();
        info!("cell world reset");
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn gene_of_site(&self, site: SiteId) -> AttachmentResult<&Gene> {
        match self.sites.get(site).map(|s| s.owner()) {
            Some(SiteOwner::Gene(gene)) => Ok(self.dna.gene(gene).ok_or(GxError::GeneNotFound(gene))?),
            Some(_) => Err(AttachmentError::UnsupportedSite { site, work: "transcription" }),
            None => Err(GxError::SiteNotFound(site).into()),
        }
    }

    fn strand_of_site(&self, site: SiteId, work: &'static str) -> AttachmentResult<MessengerRnaId> {
        match self.sites.get(site).map(|s| s.owner()) {
            Some(SiteOwner::MessengerRna(mrna)) if self.mrnas.contains_key(&mrna) => Ok(mrna),
            Some(SiteOwner::MessengerRna(mrna)) => Err(GxError::MessengerRnaNotFound(mrna).into()),
            Some(_) => Err(AttachmentError::UnsupportedSite { site, work }),
            None => Err(GxError::SiteNotFound(site).into()),
        }
    }

    fn strand_mut(&mut self, id: MessengerRnaId) -> AttachmentResult<&mut MessengerRna> {
        Ok(self.mrnas.get_mut(&id).ok_or(GxError::MessengerRnaNotFound(id))?)
    }

    /// Strands whose sites may currently be proposed to: wandering, and not
    /// already promised to another agent through either of their sites.
    fn bindable_strands(&self) -> BTreeSet<MessengerRnaId> {
        self.mrnas
            .values()
            .filter(|m| m.is_wandering())
            .filter(|m| {
                m.site_ids()
                    .iter()
                    .all(|&id| self.sites.get(id).is_none_or(|s| s.is_free()))
            })
            .map(|m| m.id())
            .collect()
    }

    fn discard_strand(&mut self, id: MessengerRnaId) {
        if self.mrnas.remove(&id).is_some() {
            self.sites.remove_owned_by(SiteOwner::MessengerRna(id));
            debug!(mrna = %id, "mRNA discarded");
        }
    }
}

// ── MotionEnvironment ─────────────────────────────────────────────────────────

impl MotionEnvironment for CellWorld {
    fn site_position(&self, site: SiteId) -> Option<Vector2> {
        self.sites.get(site).map(|s| s.position())
    }

    fn ribosome_attachment_location(
        &self,
        mrna:     MessengerRnaId,
        ribosome: BiomoleculeId,
    ) -> Option<Vector2> {
        self.mrnas.get(&mrna)?.translation_point(ribosome)
    }

    fn destroyer_attachment_location(&self, mrna: MessengerRnaId) -> Option<Vector2> {
        self.mrnas.get(&mrna)?.destruction_point()
    }
}

// ── AttachmentHost ────────────────────────────────────────────────────────────

impl AttachmentHost for CellWorld {
    fn sites(&self) -> &SiteStore {
        &self.sites
    }

    fn sites_mut(&mut self) -> &mut SiteStore {
        &mut self.sites
    }

    fn propose_attachments(&mut self, candidate: &Candidate, rng: &mut AgentRng) -> Option<SiteId> {
        let bindable = self.bindable_strands();
        self.sites.propose_best(
            candidate.agent,
            candidate.kind,
            candidate.position,
            ATTACHMENT_SEARCH_RADIUS,
            |site| match site.owner() {
                SiteOwner::Gene(_) => true,
                SiteOwner::MessengerRna(mrna) => bindable.contains(&mrna),
            },
            rng,
        )
    }

    // ── Transcription ─────────────────────────────────────────────────────

    fn begin_transcription(
        &mut self,
        polymerase: BiomoleculeId,
        site:       SiteId,
    ) -> AttachmentResult<Transcript> {
        let gene = self.gene_of_site(site)?;
        let (gene_id, length_bp) = (gene.id(), gene.transcribed_bp());
        let leading_end =
            self.dna.base_pair_location(gene.transcribed_start_bp() as f64) + MRNA_SYNTHESIS_OFFSET;

        let id = self.next_mrna;
        self.next_mrna = id.next();
        let owner = SiteOwner::MessengerRna(id);
        let ribosome_site = self.sites.insert(SiteKind::Ribosome, owner, leading_end, RIBOSOME_SITE_AFFINITY);
        let destroyer_site = self.sites.insert(SiteKind::Destroyer, owner, leading_end, DESTROYER_SITE_AFFINITY);
        let rng = AgentRng::for_stream(self.seed, MESSENGER_RNA_STREAM + u64::from(id));
        self.mrnas.insert(
            id,
            MessengerRna::new_synthesized(id, gene_id, leading_end, polymerase, ribosome_site, destroyer_site, rng),
        );
        Ok(Transcript::new(gene_id, id, length_bp))
    }

    fn extend_transcription(&mut self, transcript: &Transcript) -> AttachmentResult<Vector2> {
        let gene = self.dna.gene(transcript.gene).ok_or(GxError::GeneNotFound(transcript.gene))?;
        let cursor = self
            .dna
            .base_pair_location(gene.transcribed_start_bp() as f64 + transcript.transcribed_bp);
        self.strand_mut(transcript.mrna)?.set_length(transcript.completed_bp());
        Ok(cursor)
    }

    fn complete_transcription(&mut self, transcript: &Transcript) -> AttachmentResult<()> {
        let cytoplasm = self.cytoplasm;
        let mrna = self.strand_mut(transcript.mrna)?;
        mrna.set_length(transcript.length_bp);
        mrna.release_into_cytoplasm(cytoplasm);
        let leading_end = mrna.leading_end();
        let site_ids = mrna.site_ids();
        for id in site_ids {
            if let Some(site) = self.sites.get_mut(id) {
                site.update_position(leading_end);
            }
        }
        info!(mrna = %transcript.mrna, gene = %transcript.gene, length_bp = transcript.length_bp, "mRNA released");
        Ok(())
    }

    fn abort_transcription(&mut self, transcript: &Transcript) {
        self.discard_strand(transcript.mrna);
    }

    // ── Translation ───────────────────────────────────────────────────────

    fn begin_translation(
        &mut self,
        ribosome: BiomoleculeId,
        site:     SiteId,
    ) -> AttachmentResult<Translation> {
        let mrna_id = self.strand_of_site(site, "translation")?;
        let id = self.next_protein;
        self.next_protein = id.next();

        let mrna = self.strand_mut(mrna_id)?;
        mrna.begin_translation(ribosome);
        let (gene, length_bp) = (mrna.gene(), mrna.length_bp());
        let position = mrna.leading_end() + PROTEIN_GROWTH_OFFSET;

        let rng = AgentRng::for_stream(self.seed, PROTEIN_STREAM + u64::from(id));
        self.proteins.insert(id, Protein::new_growing(id, gene, ribosome, mrna_id, position, rng));
        debug!(%ribosome, mrna = %mrna_id, protein = %id, "translation started");
        Ok(Translation::new(mrna_id, id, length_bp))
    }

    fn advance_translation(&mut self, translation: &Translation) -> AttachmentResult<()> {
        let mrna = self.strand_mut(translation.mrna)?;
        mrna.set_translation_progress(translation.progress_bp);
        let reading = mrna.point_at(translation.progress_bp);
        let protein = self
            .proteins
            .get_mut(&translation.protein)
            .ok_or(GxError::ProteinNotFound(translation.protein))?;
        protein.grow(translation.proportion(), reading + PROTEIN_GROWTH_OFFSET);
        Ok(())
    }

    fn complete_translation(&mut self, translation: &Translation) -> AttachmentResult<()> {
        self.strand_mut(translation.mrna)?.wander();
        let cytoplasm = self.cytoplasm;
        let protein = self
            .proteins
            .get_mut(&translation.protein)
            .ok_or(GxError::ProteinNotFound(translation.protein))?;
        protein.release(cytoplasm);
        *self.protein_counts.entry(protein.gene()).or_default() += 1;
        Ok(())
    }

    fn abort_translation(&mut self, translation: &Translation) {
        if let Some(mrna) = self.mrnas.get_mut(&translation.mrna) {
            mrna.wander();
        }
        self.proteins.remove(&translation.protein);
    }

    // ── Destruction ───────────────────────────────────────────────────────

    fn begin_destruction(
        &mut self,
        destroyer: BiomoleculeId,
        site:      SiteId,
    ) -> AttachmentResult<Destruction> {
        let mrna_id = self.strand_of_site(site, "destruction")?;
        let mrna = self.strand_mut(mrna_id)?;
        mrna.begin_destruction(destroyer);
        debug!(%destroyer, mrna = %mrna_id, "destruction started");
        Ok(Destruction::new(mrna_id, mrna.length_bp()))
    }

    fn advance_destruction(&mut self, destruction: &Destruction) -> AttachmentResult<()> {
        let mrna = self.strand_mut(destruction.mrna)?;
        mrna.set_consumed(destruction.consumed_bp);
        let leading_end = mrna.leading_end();
        let site_ids = mrna.site_ids();
        for id in site_ids {
            if let Some(site) = self.sites.get_mut(id) {
                site.update_position(leading_end);
            }
        }
        Ok(())
    }

    fn complete_destruction(&mut self, destruction: &Destruction) -> AttachmentResult<()> {
        self.remove_messenger_rna(destruction.mrna)
            .map(|_| ())
            .map_err(|_| GxError::MessengerRnaNotFound(destruction.mrna).into())
    }

    fn abort_destruction(&mut self, destruction: &Destruction) {
        self.discard_strand(destruction.mrna);
    }
}
