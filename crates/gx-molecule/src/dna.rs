//! The DNA strand.

use std::collections::BTreeMap;

use tracing::debug;

use gx_attachment::{SiteKind, SiteOwner, SiteStore};
use gx_core::{GeneId, Vector2};

use crate::{Gene, GeneConfig, MoleculeError, MoleculeResult};

/// Distance between adjacent base pairs along the strand, in picometres.
pub const BASE_PAIR_SPACING: f64 = 65.0;

/// A straight, horizontal strand of `length_bp` base pairs starting at
/// `origin` and running toward +x.  The strand never moves, so the sites of
/// its genes keep fixed positions.
#[derive(Clone, Debug, PartialEq)]
pub struct DnaMolecule {
    origin:    Vector2,
    length_bp: usize,
    genes:     BTreeMap<GeneId, Gene>,
    next_gene: GeneId,
}

impl DnaMolecule {
    pub fn new(origin: Vector2, length_bp: usize) -> Self {
        Self { origin, length_bp, genes: BTreeMap::new(), next_gene: GeneId(0) }
    }

    #[inline] pub fn origin(&self) -> Vector2 { self.origin }
    #[inline] pub fn length_bp(&self) -> usize { self.length_bp }

    /// Model position of (possibly fractional) base pair `bp`.
    #[inline]
    pub fn base_pair_location(&self, bp: f64) -> Vector2 {
        self.origin + Vector2::new(bp * BASE_PAIR_SPACING, 0.0)
    }

    /// Place a gene on the strand and create its sites in `sites`.
    ///
    /// # Errors
    ///
    /// The configuration is invalid, the gene runs past the end of the
    /// strand, or it overlaps a gene already placed.
    pub fn add_gene(&mut self, config: &GeneConfig, sites: &mut SiteStore) -> MoleculeResult<GeneId> {
        config.validate()?;
        if config.end_bp() > self.length_bp {
            return Err(MoleculeError::GeneOutOfRange { end_bp: config.end_bp(), length_bp: self.length_bp });
        }
        if let Some(other) = self.genes.values().find(|g| g.overlaps(config.start_bp, config.end_bp())) {
            return Err(MoleculeError::GeneOverlap(other.id()));
        }

        let id = self.next_gene;
        self.next_gene = id.next();
        let owner = SiteOwner::Gene(id);

        let transcribed_start = (config.start_bp + config.regulatory_bp) as f64;
        let polymerase_site = sites.insert(
            SiteKind::Polymerase,
            owner,
            self.base_pair_location(transcribed_start),
            config.base_polymerase_affinity,
        );
        let tf_sites = config
            .transcription_factor_sites
            .iter()
            .map(|tf| {
                sites.insert(
                    SiteKind::TranscriptionFactor(tf.kind),
                    owner,
                    self.base_pair_location((config.start_bp + tf.offset_bp) as f64),
                    tf.affinity,
                )
            })
            .collect();

        debug!(gene = %id, start_bp = config.start_bp, end_bp = config.end_bp(), "gene placed");
        self.genes.insert(id, Gene::new(id, config, polymerase_site, tf_sites));
        Ok(id)
    }

    #[inline]
    pub fn gene(&self, id: GeneId) -> Option<&Gene> {
        self.genes.get(&id)
    }

    /// Genes in ascending id order.
    pub fn genes(&self) -> impl Iterator<Item = &Gene> {
        self.genes.values()
    }

    /// Recompute every gene's polymerase affinity from its attached factors.
    pub fn update_affinities(&self, sites: &mut SiteStore) {
        for gene in self.genes.values() {
            gene.update_polymerase_affinity(sites);
        }
    }
}
