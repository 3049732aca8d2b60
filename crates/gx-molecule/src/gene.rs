//! Genes and their regulation.
//!
//! A gene is a stretch of the DNA strand: a regulatory region (hosting the
//! transcription-factor sites) followed by the transcribed region, which
//! runs up to the terminator.  The polymerase site sits where the
//! transcribed region begins.
//!
//! The polymerase-site affinity is recomputed every tick:
//!
//!   affinity = min(1, base + POSITIVE_TF_BOOST · positives) · NEGATIVE_TF_FACTOR^negatives
//!
//! counting only factors that are attached, not those still approaching.

use gx_attachment::{Occupancy, SiteKind, SiteStore};
use gx_core::{GeneId, Polarity, SiteId, TranscriptionFactorKind};

use crate::{MoleculeError, MoleculeResult};

/// Affinity added to the polymerase site per attached positive factor.
pub const POSITIVE_TF_BOOST: f64 = 0.5;

/// Multiplier applied to the polymerase site per attached negative factor.
pub const NEGATIVE_TF_FACTOR: f64 = 0.1;

/// One transcription-factor site in a gene's regulatory region.
#[derive(Clone, Debug, PartialEq)]
pub struct TfSiteConfig {
    pub kind:      TranscriptionFactorKind,
    /// Position within the regulatory region.
    pub offset_bp: usize,
    pub affinity:  f64,
}

/// Layout and regulation of a gene, as supplied by the model builder.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneConfig {
    pub start_bp:                   usize,
    pub regulatory_bp:              usize,
    pub transcribed_bp:             usize,
    pub base_polymerase_affinity:   f64,
    pub transcription_factor_sites: Vec<TfSiteConfig>,
}

impl GeneConfig {
    pub fn new(start_bp: usize, regulatory_bp: usize, transcribed_bp: usize) -> Self {
        Self {
            start_bp,
            regulatory_bp,
            transcribed_bp,
            base_polymerase_affinity: 0.1,
            transcription_factor_sites: Vec::new(),
        }
    }

    pub fn with_polymerase_affinity(mut self, affinity: f64) -> Self {
        self.base_polymerase_affinity = affinity;
        self
    }

    pub fn with_tf_site(mut self, kind: TranscriptionFactorKind, offset_bp: usize, affinity: f64) -> Self {
        self.transcription_factor_sites.push(TfSiteConfig { kind, offset_bp, affinity });
        self
    }

    /// One past the last base pair of the gene.
    #[inline]
    pub fn end_bp(&self) -> usize {
        self.start_bp + self.regulatory_bp + self.transcribed_bp
    }

    pub fn validate(&self) -> MoleculeResult<()> {
        if self.transcribed_bp == 0 {
            return Err(MoleculeError::InvalidGene("transcribed region is empty".into()));
        }
        if !(0.0..=1.0).contains(&self.base_polymerase_affinity) {
            return Err(MoleculeError::InvalidGene(format!(
                "base polymerase affinity {} is outside [0, 1]",
                self.base_polymerase_affinity
            )));
        }
        if let Some(tf) = self.transcription_factor_sites.iter().find(|tf| tf.offset_bp >= self.regulatory_bp) {
            return Err(MoleculeError::InvalidGene(format!(
                "transcription factor site at {} bp lies outside the {} bp regulatory region",
                tf.offset_bp, self.regulatory_bp
            )));
        }
        Ok(())
    }
}

/// A gene placed on the DNA, with the ids of its sites.
#[derive(Clone, Debug, PartialEq)]
pub struct Gene {
    id:                       GeneId,
    start_bp:                 usize,
    regulatory_bp:            usize,
    transcribed_bp:           usize,
    base_polymerase_affinity: f64,
    polymerase_site:          SiteId,
    tf_sites:                 Vec<SiteId>,
}

impl Gene {
    pub(crate) fn new(id: GeneId, config: &GeneConfig, polymerase_site: SiteId, tf_sites: Vec<SiteId>) -> Self {
        Self {
            id,
            start_bp: config.start_bp,
            regulatory_bp: config.regulatory_bp,
            transcribed_bp: config.transcribed_bp,
            base_polymerase_affinity: config.base_polymerase_affinity,
            polymerase_site,
            tf_sites,
        }
    }

    #[inline] pub fn id(&self) -> GeneId { self.id }
    #[inline] pub fn start_bp(&self) -> usize { self.start_bp }
    #[inline] pub fn regulatory_bp(&self) -> usize { self.regulatory_bp }
    #[inline] pub fn transcribed_bp(&self) -> usize { self.transcribed_bp }
    #[inline] pub fn polymerase_site(&self) -> SiteId { self.polymerase_site }
    #[inline] pub fn tf_sites(&self) -> &[SiteId] { &self.tf_sites }
    #[inline] pub fn base_polymerase_affinity(&self) -> f64 { self.base_polymerase_affinity }

    /// First base pair of the transcribed region.
    #[inline]
    pub fn transcribed_start_bp(&self) -> usize {
        self.start_bp + self.regulatory_bp
    }

    /// One past the terminator.
    #[inline]
    pub fn end_bp(&self) -> usize {
        self.transcribed_start_bp() + self.transcribed_bp
    }

    #[inline]
    pub fn overlaps(&self, start_bp: usize, end_bp: usize) -> bool {
        start_bp < self.end_bp() && self.start_bp < end_bp
    }

    /// Current polymerase affinity given which factors are attached.
    pub fn polymerase_affinity(&self, sites: &SiteStore) -> f64 {
        let (mut positives, mut negatives) = (0, 0);
        for site in self.tf_sites.iter().filter_map(|&id| sites.get(id)) {
            let SiteKind::TranscriptionFactor(kind) = site.kind() else { continue };
            if !matches!(site.occupancy(), Occupancy::Occupied(_)) {
                continue;
            }
            match kind.polarity {
                Polarity::Positive => positives += 1,
                Polarity::Negative => negatives += 1,
            }
        }
        let boosted = (self.base_polymerase_affinity + POSITIVE_TF_BOOST * positives as f64).min(1.0);
        boosted * NEGATIVE_TF_FACTOR.powi(negatives)
    }

    pub fn update_polymerase_affinity(&self, sites: &mut SiteStore) {
        let affinity = self.polymerase_affinity(sites);
        if let Some(site) = sites.get_mut(self.polymerase_site) {
            site.set_affinity(affinity);
        }
    }
}
