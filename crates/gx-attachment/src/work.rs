//! Progress handles for the construction and destruction work that attached
//! biomolecules drive.
//!
//! A handle is held by the role of the agent doing the work; the host keeps
//! the structures themselves (growing mRNA, growing protein, shrinking mRNA)
//! and applies each handle's progress when asked.  Progress only ever
//! increases and is capped at the handle's length.

use gx_core::{GeneId, MessengerRnaId, ProteinId};

fn advance_capped(progress: &mut f64, length_bp: usize, bp: f64) {
    *progress = (*progress + bp.max(0.0)).min(length_bp as f64);
}

/// An mRNA being synthesized by a polymerase moving along a gene.
#[derive(Clone, Debug, PartialEq)]
pub struct Transcript {
    pub gene:           GeneId,
    pub mrna:           MessengerRnaId,
    /// Base pairs transcribed so far; the polymerase's cursor.
    pub transcribed_bp: f64,
    /// Length of the gene's transcribed region.
    pub length_bp:      usize,
}

impl Transcript {
    pub fn new(gene: GeneId, mrna: MessengerRnaId, length_bp: usize) -> Self {
        Self { gene, mrna, transcribed_bp: 0.0, length_bp }
    }

    pub fn advance(&mut self, bp: f64) {
        advance_capped(&mut self.transcribed_bp, self.length_bp, bp);
    }

    /// Whole base pairs the mRNA should currently contain.
    #[inline]
    pub fn completed_bp(&self) -> usize {
        self.transcribed_bp.floor() as usize
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completed_bp() >= self.length_bp
    }
}

/// A protein being built by a ribosome reading an mRNA.
#[derive(Clone, Debug, PartialEq)]
pub struct Translation {
    pub mrna:        MessengerRnaId,
    pub protein:     ProteinId,
    pub progress_bp: f64,
    pub length_bp:   usize,
}

impl Translation {
    pub fn new(mrna: MessengerRnaId, protein: ProteinId, length_bp: usize) -> Self {
        Self { mrna, protein, progress_bp: 0.0, length_bp }
    }

    pub fn advance(&mut self, bp: f64) {
        advance_capped(&mut self.progress_bp, self.length_bp, bp);
    }

    /// Fraction of the strand read, in `[0, 1]`.
    pub fn proportion(&self) -> f64 {
        if self.length_bp == 0 { 1.0 } else { self.progress_bp / self.length_bp as f64 }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.progress_bp >= self.length_bp as f64
    }
}

/// An mRNA being consumed by a destroyer from its leading end.
#[derive(Clone, Debug, PartialEq)]
pub struct Destruction {
    pub mrna:        MessengerRnaId,
    pub consumed_bp: f64,
    pub length_bp:   usize,
}

impl Destruction {
    pub fn new(mrna: MessengerRnaId, length_bp: usize) -> Self {
        Self { mrna, consumed_bp: 0.0, length_bp }
    }

    pub fn advance(&mut self, bp: f64) {
        advance_capped(&mut self.consumed_bp, self.length_bp, bp);
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.consumed_bp >= self.length_bp as f64
    }
}
