//! Biomolecule kinds shared across the attachment and world crates.
//!
//! The kind of a mobile biomolecule selects which attachment-state
//! specialization drives it and which attachment sites will consider it.

use std::fmt;

/// Whether a transcription factor promotes or represses transcription.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    Positive,
    Negative,
}

/// Identifies a family of transcription factor.  A factor only binds sites
/// configured for exactly the same family and polarity.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TranscriptionFactorKind {
    pub family:   u8,
    pub polarity: Polarity,
}

impl TranscriptionFactorKind {
    pub const fn positive(family: u8) -> Self {
        Self { family, polarity: Polarity::Positive }
    }

    pub const fn negative(family: u8) -> Self {
        Self { family, polarity: Polarity::Negative }
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.polarity == Polarity::Positive
    }
}

/// The closed set of mobile biomolecule kinds.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BiomoleculeKind {
    TranscriptionFactor(TranscriptionFactorKind),
    RnaPolymerase,
    Ribosome,
    MessengerRnaDestroyer,
}

impl BiomoleculeKind {
    /// Bounding-box size `(width, height)` in picometres.
    pub fn size(self) -> (f64, f64) {
        match self {
            BiomoleculeKind::TranscriptionFactor(_) => (325.0, 240.0),
            BiomoleculeKind::RnaPolymerase         => (340.0, 480.0),
            BiomoleculeKind::Ribosome              => (450.0, 500.0),
            BiomoleculeKind::MessengerRnaDestroyer => (250.0, 350.0),
        }
    }

    /// Human-readable label, useful for logs and summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            BiomoleculeKind::TranscriptionFactor(_) => "transcription factor",
            BiomoleculeKind::RnaPolymerase          => "RNA polymerase",
            BiomoleculeKind::Ribosome               => "ribosome",
            BiomoleculeKind::MessengerRnaDestroyer  => "mRNA destroyer",
        }
    }
}

impl fmt::Display for BiomoleculeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
