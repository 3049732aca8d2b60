use gx_core::{GeneId, GxError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MoleculeError {
    #[error("invalid gene configuration: {0}")]
    InvalidGene(String),

    #[error("gene ending at base pair {end_bp} does not fit on a {length_bp} bp strand")]
    GeneOutOfRange {
        end_bp:    usize,
        length_bp: usize,
    },

    #[error("gene overlaps {0}")]
    GeneOverlap(GeneId),

    #[error(transparent)]
    Core(#[from] GxError),
}

pub type MoleculeResult<T> = Result<T, MoleculeError>;
