//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `GxError` as one variant
//! via `#[from]`, so lookups that fail in the core surface unchanged.

use thiserror::Error;

use crate::{BiomoleculeId, GeneId, MessengerRnaId, ProteinId, SiteId};

/// The top-level error type for `gx-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum GxError {
    #[error("biomolecule {0} not found")]
    BiomoleculeNotFound(BiomoleculeId),

    #[error("attachment site {0} not found")]
    SiteNotFound(SiteId),

    #[error("gene {0} not found")]
    GeneNotFound(GeneId),

    #[error("messenger RNA {0} not found")]
    MessengerRnaNotFound(MessengerRnaId),

    #[error("protein {0} not found")]
    ProteinNotFound(ProteinId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `gx-*` crates.
pub type GxResult<T> = Result<T, GxError>;
