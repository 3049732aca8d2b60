use gx_attachment::AttachmentError;
use gx_core::GxError;
use gx_molecule::MoleculeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("attachment error: {0}")]
    Attachment(#[from] AttachmentError),

    #[error("molecule error: {0}")]
    Molecule(#[from] MoleculeError),

    #[error(transparent)]
    Core(#[from] GxError),
}

pub type SimResult<T> = Result<T, SimError>;
