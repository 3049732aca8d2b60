use gx_core::{BiomoleculeId, GxError, SiteId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("{agent} is {state} but holds no attachment site")]
    NoAttachmentSite {
        agent: BiomoleculeId,
        state: &'static str,
    },

    #[error("{agent} is attached but {site} does not list it as occupant")]
    OccupancyMismatch {
        agent: BiomoleculeId,
        site:  SiteId,
    },

    #[error("{agent} is attached but has no {work} in progress")]
    NoWorkInProgress {
        agent: BiomoleculeId,
        work:  &'static str,
    },

    #[error("{site} cannot host {work}")]
    UnsupportedSite {
        site: SiteId,
        work: &'static str,
    },

    #[error(transparent)]
    Core(#[from] GxError),
}

pub type AttachmentResult<T> = Result<T, AttachmentError>;
