//! `gx-molecule`: the passive structures mobile biomolecules work on.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`dna`]     | `DnaMolecule`: straight strand of base pairs, owns genes        |
//! | [`gene`]    | `GeneConfig`, `TfSiteConfig`, `Gene` and its affinity rule       |
//! | [`mrna`]    | `MessengerRna`, `MrnaState`: strand with its own state machine  |
//! | [`protein`] | `Protein`, `ProteinState`                                       |
//! | [`world`]   | `CellWorld`: arenas plus the `AttachmentHost` implementation    |
//! | [`error`]   | `MoleculeError`, `MoleculeResult<T>`                            |
//!
//! # Ownership
//!
//! `CellWorld` owns every site (through a `SiteStore`), the DNA with its
//! genes, and the arenas of mRNA strands and proteins.  Mobile biomolecules
//! live elsewhere (the driver) and reach the world only through the
//! `AttachmentHost` and `MotionEnvironment` traits.

pub mod dna;
pub mod error;
pub mod gene;
pub mod mrna;
pub mod protein;
pub mod world;


pub use dna::{DnaMolecule, BASE_PAIR_SPACING};
pub use error::{MoleculeError, MoleculeResult};
pub use gene::{Gene, GeneConfig, TfSiteConfig};
pub use mrna::{MessengerRna, MrnaState};
pub use protein::{Protein, ProteinState};
pub use world::{CellWorld, ATTACHMENT_SEARCH_RADIUS};
