//! `gx-sim`: fixed-step driver for the rust_gx gene expression simulation.
//!
//! # Step loop
//!
//! ```text
//! for tick in 0..config.total_steps:
//!   ① Advance: for each biomolecule, in any order:
//!                 state machine step (approach / work / cooldown)
//!                 then motion strategy step
//!   ② Settle:  for each biomolecule in ascending BiomoleculeId order:
//!                 propose, attach on arrival, start a new mRNA
//!   ③ World:   recompute gene affinities from attached factors,
//!                 move wandering mRNA strands (sites follow), drift proteins
//!   ④ Observe: forward events, snapshot every snapshot_interval_steps
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                       |
//! |--------------|------------------------------------------------|
//! | [`sim`]      | `Sim`: state, stepping, removal, grab, reset   |
//! | [`builder`]  | `SimBuilder`: validation and assembly          |
//! | [`observer`] | `SimObserver`, `NoopObserver`, `EventLog`      |
//! | [`error`]    | `SimError`, `SimResult<T>`                     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gx_core::{BiomoleculeKind, Rect, SimConfig, Vector2};
//! use gx_molecule::{DnaMolecule, GeneConfig};
//! use gx_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), DnaMolecule::new(Vector2::ZERO, 1_000), bounds)
//!     .gene(GeneConfig::new(100, 30, 200))
//!     .scattered(BiomoleculeKind::RnaPolymerase, 3)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{EventLog, NoopObserver, SimObserver};
pub use sim::Sim;
