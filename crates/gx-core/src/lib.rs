//! `gx-core`: foundational types for the `rust_gx` gene expression simulation.
//!
//! This crate is a dependency of every other `gx-*` crate.  It intentionally
//! has no `gx-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `BiomoleculeId`, `SiteId`, `GeneId`, `MessengerRnaId`, `ProteinId` |
//! | [`geom`]        | `Vector2`, `Rect`                                          |
//! | [`range`]       | `Range`: closed numeric interval                           |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                            |
//! | [`rng`]         | `AgentRng` (per-entity), `SimRng` (global)                 |
//! | [`kind`]        | `BiomoleculeKind`, `TranscriptionFactorKind`, `Polarity`   |
//! | [`error`]       | `GxError`, `GxResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod error;
pub mod geom;
pub mod ids;
pub mod kind;
pub mod range;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{GxError, GxResult};
pub use geom::{Rect, Vector2};
pub use ids::{BiomoleculeId, GeneId, MessengerRnaId, ProteinId, SiteId};
pub use kind::{BiomoleculeKind, Polarity, TranscriptionFactorKind};
pub use range::Range;
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
