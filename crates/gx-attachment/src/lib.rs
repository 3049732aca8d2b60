//! `gx-attachment`: how mobile biomolecules find, approach, bind to, and
//! leave attachment sites.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                          |
//! |-----------------|-------------------------------------------------------------------|
//! | [`site`]        | `AttachmentSite`, `SiteKind`, `SiteOwner`, `Occupancy`, `SiteStore` |
//! | [`state`]       | `AttachmentState`: the four generic states                        |
//! | [`machine`]     | `AttachmentStateMachine`: generic transitions and forced exits    |
//! | [`role`]        | Per-kind specializations (`Role`) and their timing constants      |
//! | [`work`]        | `Transcript`, `Translation`, `Destruction` progress handles       |
//! | [`host`]        | `AttachmentHost` trait, `Candidate`                               |
//! | [`body`]        | `AgentBody`: position, shape, bounds, motion strategy             |
//! | [`biomolecule`] | `MobileBiomolecule`: body + machine + RNG stream                  |
//! | [`event`]       | `AttachmentEvent`                                                 |
//! | [`error`]       | `AttachmentError`, `AttachmentResult<T>`                          |
//!
//! # Per-tick flow
//!
//! `MobileBiomolecule::step` first runs the state machine, which may query
//! and mutate sites through the [`AttachmentHost`], swap the body's motion
//! strategy, or drive role work (transcription, translation, destruction).
//! Then the body's current strategy computes the new position.  State
//! transitions are synchronous: a transition taken during `step` is fully
//! in effect, including its new strategy, before motion runs.
//!
//! The machine owns the agent → site relation (`attachment_site`); a site
//! records only its occupant.  Both sides are kept consistent by the
//! machine, which is the only code that reserves, confirms, or releases a
//! site on an agent's behalf.

pub mod biomolecule;
pub mod body;
pub mod error;
pub mod event;
pub mod host;
pub mod machine;
pub mod role;
pub mod site;
pub mod state;
pub mod work;

#[cfg(test)]
mod tests;

pub use biomolecule::MobileBiomolecule;
pub use body::AgentBody;
pub use error::{AttachmentError, AttachmentResult};
pub use event::AttachmentEvent;
pub use host::{AttachmentHost, Candidate};
pub use machine::{AttachmentStateMachine, ATTACHMENT_DISTANCE_THRESHOLD};
pub use role::Role;
pub use site::{AttachmentSite, Occupancy, SiteKind, SiteOwner, SiteStore};
pub use state::AttachmentState;
pub use work::{Destruction, Transcript, Translation};
