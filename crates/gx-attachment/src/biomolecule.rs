//! `MobileBiomolecule`: one independently moving agent.

use gx_core::{AgentRng, BiomoleculeId, BiomoleculeKind, Vector2};
use gx_motion::MotionBounds;

use crate::{
    AgentBody, AttachmentEvent, AttachmentHost, AttachmentResult, AttachmentState,
    AttachmentStateMachine,
};

/// A polymerase, ribosome, transcription factor, or mRNA destroyer.
///
/// Bundles the agent's body, its attachment state machine, and its own RNG
/// stream.  The stream is seeded from `(global_seed, id)`, so the draws an
/// agent makes never depend on which other agents were stepped first.
pub struct MobileBiomolecule {
    id:              BiomoleculeId,
    kind:            BiomoleculeKind,
    pub body:        AgentBody,
    pub machine:     AttachmentStateMachine,
    rng:             AgentRng,
    /// Set while the user holds the agent; the machine and motion pause.
    user_controlled: bool,
    /// Set by `advance`, taken by `settle`: whether the agent was available
    /// when the tick began.
    unsettled:       Option<bool>,
}

impl MobileBiomolecule {
    pub fn new(
        id:          BiomoleculeId,
        kind:        BiomoleculeKind,
        position:    Vector2,
        bounds:      MotionBounds,
        global_seed: u64,
    ) -> Self {
        let mut body = AgentBody::for_kind(kind, position, bounds);
        body.place_within_bounds(position);
        let mut machine = AttachmentStateMachine::new(id, kind);
        machine.start(&mut body);
        Self {
            id,
            kind,
            body,
            machine,
            rng: AgentRng::new(global_seed, id),
            user_controlled: false,
            unsettled:       None,
        }
    }

    /// Set the cooldown of this agent's state machine.
    pub fn with_cooldown(mut self, secs: f64) -> Self {
        self.machine.set_cooldown(secs);
        self
    }

    #[inline] pub fn id(&self) -> BiomoleculeId { self.id }
    #[inline] pub fn kind(&self) -> BiomoleculeKind { self.kind }
    #[inline] pub fn position(&self) -> Vector2 { self.body.position }
    #[inline] pub fn is_user_controlled(&self) -> bool { self.user_controlled }

    /// First half of a tick: run the state machine for `dt` seconds, then
    /// move.  Safe to call for several agents in any order.
    ///
    /// Does nothing while the user holds the agent.
    pub fn advance<H: AttachmentHost>(
        &mut self,
        host: &mut H,
        dt:   f64,
    ) -> AttachmentResult<Vec<AttachmentEvent>> {
        if self.user_controlled {
            return Ok(Vec::new());
        }
        let was_available = self.machine.state() == AttachmentState::UnattachedAndAvailable;
        let events = self.machine.step(&mut self.body, host, dt, &mut self.rng)?;
        self.body.position = self.body.motion.next_location(
            self.body.position,
            &self.body.shape,
            &self.body.bounds,
            &*host,
            dt,
            &mut self.rng,
        );
        self.unsettled = Some(was_available);
        Ok(events)
    }

    /// Second half of a tick: propose, attach, or start new work.  Call for
    /// every agent in ascending id order after all of them have advanced.
    ///
    /// Does nothing unless `advance` ran since the last settle.
    pub fn settle<H: AttachmentHost>(&mut self, host: &mut H) -> AttachmentResult<Vec<AttachmentEvent>> {
        match self.unsettled.take() {
            Some(may_propose) => self.machine.settle(&mut self.body, host, may_propose, &mut self.rng),
            None => Ok(Vec::new()),
        }
    }

    /// A whole tick for a lone agent: [`advance`][Self::advance] then
    /// [`settle`][Self::settle].
    pub fn step<H: AttachmentHost>(
        &mut self,
        host: &mut H,
        dt:   f64,
    ) -> AttachmentResult<Vec<AttachmentEvent>> {
        let mut events = self.advance(host, dt)?;
        events.extend(self.settle(host)?);
        Ok(events)
    }

    /// Take the agent out of automatic control.  Forces it to
    /// `UnattachedAndAvailable` first, so whatever it held is released.
    ///
    /// Returns `None` (and changes nothing) if the agent is not currently
    /// movable by the user.
    pub fn grab<H: AttachmentHost>(&mut self, host: &mut H) -> Option<Vec<AttachmentEvent>> {
        if !self.body.movable_by_user {
            return None;
        }
        let events = self.machine.force_immediate_unattached_and_available(&mut self.body, host);
        self.user_controlled = true;
        self.unsettled = None;
        Some(events)
    }

    /// Move a held agent, clamped to its bounds.  Ignored unless held.
    pub fn drag_to(&mut self, position: Vector2) {
        if self.user_controlled {
            self.body.place_within_bounds(position);
        }
    }

    /// Hand the agent back to its state machine.
    pub fn release_grab(&mut self) {
        self.user_controlled = false;
    }
}
