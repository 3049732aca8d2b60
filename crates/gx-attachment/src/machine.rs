//! The per-agent attachment state machine.

use tracing::{debug, info, warn};

use gx_core::{AgentRng, BiomoleculeId, BiomoleculeKind, GxError, SiteId, Vector2};
use gx_motion::MotionStrategy;

use crate::role::{
    PolymeraseWork, DESTRUCTION_SPEED_BP_PER_SEC, POLYMERASE_CONFORMATION_SECS, TF_DETACH_RATE,
    TRANSCRIPTION_SPEED_BP_PER_SEC, TRANSLATION_SPEED_BP_PER_SEC,
};
use crate::{
    AgentBody, AttachmentError, AttachmentEvent, AttachmentHost, AttachmentResult,
    AttachmentState, Candidate, Occupancy, Role,
};

/// An approaching agent is considered arrived once it is closer than this to
/// its target.  Used by every arrival check.
pub const ATTACHMENT_DISTANCE_THRESHOLD: f64 = 5.0;

/// Cooldown used when none is configured.
pub const DEFAULT_COOLDOWN_SECS: f64 = 3.0;

/// Drives one mobile biomolecule through
/// `UnattachedAndAvailable → MovingTowardsAttachment → Attached →
/// UnattachedButUnavailable → UnattachedAndAvailable`.
///
/// Owns the agent → site relation.  Transitions are synchronous: the entry
/// effects of the new state (motion strategy, drag permission, role work)
/// are applied before the call that caused them returns.
///
/// A tick is split in two calls.  [`step`][Self::step] only touches what
/// this agent already holds, so a set of agents may be stepped in any
/// order.  [`settle`][Self::settle] makes the changes other agents can
/// see (proposing, attaching, starting a new strand) and must be called in
/// ascending agent id order once every agent has stepped.
#[derive(Clone, Debug, PartialEq)]
pub struct AttachmentStateMachine {
    agent:              BiomoleculeId,
    kind:               BiomoleculeKind,
    role:               Role,
    state:              AttachmentState,
    attachment_site:    Option<SiteId>,
    destination_offset: Vector2,
    cooldown_secs:      f64,
}

impl AttachmentStateMachine {
    pub fn new(agent: BiomoleculeId, kind: BiomoleculeKind) -> Self {
        Self {
            agent,
            kind,
            role: Role::for_kind(kind),
            state: AttachmentState::UnattachedAndAvailable,
            attachment_site: None,
            destination_offset: Role::destination_offset(kind),
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
        }
    }

    /// Set this instance's cooldown.  Negative values are treated as zero.
    pub fn with_cooldown(mut self, secs: f64) -> Self {
        self.set_cooldown(secs);
        self
    }

    pub fn set_cooldown(&mut self, secs: f64) {
        self.cooldown_secs = secs.max(0.0);
    }

    #[inline] pub fn agent(&self) -> BiomoleculeId { self.agent }
    #[inline] pub fn kind(&self) -> BiomoleculeKind { self.kind }
    #[inline] pub fn role(&self) -> &Role { &self.role }
    #[inline] pub fn state(&self) -> AttachmentState { self.state }
    #[inline] pub fn attachment_site(&self) -> Option<SiteId> { self.attachment_site }
    #[inline] pub fn destination_offset(&self) -> Vector2 { self.destination_offset }
    #[inline] pub fn cooldown_secs(&self) -> f64 { self.cooldown_secs }

    /// Apply the entry effects of the initial state to `body`.
    pub fn start(&mut self, body: &mut AgentBody) {
        self.enter_unattached_and_available(body);
    }

    // ── Per-tick step ─────────────────────────────────────────────────────

    /// Run the active state's behaviour for `dt` seconds.
    ///
    /// Only the sites and structures this agent holds are written, so the
    /// result never depends on which other agents stepped first.
    ///
    /// # Errors
    ///
    /// Returns an error when the machine and the world disagree about a
    /// binding (attached with no site, a site that no longer lists this
    /// agent, work on a structure that has gone).  These are invariant
    /// violations, not contention; contention shows up as refused proposals.
    pub fn step<H: AttachmentHost>(
        &mut self,
        body: &mut AgentBody,
        host: &mut H,
        dt:   f64,
        rng:  &mut AgentRng,
    ) -> AttachmentResult<Vec<AttachmentEvent>> {
        let mut events = Vec::new();
        match self.state {
            AttachmentState::UnattachedAndAvailable => {}
            AttachmentState::MovingTowardsAttachment => {
                self.step_moving_towards_attachment(body, host)?;
            }
            AttachmentState::Attached => {
                self.step_attached(body, host, dt, rng, &mut events)?;
            }
            AttachmentState::UnattachedButUnavailable { .. } => {
                self.step_unattached_but_unavailable(body, dt);
            }
        }
        Ok(events)
    }

    /// Apply this tick's shared-world changes.
    ///
    /// An available agent proposes, but only if it was already available
    /// when the tick began (`may_propose`).  An approaching agent that has
    /// arrived attaches.  A polymerase that has finished conforming starts
    /// its mRNA.
    pub fn settle<H: AttachmentHost>(
        &mut self,
        body:        &mut AgentBody,
        host:        &mut H,
        may_propose: bool,
        rng:         &mut AgentRng,
    ) -> AttachmentResult<Vec<AttachmentEvent>> {
        let mut events = Vec::new();
        match self.state {
            AttachmentState::UnattachedAndAvailable if may_propose => {
                self.propose(body, host, rng, &mut events);
            }
            AttachmentState::MovingTowardsAttachment => {
                self.attach_on_arrival(body, host, &mut events)?;
            }
            AttachmentState::Attached => {
                self.begin_conformed_transcription(body, host)?;
            }
            _ => {}
        }
        Ok(events)
    }

    fn propose<H: AttachmentHost>(
        &mut self,
        body:   &mut AgentBody,
        host:   &mut H,
        rng:    &mut AgentRng,
        events: &mut Vec<AttachmentEvent>,
    ) {
        let candidate = Candidate { agent: self.agent, kind: self.kind, position: body.position };
        if let Some(site) = host.propose_attachments(&candidate, rng) {
            debug!(agent = %self.agent, %site, "site reserved");
            events.push(AttachmentEvent::SiteReserved { agent: self.agent, site });
            self.attachment_site = Some(site);
            self.enter_moving_towards_attachment(body, site);
        }
    }

    /// The reserved site's position, or `None` if the reservation is gone.
    fn reserved_site_position<H: AttachmentHost>(&self, host: &H, site_id: SiteId) -> Option<Vector2> {
        match host.sites().get(site_id).map(|site| (site.occupancy(), site.position())) {
            Some((Occupancy::Reserved(holder), position)) if holder == self.agent => Some(position),
            _ => None,
        }
    }

    fn step_moving_towards_attachment<H: AttachmentHost>(
        &mut self,
        body: &mut AgentBody,
        host: &mut H,
    ) -> AttachmentResult<()> {
        let site_id = self.held_site()?;
        if self.reserved_site_position(host, site_id).is_none() {
            warn!(agent = %self.agent, site = %site_id, "reservation vanished while approaching");
            self.attachment_site = None;
            self.enter_unattached_and_available(body);
        }
        Ok(())
    }

    fn attach_on_arrival<H: AttachmentHost>(
        &mut self,
        body:   &mut AgentBody,
        host:   &mut H,
        events: &mut Vec<AttachmentEvent>,
    ) -> AttachmentResult<()> {
        let site_id = self.held_site()?;
        let Some(site_position) = self.reserved_site_position(host, site_id) else {
            return Ok(());
        };

        // The nearest point the bounds allow, so an out-of-reach site still
        // ends the approach instead of pinning the reservation.
        let target = body.bounds.clamp(site_position - self.destination_offset, &body.shape);
        let arrived = self.role.attaches_without_arrival()
            || body.position.distance(target) < ATTACHMENT_DISTANCE_THRESHOLD;
        if !arrived {
            return Ok(());
        }

        if let Some(site) = host.sites_mut().get_mut(site_id) {
            site.confirm_attachment(self.agent);
        }
        events.push(AttachmentEvent::Attached { agent: self.agent, site: site_id });
        self.enter_attached(body, host, site_id)
    }

    fn step_attached<H: AttachmentHost>(
        &mut self,
        body:   &mut AgentBody,
        host:   &mut H,
        dt:     f64,
        rng:    &mut AgentRng,
        events: &mut Vec<AttachmentEvent>,
    ) -> AttachmentResult<()> {
        let site_id = self.held_site()?;
        let occupancy = host
            .sites()
            .get(site_id)
            .ok_or(GxError::SiteNotFound(site_id))?
            .occupancy();
        if occupancy != Occupancy::Occupied(self.agent) {
            return Err(AttachmentError::OccupancyMismatch { agent: self.agent, site: site_id });
        }

        match self.role {
            Role::TranscriptionFactor      => self.step_attached_transcription_factor(body, host, dt, rng, events),
            Role::RnaPolymerase(_)         => self.step_attached_polymerase(body, host, dt, events),
            Role::Ribosome(_)              => self.step_attached_ribosome(body, host, dt, events),
            Role::MessengerRnaDestroyer(_) => self.step_attached_destroyer(body, host, dt, events),
        }
    }

    fn step_unattached_but_unavailable(&mut self, body: &mut AgentBody, dt: f64) {
        let AttachmentState::UnattachedButUnavailable { elapsed_secs } = &mut self.state else {
            return;
        };
        *elapsed_secs += dt;
        if *elapsed_secs >= self.cooldown_secs {
            self.enter_unattached_and_available(body);
        }
    }

    // ── Role: transcription factor ────────────────────────────────────────

    fn step_attached_transcription_factor<H: AttachmentHost>(
        &mut self,
        body:   &mut AgentBody,
        host:   &mut H,
        dt:     f64,
        rng:    &mut AgentRng,
        events: &mut Vec<AttachmentEvent>,
    ) -> AttachmentResult<()> {
        let site_id = self.held_site()?;
        let affinity = host
            .sites()
            .get(site_id)
            .ok_or(GxError::SiteNotFound(site_id))?
            .affinity();
        if rng.gen_bool((1.0 - affinity) * TF_DETACH_RATE * dt) {
            debug!(agent = %self.agent, site = %site_id, "transcription factor detached");
            self.release_site(host, events);
            self.enter_unattached_but_unavailable(body);
        }
        Ok(())
    }

    // ── Role: RNA polymerase ──────────────────────────────────────────────

    fn step_attached_polymerase<H: AttachmentHost>(
        &mut self,
        body:   &mut AgentBody,
        host:   &mut H,
        dt:     f64,
        events: &mut Vec<AttachmentEvent>,
    ) -> AttachmentResult<()> {
        let agent = self.agent;
        let offset = self.destination_offset;
        let Role::RnaPolymerase(work) = &mut self.role else {
            return Ok(());
        };

        let mut finished = None;
        match work {
            PolymeraseWork::Idle => {
                *work = PolymeraseWork::Conforming { elapsed_secs: 0.0 };
            }
            PolymeraseWork::Conforming { elapsed_secs } => {
                *elapsed_secs += dt;
            }
            PolymeraseWork::Transcribing(transcript) => {
                transcript.advance(TRANSCRIPTION_SPEED_BP_PER_SEC * dt);
                body.position = host.extend_transcription(transcript)? - offset;
                if transcript.is_complete() {
                    host.complete_transcription(transcript)?;
                    finished = Some(transcript.clone());
                    *work = PolymeraseWork::Idle;
                }
            }
        }

        if let Some(transcript) = finished {
            info!(
                %agent, gene = %transcript.gene, mrna = %transcript.mrna,
                length_bp = transcript.length_bp, "mRNA completed"
            );
            events.push(AttachmentEvent::MessengerRnaCompleted {
                polymerase: agent,
                gene:       transcript.gene,
                mrna:       transcript.mrna,
                length_bp:  transcript.length_bp,
            });
            self.release_site(host, events);
            self.enter_unattached_but_unavailable(body);
        }
        Ok(())
    }

    /// Start the mRNA once conformation has run its course.  Runs in
    /// `settle`, so new strands and sites get ids in agent order.
    fn begin_conformed_transcription<H: AttachmentHost>(
        &mut self,
        body: &mut AgentBody,
        host: &mut H,
    ) -> AttachmentResult<()> {
        let Role::RnaPolymerase(PolymeraseWork::Conforming { elapsed_secs }) = self.role else {
            return Ok(());
        };
        if elapsed_secs < POLYMERASE_CONFORMATION_SECS {
            return Ok(());
        }

        let agent = self.agent;
        let transcript = host.begin_transcription(agent, self.held_site()?)?;
        debug!(%agent, gene = %transcript.gene, mrna = %transcript.mrna, "transcription started");
        body.position = host.extend_transcription(&transcript)? - self.destination_offset;
        self.role = Role::RnaPolymerase(PolymeraseWork::Transcribing(transcript));
        Ok(())
    }

    // ── Role: ribosome ────────────────────────────────────────────────────

    fn step_attached_ribosome<H: AttachmentHost>(
        &mut self,
        body:   &mut AgentBody,
        host:   &mut H,
        dt:     f64,
        events: &mut Vec<AttachmentEvent>,
    ) -> AttachmentResult<()> {
        let agent = self.agent;
        let Role::Ribosome(Some(translation)) = &mut self.role else {
            return Err(AttachmentError::NoWorkInProgress { agent, work: "translation" });
        };
        translation.advance(TRANSLATION_SPEED_BP_PER_SEC * dt);
        host.advance_translation(translation)?;
        if !translation.is_complete() {
            return Ok(());
        }

        host.complete_translation(translation)?;
        let (mrna, protein) = (translation.mrna, translation.protein);
        self.role = Role::Ribosome(None);
        info!(%agent, %mrna, %protein, "protein completed");
        events.push(AttachmentEvent::ProteinCompleted { ribosome: agent, mrna, protein });
        self.release_site(host, events);
        self.enter_unattached_and_available(body);
        Ok(())
    }

    // ── Role: mRNA destroyer ──────────────────────────────────────────────

    fn step_attached_destroyer<H: AttachmentHost>(
        &mut self,
        body:   &mut AgentBody,
        host:   &mut H,
        dt:     f64,
        events: &mut Vec<AttachmentEvent>,
    ) -> AttachmentResult<()> {
        let agent = self.agent;
        let Role::MessengerRnaDestroyer(Some(destruction)) = &mut self.role else {
            return Err(AttachmentError::NoWorkInProgress { agent, work: "destruction" });
        };
        destruction.advance(DESTRUCTION_SPEED_BP_PER_SEC * dt);
        host.advance_destruction(destruction)?;
        if !destruction.is_complete() {
            return Ok(());
        }

        let destruction = destruction.clone();
        self.role = Role::MessengerRnaDestroyer(None);
        // The site belongs to the strand, so let go of it before the strand goes.
        self.release_site(host, events);
        host.complete_destruction(&destruction)?;
        info!(%agent, mrna = %destruction.mrna, "mRNA destroyed");
        events.push(AttachmentEvent::MessengerRnaDestroyed { destroyer: agent, mrna: destruction.mrna });
        self.enter_unattached_and_available(body);
        Ok(())
    }

    // ── Forced transitions ────────────────────────────────────────────────

    /// Drop everything and become available immediately.
    ///
    /// Any work in flight is aborted first (partial mRNA or protein
    /// discarded, a strand under translation returned to the cytoplasm),
    /// then the held site, reserved or occupied, is released.
    pub fn force_immediate_unattached_and_available<H: AttachmentHost>(
        &mut self,
        body: &mut AgentBody,
        host: &mut H,
    ) -> Vec<AttachmentEvent> {
        let mut events = Vec::new();
        self.abort_work(host);
        self.release_site(host, &mut events);
        self.enter_unattached_and_available(body);
        events
    }

    /// Like [`force_immediate_unattached_and_available`][Self::force_immediate_unattached_and_available]
    /// but enters the cooldown state instead.
    pub fn force_immediate_unattached_but_unavailable<H: AttachmentHost>(
        &mut self,
        body: &mut AgentBody,
        host: &mut H,
    ) -> Vec<AttachmentEvent> {
        let mut events = Vec::new();
        self.abort_work(host);
        self.release_site(host, &mut events);
        self.enter_unattached_but_unavailable(body);
        events
    }

    fn abort_work<H: AttachmentHost>(&mut self, host: &mut H) {
        match &mut self.role {
            Role::TranscriptionFactor => {}
            Role::RnaPolymerase(work) => {
                if let PolymeraseWork::Transcribing(transcript) = std::mem::take(work) {
                    debug!(agent = %self.agent, mrna = %transcript.mrna, "transcription aborted");
                    host.abort_transcription(&transcript);
                }
            }
            Role::Ribosome(translation) => {
                if let Some(translation) = translation.take() {
                    debug!(agent = %self.agent, mrna = %translation.mrna, "translation aborted");
                    host.abort_translation(&translation);
                }
            }
            Role::MessengerRnaDestroyer(destruction) => {
                if let Some(destruction) = destruction.take() {
                    debug!(agent = %self.agent, mrna = %destruction.mrna, "destruction aborted");
                    host.abort_destruction(&destruction);
                }
            }
        }
    }

    // ── State entry ───────────────────────────────────────────────────────

    fn transition(&mut self, to: AttachmentState) {
        debug!(agent = %self.agent, from = %self.state, %to, "attachment transition");
        self.state = to;
    }

    fn enter_unattached_and_available(&mut self, body: &mut AgentBody) {
        self.attachment_site = None;
        body.motion = MotionStrategy::random_walk();
        body.movable_by_user = true;
        self.transition(AttachmentState::UnattachedAndAvailable);
    }

    fn enter_moving_towards_attachment(&mut self, body: &mut AgentBody, site: SiteId) {
        body.motion = MotionStrategy::meander_to_site(site, self.destination_offset);
        body.movable_by_user = self.role.draggable_while_approaching();
        self.transition(AttachmentState::MovingTowardsAttachment);
    }

    fn enter_attached<H: AttachmentHost>(
        &mut self,
        body:    &mut AgentBody,
        host:    &mut H,
        site_id: SiteId,
    ) -> AttachmentResult<()> {
        let agent = self.agent;
        let offset = self.destination_offset;
        body.movable_by_user = self.role.draggable_while_attached();

        match &mut self.role {
            Role::TranscriptionFactor => {
                body.motion = MotionStrategy::FollowAttachmentSite { site: site_id, offset };
            }
            Role::RnaPolymerase(work) => {
                if let Some(site) = host.sites().get(site_id) {
                    body.place_within_bounds(site.position() - offset);
                }
                body.motion = MotionStrategy::Stillness;
                *work = PolymeraseWork::Conforming { elapsed_secs: 0.0 };
            }
            Role::Ribosome(translation) => {
                let started = host.begin_translation(agent, site_id)?;
                if let Some(point) = host.ribosome_attachment_location(started.mrna, agent) {
                    body.place_within_bounds(point - offset);
                }
                body.motion = MotionStrategy::RibosomeTranslatingRna {
                    mrna: started.mrna,
                    ribosome: agent,
                    offset,
                };
                *translation = Some(started);
            }
            Role::MessengerRnaDestroyer(destruction) => {
                let started = host.begin_destruction(agent, site_id)?;
                if let Some(point) = host.destroyer_attachment_location(started.mrna) {
                    body.place_within_bounds(point - offset);
                }
                body.motion = MotionStrategy::DestroyerTrackingRna { mrna: started.mrna, offset };
                *destruction = Some(started);
            }
        }
        self.transition(AttachmentState::Attached);
        Ok(())
    }

    fn enter_unattached_but_unavailable(&mut self, body: &mut AgentBody) {
        self.attachment_site = None;
        body.motion = MotionStrategy::random_walk();
        body.movable_by_user = true;
        self.transition(AttachmentState::UnattachedButUnavailable { elapsed_secs: 0.0 });
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn held_site(&self) -> AttachmentResult<SiteId> {
        self.attachment_site.ok_or(AttachmentError::NoAttachmentSite {
            agent: self.agent,
            state: self.state.name(),
        })
    }

    /// Release the held site if this agent still holds it.
    fn release_site<H: AttachmentHost>(&mut self, host: &mut H, events: &mut Vec<AttachmentEvent>) {
        let Some(site_id) = self.attachment_site.take() else {
            return;
        };
        let released = host
            .sites_mut()
            .get_mut(site_id)
            .is_some_and(|site| site.release_if_held_by(self.agent));
        if released {
            debug!(agent = %self.agent, site = %site_id, "site released");
            events.push(AttachmentEvent::Detached { agent: self.agent, site: site_id });
        }
    }
}
