//! The `Sim` struct and its step loop.

use std::collections::BTreeMap;

use tracing::{debug, info};

use gx_attachment::{AttachmentEvent, MobileBiomolecule, SiteOwner};
use gx_core::{
    BiomoleculeId, BiomoleculeKind, GxError, MessengerRnaId, SimClock, SimConfig, SimRng, Vector2,
};
use gx_molecule::{CellWorld, MrnaState};
use gx_motion::MotionBounds;

use crate::{SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Holds the cell world and every mobile biomolecule, and advances them in
/// fixed steps of `config.step_secs`:
///
/// 1. **Advance**: each biomolecule runs its state machine and moves.  This
///    only touches what the agent already holds, so any visiting order
///    gives the same result.
/// 2. **Settle**: in ascending `BiomoleculeId` order, whatever the advance
///    order was, agents propose to sites, attach on arrival, and start new
///    strands.  Contention is always won by the lowest id, and a strand
///    released during the advance is offered to every agent alike.
/// 3. **World**: gene affinities are recomputed from attached factors, and
///    mRNA strands and released proteins move.
///
/// Every agent draws from its own RNG stream, so together with the fixed
/// settle order the outcome does not depend on the advance order.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (step length, seed, cooldown, …).
    pub config: SimConfig,

    /// Frame counter and simulated time.
    pub clock: SimClock,

    /// DNA, genes, sites, mRNA strands, and proteins.
    pub world: CellWorld,

    agents: BTreeMap<BiomoleculeId, MobileBiomolecule>,

    /// Where each agent was first placed; `reset` puts them back here.
    placements: BTreeMap<BiomoleculeId, (BiomoleculeKind, Vector2)>,

    next_agent: BiomoleculeId,

    /// Region every mobile biomolecule stays inside.
    bounds: MotionBounds,

    /// Placement randomisation only; never consulted inside a step.
    rng: SimRng,
}

impl Sim {
    pub(crate) fn new(config: SimConfig, world: CellWorld, bounds: MotionBounds) -> Self {
        Self {
            clock:      config.make_clock(),
            rng:        SimRng::new(config.seed),
            config,
            world,
            agents:     BTreeMap::new(),
            placements: BTreeMap::new(),
            next_agent: BiomoleculeId(0),
            bounds,
        }
    }

    // ── Agents ────────────────────────────────────────────────────────────

    /// Add a biomolecule at `position` (clamped into the bounds).
    pub fn add_biomolecule(&mut self, kind: BiomoleculeKind, position: Vector2) -> BiomoleculeId {
        let id = self.next_agent;
        self.next_agent = id.next();
        let agent = self.spawn(id, kind, position);
        self.agents.insert(id, agent);
        self.placements.insert(id, (kind, position));
        debug!(agent = %id, ?kind, "biomolecule added");
        id
    }

    /// Add `count` biomolecules at uniformly random positions in the bounds.
    pub fn scatter_biomolecules(&mut self, kind: BiomoleculeKind, count: usize) -> Vec<BiomoleculeId> {
        let region = self.bounds.region();
        (0..count)
            .map(|_| {
                let position = Vector2::new(
                    self.rng.gen_range(region.min.x..=region.max.x),
                    self.rng.gen_range(region.min.y..=region.max.y),
                );
                self.add_biomolecule(kind, position)
            })
            .collect()
    }

    /// Remove a biomolecule, releasing any site it holds and aborting its
    /// work.
    pub fn remove_biomolecule(&mut self, id: BiomoleculeId) -> SimResult<Vec<AttachmentEvent>> {
        let mut agent = self.agents.remove(&id).ok_or(GxError::BiomoleculeNotFound(id))?;
        let events = agent
            .machine
            .force_immediate_unattached_and_available(&mut agent.body, &mut self.world);
        self.placements.remove(&id);
        debug!(agent = %id, "biomolecule removed");
        Ok(events)
    }

    #[inline]
    pub fn biomolecule(&self, id: BiomoleculeId) -> Option<&MobileBiomolecule> {
        self.agents.get(&id)
    }

    /// Biomolecules in ascending id order.
    pub fn biomolecules(&self) -> impl Iterator<Item = &MobileBiomolecule> {
        self.agents.values()
    }

    #[inline]
    pub fn agents(&self) -> &BTreeMap<BiomoleculeId, MobileBiomolecule> {
        &self.agents
    }

    #[inline]
    pub fn bounds(&self) -> MotionBounds {
        self.bounds
    }

    // ── Strands ───────────────────────────────────────────────────────────

    /// Remove an mRNA strand.  Every agent working on it (approaching or
    /// attached to one of its sites, or still synthesizing it) is forced to
    /// `UnattachedAndAvailable` first.
    pub fn remove_messenger_rna(&mut self, id: MessengerRnaId) -> SimResult<Vec<AttachmentEvent>> {
        let mrna = self.world.messenger_rna(id).ok_or(GxError::MessengerRnaNotFound(id))?;
        let mut workers = self.world.site_holders(SiteOwner::MessengerRna(id));
        if let MrnaState::BeingSynthesized { polymerase } = mrna.state() {
            workers.push(polymerase);
        }

        let mut events = Vec::new();
        for worker in workers {
            if let Some(agent) = self.agents.get_mut(&worker) {
                events.extend(
                    agent
                        .machine
                        .force_immediate_unattached_and_available(&mut agent.body, &mut self.world),
                );
            }
        }
        // A forced destroyer or polymerase may already have discarded it.
        if self.world.messenger_rna(id).is_some() {
            self.world.remove_messenger_rna(id)?;
        }
        Ok(events)
    }

    // ── User interaction ──────────────────────────────────────────────────

    /// Pick up an agent.  Returns `None` if the agent may not be moved by
    /// the user in its current state.
    pub fn grab(&mut self, id: BiomoleculeId) -> SimResult<Option<Vec<AttachmentEvent>>> {
        let agent = self.agents.get_mut(&id).ok_or(GxError::BiomoleculeNotFound(id))?;
        let events = agent.grab(&mut self.world);
        if events.is_some() {
            debug!(agent = %id, "grabbed");
        }
        Ok(events)
    }

    pub fn drag_to(&mut self, id: BiomoleculeId, position: Vector2) -> SimResult<()> {
        self.agents
            .get_mut(&id)
            .ok_or(GxError::BiomoleculeNotFound(id))?
            .drag_to(position);
        Ok(())
    }

    pub fn release_grab(&mut self, id: BiomoleculeId) -> SimResult<()> {
        self.agents
            .get_mut(&id)
            .ok_or(GxError::BiomoleculeNotFound(id))?
            .release_grab();
        Ok(())
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance one frame, advancing agents in ascending id order.
    pub fn step(&mut self) -> SimResult<Vec<AttachmentEvent>> {
        let order: Vec<BiomoleculeId> = self.agents.keys().copied().collect();
        self.step_agents_in_order(&order)
    }

    /// Advance one frame, advancing agents in the given order.  The settle
    /// phase always runs in ascending id order.
    ///
    /// Agents missing from `order` do not move this frame.
    pub fn step_agents_in_order(&mut self, order: &[BiomoleculeId]) -> SimResult<Vec<AttachmentEvent>> {
        if let Some(&missing) = order.iter().find(|id| !self.agents.contains_key(id)) {
            return Err(GxError::BiomoleculeNotFound(missing).into());
        }

        let dt = self.config.step_secs;
        let mut events = Vec::new();

        // ── Phase 1: advance (caller's order) ─────────────────────────────
        for id in order {
            if let Some(agent) = self.agents.get_mut(id) {
                events.extend(agent.advance(&mut self.world, dt)?);
            }
        }

        // ── Phase 2: settle (ascending id) ────────────────────────────────
        for agent in self.agents.values_mut() {
            events.extend(agent.settle(&mut self.world)?);
        }

        // ── Phase 3: passive structures ───────────────────────────────────
        self.world.step(dt);
        self.clock.advance(dt);
        Ok(events)
    }

    /// Run from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every step.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step_observed(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(tick = %self.clock.current_tick, secs = self.clock.elapsed_secs, "run finished");
        Ok(())
    }

    /// Run exactly `n` steps from the current position (ignores `end_tick`).
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step_observed(observer)?;
        }
        Ok(())
    }

    fn step_observed<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_step_start(now);
        for event in self.step()? {
            observer.on_event(now, &event);
        }
        let interval = self.config.snapshot_interval_steps;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.world, &self.agents);
        }
        Ok(())
    }

    // ── Reset ─────────────────────────────────────────────────────────────

    /// Back to tick 0: strands and proteins are gone, genes are free, and
    /// every agent is rebuilt at its original placement.
    pub fn reset(&mut self) {
        self.world.reset();
        self.agents = self
            .placements
            .iter()
            .map(|(&id, &(kind, position))| (id, self.spawn(id, kind, position)))
            .collect();
        self.clock.reset();
        self.rng = SimRng::new(self.config.seed);
        info!(agents = self.agents.len(), "simulation reset");
    }

    fn spawn(&self, id: BiomoleculeId, kind: BiomoleculeKind, position: Vector2) -> MobileBiomolecule {
        MobileBiomolecule::new(id, kind, position, self.bounds, self.config.seed)
            .with_cooldown(self.config.cooldown_secs)
    }
}
