//! Simulation observer trait for progress reporting and data collection.

use std::collections::BTreeMap;

use gx_attachment::{AttachmentEvent, MobileBiomolecule};
use gx_core::{BiomoleculeId, Tick};
use gx_molecule::CellWorld;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// step loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: mRNA counter
///
/// ```rust,ignore
/// struct MrnaCounter(usize);
///
/// impl SimObserver for MrnaCounter {
///     fn on_event(&mut self, _tick: Tick, event: &AttachmentEvent) {
///         if matches!(event, AttachmentEvent::MessengerRnaCompleted { .. }) {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each step, before any agent moves.
    fn on_step_start(&mut self, _tick: Tick) {}

    /// Called once per event, in the order the agents produced them.
    fn on_event(&mut self, _tick: Tick, _event: &AttachmentEvent) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_steps`
    /// steps) with read-only access to the whole model.
    fn on_snapshot(
        &mut self,
        _tick:   Tick,
        _world:  &CellWorld,
        _agents: &BTreeMap<BiomoleculeId, MobileBiomolecule>,
    ) {}

    /// Called once after the final step completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Records every event with the tick it happened on.
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<(Tick, AttachmentEvent)>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded events matching `pred`.
    pub fn count(&self, pred: impl Fn(&AttachmentEvent) -> bool) -> usize {
        self.events.iter().filter(|(_, e)| pred(e)).count()
    }

    /// Events concerning `agent`, in order.
    pub fn for_agent(&self, agent: BiomoleculeId) -> impl Iterator<Item = &AttachmentEvent> {
        self.events.iter().map(|(_, e)| e).filter(move |e| e.agent() == agent)
    }
}

impl SimObserver for EventLog {
    fn on_event(&mut self, tick: Tick, event: &AttachmentEvent) {
        self.events.push((tick, event.clone()));
    }
}
