//! Simulation time model.
//!
//! # Design
//!
//! The simulation advances in frames.  Each frame has an integer `Tick`
//! counter and a duration `dt` in simulated seconds; the driver usually uses
//! a fixed `dt` (`SimConfig::step_secs`) but `SimClock::advance` accepts any
//! positive value so a caller driving the model from an animation loop can
//! pass the real frame delta.
//!
//! There is no wall-clock timer anywhere in the simulation: every time-bounded
//! wait (the unattached-but-unavailable cooldown, the polymerase
//! conformational change) accumulates the `dt` values it is handed.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A monotonically increasing frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Frame counter plus accumulated simulated time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current frame.
    pub current_tick: Tick,
    /// Simulated seconds elapsed since tick 0.
    pub elapsed_secs: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self { current_tick: Tick::ZERO, elapsed_secs: 0.0 }
    }

    /// Advance by one frame of `dt` simulated seconds.
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        self.current_tick = self.current_tick + 1;
        self.elapsed_secs += dt;
    }

    /// Back to tick 0 (simulation reset).
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2} s)", self.current_tick, self.elapsed_secs)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically built in code or loaded from JSON by the application crate
/// (enable the `serde` feature) and passed to the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulated seconds per frame.  Must be positive.
    pub step_secs: f64,

    /// Frames to simulate in a batch run (`Sim::run`).
    pub total_steps: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// How long an agent stays unattached-but-unavailable after detaching.
    pub cooldown_secs: f64,

    /// Notify observers with a snapshot every N frames.  0 disables snapshots.
    pub snapshot_interval_steps: u64,
}

impl SimConfig {
    /// The tick at which a batch run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_steps)
    }

    /// Simulated duration of a full batch run.
    #[inline]
    pub fn total_secs(&self) -> f64 {
        self.total_steps as f64 * self.step_secs
    }

    /// Construct a `SimClock` for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new()
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            step_secs:               1.0 / 60.0,
            total_steps:             60 * 60,
            seed:                    42,
            cooldown_secs:           3.0,
            snapshot_interval_steps: 60,
        }
    }
}
