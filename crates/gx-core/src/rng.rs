//! Deterministic per-entity and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Every mobile biomolecule (and every mRNA / protein that moves on its own)
//! gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (stream_key * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive keys uniformly across the seed space.  This
//! means:
//!
//! - Entities never share RNG state, so the order in which the driver steps
//!   them cannot change any entity's random draws.
//! - Adding entities does not disturb the seeds of existing ones.
//! - A site's acceptance draw comes from the *proposing* agent's stream.
//!
//! Different entity families use disjoint stream keys (see the
//! `*_STREAM` constants) so biomolecule 3 and mRNA 3 never collide.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::BiomoleculeId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Stream-key offset for messenger RNA strands.
pub const MESSENGER_RNA_STREAM: u64 = 1 << 40;

/// Stream-key offset for proteins.
pub const PROTEIN_STREAM: u64 = 2 << 40;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-entity deterministic RNG.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and a biomolecule ID.
    pub fn new(global_seed: u64, agent: BiomoleculeId) -> Self {
        Self::for_stream(global_seed, agent.into())
    }

    /// Seed from an arbitrary stream key (see the `*_STREAM` offsets).
    pub fn for_stream(global_seed: u64, key: u64) -> Self {
        let seed = global_seed ^ key.wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform angle in `[0, 2π)`.
    #[inline]
    pub fn angle(&mut self) -> f64 {
        self.0.gen_range(0.0..std::f64::consts::TAU)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (initial placement of agents,
/// builder-time randomisation).
///
/// Never consulted inside a tick, so it cannot introduce ordering effects.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
