//! Fluent builder for constructing a [`Sim`].

use tracing::info;

use gx_core::{BiomoleculeKind, Rect, SimConfig, Vector2};
use gx_molecule::{CellWorld, DnaMolecule, GeneConfig};
use gx_motion::MotionBounds;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: step length, seed, cooldown, …
/// - [`DnaMolecule`]: the strand genes are placed on
/// - `bounds`: the region mobile biomolecules move in
///
/// # Optional inputs (have defaults)
///
/// | Method                    | Default                          |
/// |---------------------------|----------------------------------|
/// | `.cytoplasm(r)`           | Same region as `bounds`          |
/// | `.gene(g)`                | No genes                         |
/// | `.biomolecule(kind, pos)` | No agents                        |
/// | `.scattered(kind, n)`     | No agents                        |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, DnaMolecule::new(origin, 2_000), bounds)
///     .gene(GeneConfig::new(100, 30, 200).with_polymerase_affinity(0.3))
///     .scattered(BiomoleculeKind::RnaPolymerase, 4)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:    SimConfig,
    dna:       DnaMolecule,
    bounds:    Rect,
    cytoplasm: Option<Rect>,
    genes:     Vec<GeneConfig>,
    placed:    Vec<(BiomoleculeKind, Vector2)>,
    scattered: Vec<(BiomoleculeKind, usize)>,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, dna: DnaMolecule, bounds: Rect) -> Self {
        Self {
            config,
            dna,
            bounds,
            cytoplasm: None,
            genes:     Vec::new(),
            placed:    Vec::new(),
            scattered: Vec::new(),
        }
    }

    /// Region released mRNA strands and proteins drift in.
    pub fn cytoplasm(mut self, region: Rect) -> Self {
        self.cytoplasm = Some(region);
        self
    }

    /// Place a gene on the DNA.  Genes get ids in the order they are added.
    pub fn gene(mut self, gene: GeneConfig) -> Self {
        self.genes.push(gene);
        self
    }

    /// Add one biomolecule at a fixed position.
    pub fn biomolecule(mut self, kind: BiomoleculeKind, position: Vector2) -> Self {
        self.placed.push((kind, position));
        self
    }

    /// Add `count` biomolecules at seeded random positions.
    pub fn scattered(mut self, kind: BiomoleculeKind, count: usize) -> Self {
        self.scattered.push((kind, count));
        self
    }

    /// Validate inputs, place the genes, spawn the agents, and return a
    /// ready-to-run [`Sim`].
    ///
    /// Fixed placements get ids before scattered ones.
    pub fn build(self) -> SimResult<Sim> {
        // ── Validate ──────────────────────────────────────────────────────
        if !(self.config.step_secs.is_finite() && self.config.step_secs > 0.0) {
            return Err(SimError::Config(format!(
                "step_secs must be positive, got {}",
                self.config.step_secs
            )));
        }
        if !(self.config.cooldown_secs.is_finite() && self.config.cooldown_secs >= 0.0) {
            return Err(SimError::Config(format!(
                "cooldown_secs must be non-negative, got {}",
                self.config.cooldown_secs
            )));
        }
        let cytoplasm = self.cytoplasm.unwrap_or(self.bounds);
        check_region("bounds", &self.bounds)?;
        check_region("cytoplasm", &cytoplasm)?;
        if !self.bounds.contains_rect(&cytoplasm) {
            return Err(SimError::Config(
                "cytoplasm must lie inside bounds".into(),
            ));
        }

        // ── Assemble ──────────────────────────────────────────────────────
        let gene_count = self.genes.len();
        let mut world = CellWorld::new(self.config.seed, self.dna, MotionBounds::new(cytoplasm));
        for gene in &self.genes {
            world.add_gene(gene)?;
        }

        let mut sim = Sim::new(self.config, world, MotionBounds::new(self.bounds));
        for (kind, position) in self.placed {
            sim.add_biomolecule(kind, position);
        }
        for (kind, count) in self.scattered {
            sim.scatter_biomolecules(kind, count);
        }

        info!(genes = gene_count, agents = sim.agents().len(), "simulation built");
        Ok(sim)
    }
}

fn check_region(what: &str, region: &Rect) -> SimResult<()> {
    let finite = [region.min.x, region.min.y, region.max.x, region.max.y]
        .iter()
        .all(|v| v.is_finite());
    if finite && region.is_valid() {
        Ok(())
    } else {
        Err(SimError::Config(format!("{what} must be a finite region with positive area")))
    }
}
