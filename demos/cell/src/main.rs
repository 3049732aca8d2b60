//! cell: headless run of the rust_gx gene expression model.
//!
//! Places two regulated genes on a DNA strand, scatters polymerases,
//! transcription factors, ribosomes, and mRNA destroyers around it, and runs
//! for `total_steps` frames.  Pass a JSON `SimConfig` path as the first
//! argument to override the defaults; set `RUST_LOG=debug` to watch every
//! attachment transition.

use std::collections::BTreeMap;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gx_attachment::{AttachmentEvent, MobileBiomolecule};
use gx_core::{BiomoleculeId, BiomoleculeKind, Rect, SimConfig, Tick, TranscriptionFactorKind, Vector2};
use gx_molecule::{CellWorld, DnaMolecule, GeneConfig};
use gx_sim::{SimBuilder, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const DNA_LENGTH_BP:   usize = 600;
const SIM_MINUTES:     u64   = 2;
const SNAPSHOT_SECS:   u64   = 10;
const POLYMERASES:     usize = 4;
const FACTORS_PER_TF:  usize = 3;
const RIBOSOMES:       usize = 3;
const DESTROYERS:      usize = 2;

const ACTIVATOR: TranscriptionFactorKind = TranscriptionFactorKind::positive(1);
const REPRESSOR: TranscriptionFactorKind = TranscriptionFactorKind::negative(2);

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Tally {
    mrnas:     usize,
    proteins:  usize,
    destroyed: usize,
    attaches:  usize,
}

impl SimObserver for Tally {
    fn on_event(&mut self, _tick: Tick, event: &AttachmentEvent) {
        match event {
            AttachmentEvent::MessengerRnaCompleted { .. } => self.mrnas += 1,
            AttachmentEvent::ProteinCompleted { .. }      => self.proteins += 1,
            AttachmentEvent::MessengerRnaDestroyed { .. } => self.destroyed += 1,
            AttachmentEvent::Attached { .. }              => self.attaches += 1,
            _ => {}
        }
    }

    fn on_snapshot(
        &mut self,
        tick:   Tick,
        world:  &CellWorld,
        agents: &BTreeMap<BiomoleculeId, MobileBiomolecule>,
    ) {
        let attached = agents.values().filter(|a| a.machine.state().is_attached()).count();
        info!(
            %tick,
            attached,
            mrnas = world.messenger_rnas().count(),
            proteins = world.proteins().count(),
            "snapshot"
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str::<SimConfig>(&text).with_context(|| format!("parsing {path}"))?
        }
        None => {
            let defaults = SimConfig::default();
            SimConfig {
                total_steps:             (SIM_MINUTES as f64 * 60.0 / defaults.step_secs).round() as u64,
                snapshot_interval_steps: (SNAPSHOT_SECS as f64 / defaults.step_secs).round() as u64,
                ..defaults
            }
        }
    };

    println!("=== cell: rust_gx gene expression ===");
    println!(
        "Steps: {}  |  {:.1} s simulated  |  Seed: {}",
        config.total_steps,
        config.total_secs(),
        config.seed
    );
    println!();

    // The strand runs along y = 0; agents and products share one region.
    let bounds = Rect::new(Vector2::new(-2_000.0, -4_000.0), Vector2::new(42_000.0, 4_000.0));
    let dna = DnaMolecule::new(Vector2::ZERO, DNA_LENGTH_BP);

    let mut sim = SimBuilder::new(config.clone(), dna, bounds)
        .gene(
            GeneConfig::new(40, 40, 120)
                .with_polymerase_affinity(0.1)
                .with_tf_site(ACTIVATOR, 10, 0.8),
        )
        .gene(
            GeneConfig::new(320, 40, 160)
                .with_polymerase_affinity(0.6)
                .with_tf_site(REPRESSOR, 20, 0.5),
        )
        .scattered(BiomoleculeKind::RnaPolymerase, POLYMERASES)
        .scattered(BiomoleculeKind::TranscriptionFactor(ACTIVATOR), FACTORS_PER_TF)
        .scattered(BiomoleculeKind::TranscriptionFactor(REPRESSOR), FACTORS_PER_TF)
        .scattered(BiomoleculeKind::Ribosome, RIBOSOMES)
        .scattered(BiomoleculeKind::MessengerRnaDestroyer, DESTROYERS)
        .build()?;

    let mut tally = Tally::default();
    let t0 = Instant::now();
    sim.run(&mut tally)?;
    let elapsed = t0.elapsed();

    // ── Summary ───────────────────────────────────────────────────────────
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  attachments     : {}", tally.attaches);
    println!("  mRNAs completed : {}", tally.mrnas);
    println!("  proteins made   : {}", tally.proteins);
    println!("  mRNAs destroyed : {}", tally.destroyed);
    println!("  mRNAs remaining : {}", sim.world.messenger_rnas().count());
    println!();

    println!("{:<8} {:<10}", "Gene", "Proteins");
    println!("{}", "-".repeat(18));
    for gene in sim.world.dna().genes() {
        println!("{:<8} {:<10}", gene.id().0, sim.world.protein_count(gene.id()));
    }
    println!();

    println!("{:<8} {:<26} {:<30}", "Agent", "Kind", "State");
    println!("{}", "-".repeat(64));
    for agent in sim.biomolecules() {
        println!(
            "{:<8} {:<26} {:<30}",
            agent.id().0,
            agent.kind().to_string(),
            agent.machine.state().to_string(),
        );
    }

    Ok(())
}
