//! Proteins produced by translation.

use gx_core::{AgentRng, BiomoleculeId, GeneId, MessengerRnaId, ProteinId, Rect, Vector2};
use gx_motion::{EmptyEnvironment, MotionBounds, MotionStrategy};

/// Size `(width, height)` of a fully grown protein, in picometres.
pub const PROTEIN_FULL_SIZE: (f64, f64) = (400.0, 300.0);

/// Smallest drawn fraction of the full size, so a new protein is never a point.
const MIN_SIZE_PROPORTION: f64 = 0.1;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ProteinState {
    /// Attached to the ribosome building it.
    Growing { ribosome: BiomoleculeId, mrna: MessengerRnaId },
    /// Complete and drifting in the cytoplasm.
    Released,
}

pub struct Protein {
    id:              ProteinId,
    gene:            GeneId,
    position:        Vector2,
    size_proportion: f64,
    state:           ProteinState,
    motion:          MotionStrategy,
    bounds:          MotionBounds,
    rng:             AgentRng,
}

impl Protein {
    pub(crate) fn new_growing(
        id:       ProteinId,
        gene:     GeneId,
        ribosome: BiomoleculeId,
        mrna:     MessengerRnaId,
        position: Vector2,
        rng:      AgentRng,
    ) -> Self {
        Self {
            id,
            gene,
            position,
            size_proportion: 0.0,
            state: ProteinState::Growing { ribosome, mrna },
            motion: MotionStrategy::Stillness,
            bounds: MotionBounds::unbounded(),
            rng,
        }
    }

    #[inline] pub fn id(&self) -> ProteinId { self.id }
    #[inline] pub fn gene(&self) -> GeneId { self.gene }
    #[inline] pub fn position(&self) -> Vector2 { self.position }
    #[inline] pub fn size_proportion(&self) -> f64 { self.size_proportion }
    #[inline] pub fn state(&self) -> ProteinState { self.state }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.state == ProteinState::Released
    }

    /// Bounding shape at the current size, centred on the position.
    pub fn shape(&self) -> Rect {
        let scale = self.size_proportion.max(MIN_SIZE_PROPORTION);
        Rect::centered(Vector2::ZERO, PROTEIN_FULL_SIZE.0 * scale, PROTEIN_FULL_SIZE.1 * scale)
    }

    pub(crate) fn grow(&mut self, proportion: f64, position: Vector2) {
        self.size_proportion = proportion.clamp(0.0, 1.0);
        self.position = position;
    }

    pub(crate) fn release(&mut self, bounds: MotionBounds) {
        self.size_proportion = 1.0;
        self.state = ProteinState::Released;
        self.bounds = bounds;
        self.position = bounds.clamp(self.position, &self.shape());
        self.motion = MotionStrategy::random_walk();
    }

    pub fn step(&mut self, dt: f64) {
        let shape = self.shape();
        self.position = self.motion.next_location(
            self.position,
            &shape,
            &self.bounds,
            &EmptyEnvironment,
            dt,
            &mut self.rng,
        );
    }
}
