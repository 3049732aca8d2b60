//! Messenger RNA strands.
//!
//! A strand's intrinsic state decides how it moves; the agents working on
//! it (polymerase, ribosome, destroyer) drive every state change through
//! the world.
//!
//! | State                      | Motion      | Sites bindable |
//! |----------------------------|-------------|----------------|
//! | `BeingSynthesized`         | Stillness   | no             |
//! | `WanderingAroundCytoplasm` | RandomWalk  | yes            |
//! | `BeingTranslated`          | Stillness   | no             |
//! | `BeingDestroyed`           | Stillness   | no             |

use gx_core::{AgentRng, BiomoleculeId, GeneId, MessengerRnaId, Rect, SiteId, Vector2};
use gx_motion::{EmptyEnvironment, MotionBounds, MotionStrategy};

/// Distance between adjacent base pairs along an mRNA strand.
pub const MRNA_BASE_PAIR_SPACING: f64 = 40.0;

/// Half the thickness of a strand's bounding shape.
pub const MRNA_HALF_THICKNESS: f64 = 75.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MrnaState {
    BeingSynthesized { polymerase: BiomoleculeId },
    WanderingAroundCytoplasm,
    BeingTranslated { ribosome: BiomoleculeId, progress_bp: f64 },
    BeingDestroyed { destroyer: BiomoleculeId, consumed_bp: f64 },
}

impl MrnaState {
    pub fn name(&self) -> &'static str {
        match self {
            MrnaState::BeingSynthesized { .. }   => "being synthesized",
            MrnaState::WanderingAroundCytoplasm  => "wandering around cytoplasm",
            MrnaState::BeingTranslated { .. }    => "being translated",
            MrnaState::BeingDestroyed { .. }     => "being destroyed",
        }
    }
}

/// A strand laid out along +x from its leading end at `position`.
pub struct MessengerRna {
    id:             MessengerRnaId,
    gene:           GeneId,
    position:       Vector2,
    length_bp:      usize,
    state:          MrnaState,
    motion:         MotionStrategy,
    bounds:         MotionBounds,
    rng:            AgentRng,
    ribosome_site:  SiteId,
    destroyer_site: SiteId,
}

impl MessengerRna {
    /// An empty strand just started by `polymerase`.
    pub fn new_synthesized(
        id:             MessengerRnaId,
        gene:           GeneId,
        position:       Vector2,
        polymerase:     BiomoleculeId,
        ribosome_site:  SiteId,
        destroyer_site: SiteId,
        rng:            AgentRng,
    ) -> Self {
        Self {
            id,
            gene,
            position,
            length_bp: 0,
            state: MrnaState::BeingSynthesized { polymerase },
            motion: MotionStrategy::Stillness,
            bounds: MotionBounds::unbounded(),
            rng,
            ribosome_site,
            destroyer_site,
        }
    }

    #[inline] pub fn id(&self) -> MessengerRnaId { self.id }
    #[inline] pub fn gene(&self) -> GeneId { self.gene }
    #[inline] pub fn position(&self) -> Vector2 { self.position }
    #[inline] pub fn length_bp(&self) -> usize { self.length_bp }
    #[inline] pub fn state(&self) -> MrnaState { self.state }
    #[inline] pub fn motion(&self) -> &MotionStrategy { &self.motion }
    #[inline] pub fn ribosome_site(&self) -> SiteId { self.ribosome_site }
    #[inline] pub fn destroyer_site(&self) -> SiteId { self.destroyer_site }

    #[inline]
    pub fn site_ids(&self) -> [SiteId; 2] {
        [self.ribosome_site, self.destroyer_site]
    }

    #[inline]
    pub fn is_wandering(&self) -> bool {
        self.state == MrnaState::WanderingAroundCytoplasm
    }

    /// Position of (possibly fractional) base pair `bp` counted from the
    /// leading end.
    #[inline]
    pub fn point_at(&self, bp: f64) -> Vector2 {
        self.position + Vector2::new(bp * MRNA_BASE_PAIR_SPACING, 0.0)
    }

    /// Base pairs a destroyer has already consumed.
    pub fn consumed_bp(&self) -> f64 {
        match self.state {
            MrnaState::BeingDestroyed { consumed_bp, .. } => consumed_bp,
            _ => 0.0,
        }
    }

    /// Base pairs still present.
    pub fn remaining_bp(&self) -> usize {
        self.length_bp.saturating_sub(self.consumed_bp().floor() as usize)
    }

    /// Where the intact part of the strand begins; the binding sites sit here.
    #[inline]
    pub fn leading_end(&self) -> Vector2 {
        self.point_at(self.consumed_bp())
    }

    /// Bounding shape relative to the leading end.
    pub fn shape(&self) -> Rect {
        let length = (self.length_bp.max(1) as f64) * MRNA_BASE_PAIR_SPACING;
        Rect::new(
            Vector2::new(0.0, -MRNA_HALF_THICKNESS),
            Vector2::new(length, MRNA_HALF_THICKNESS),
        )
    }

    // ── State changes driven by the world ─────────────────────────────────

    pub(crate) fn set_length(&mut self, length_bp: usize) {
        self.length_bp = length_bp;
    }

    pub(crate) fn release_into_cytoplasm(&mut self, bounds: MotionBounds) {
        self.bounds = bounds;
        self.position = bounds.clamp(self.position, &self.shape());
        self.wander();
    }

    pub(crate) fn wander(&mut self) {
        self.state = MrnaState::WanderingAroundCytoplasm;
        self.motion = MotionStrategy::random_walk();
    }

    pub(crate) fn begin_translation(&mut self, ribosome: BiomoleculeId) {
        self.state = MrnaState::BeingTranslated { ribosome, progress_bp: 0.0 };
        self.motion = MotionStrategy::Stillness;
    }

    pub(crate) fn set_translation_progress(&mut self, bp: f64) {
        if let MrnaState::BeingTranslated { progress_bp, .. } = &mut self.state {
            *progress_bp = bp;
        }
    }

    pub(crate) fn begin_destruction(&mut self, destroyer: BiomoleculeId) {
        self.state = MrnaState::BeingDestroyed { destroyer, consumed_bp: 0.0 };
        self.motion = MotionStrategy::Stillness;
    }

    pub(crate) fn set_consumed(&mut self, bp: f64) {
        if let MrnaState::BeingDestroyed { consumed_bp, .. } = &mut self.state {
            *consumed_bp = bp.min(self.length_bp as f64);
        }
    }

    /// Point a translating `ribosome` has reached, if it is the one reading
    /// this strand.
    pub fn translation_point(&self, ribosome: BiomoleculeId) -> Option<Vector2> {
        match self.state {
            MrnaState::BeingTranslated { ribosome: r, progress_bp } if r == ribosome => {
                Some(self.point_at(progress_bp))
            }
            _ => None,
        }
    }

    /// Point a destroyer is consuming, while the strand is being destroyed.
    pub fn destruction_point(&self) -> Option<Vector2> {
        match self.state {
            MrnaState::BeingDestroyed { consumed_bp, .. } => Some(self.point_at(consumed_bp)),
            _ => None,
        }
    }

    /// Move for `dt` seconds according to the current state.
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
