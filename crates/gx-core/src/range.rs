//! Closed numeric interval used for tunable speed and timing bands.

use crate::AgentRng;

/// A closed interval `[min, max]` of `f64`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Build a range; the bounds are swapped if given in reverse order.
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max { Self { min, max } } else { Self { min: max, max: min } }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// Uniform sample from the range.  A degenerate range returns `min`.
    pub fn sample(&self, rng: &mut AgentRng) -> f64 {
        if self.length() <= 0.0 {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}
