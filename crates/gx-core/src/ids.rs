//! Strongly typed, zero-cost identifier wrappers.
//!
//! Every entity in the simulation lives in an arena keyed by one of these IDs;
//! relations between entities (site occupant, attached site, owning strand)
//! are stored as IDs rather than references.  All IDs are
//! `Copy + Ord + Hash` so they work as map keys and give a stable iteration
//! order in `BTreeMap`s.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The ID following `self`; used by arenas to allocate fresh IDs.
            #[inline]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for u64 {
            #[inline(always)]
            fn from(id: $name) -> u64 {
                id.0 as u64
            }
        }
    };
}

typed_id! {
    /// A mobile biomolecule (polymerase, ribosome, transcription factor, destroyer).
    pub struct BiomoleculeId(u32);
}

typed_id! {
    /// An attachment site on a gene or an mRNA strand.
    pub struct SiteId(u32);
}

typed_id! {
    /// A gene on the DNA strand.  Genes are few, so `u16` is plenty.
    pub struct GeneId(u16);
}

typed_id! {
    /// A messenger RNA strand.
    pub struct MessengerRnaId(u32);
}

typed_id! {
    /// A protein, growing or complete.
    pub struct ProteinId(u32);
}
