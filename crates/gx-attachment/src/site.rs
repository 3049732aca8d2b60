//! Attachment sites and the arena that owns them.

use rustc_hash::FxHashMap;

use gx_core::{
    AgentRng, BiomoleculeId, BiomoleculeKind, GeneId, MessengerRnaId, SiteId,
    TranscriptionFactorKind, Vector2,
};

// ── Kinds and owners ──────────────────────────────────────────────────────────

/// Which mobile biomolecules a site will consider.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SiteKind {
    /// Binds only factors of exactly this family and polarity.
    TranscriptionFactor(TranscriptionFactorKind),
    /// A gene's promoter.
    Polymerase,
    /// The leading end of an mRNA, for ribosomes.
    Ribosome,
    /// The leading end of an mRNA, for destroyers.
    Destroyer,
}

impl SiteKind {
    pub fn accepts(self, kind: BiomoleculeKind) -> bool {
        match (self, kind) {
            (SiteKind::TranscriptionFactor(s), BiomoleculeKind::TranscriptionFactor(k)) => s == k,
            (SiteKind::Polymerase, BiomoleculeKind::RnaPolymerase)        => true,
            (SiteKind::Ribosome, BiomoleculeKind::Ribosome)               => true,
            (SiteKind::Destroyer, BiomoleculeKind::MessengerRnaDestroyer) => true,
            _ => false,
        }
    }
}

/// The structure a site belongs to.  Sites are removed with their owner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SiteOwner {
    Gene(GeneId),
    MessengerRna(MessengerRnaId),
}

/// Who, if anyone, holds a site.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Occupancy {
    #[default]
    Free,
    /// An agent won the proposal and is approaching.
    Reserved(BiomoleculeId),
    /// An agent has arrived and is attached.
    Occupied(BiomoleculeId),
}

impl Occupancy {
    /// The reserving or occupying agent.
    pub fn holder(self) -> Option<BiomoleculeId> {
        match self {
            Occupancy::Free => None,
            Occupancy::Reserved(a) | Occupancy::Occupied(a) => Some(a),
        }
    }
}

// ── AttachmentSite ────────────────────────────────────────────────────────────

/// A point on DNA or mRNA that one mobile biomolecule at a time can bind.
#[derive(Clone, Debug, PartialEq)]
pub struct AttachmentSite {
    id:        SiteId,
    kind:      SiteKind,
    owner:     SiteOwner,
    position:  Vector2,
    affinity:  f64,
    occupancy: Occupancy,
}

impl AttachmentSite {
    pub fn new(id: SiteId, kind: SiteKind, owner: SiteOwner, position: Vector2, affinity: f64) -> Self {
        Self {
            id,
            kind,
            owner,
            position,
            affinity: affinity.clamp(0.0, 1.0),
            occupancy: Occupancy::Free,
        }
    }

    #[inline] pub fn id(&self) -> SiteId { self.id }
    #[inline] pub fn kind(&self) -> SiteKind { self.kind }
    #[inline] pub fn owner(&self) -> SiteOwner { self.owner }
    #[inline] pub fn position(&self) -> Vector2 { self.position }
    #[inline] pub fn affinity(&self) -> f64 { self.affinity }
    #[inline] pub fn occupancy(&self) -> Occupancy { self.occupancy }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.occupancy == Occupancy::Free
    }

    /// The reserving or occupying agent, if any.
    #[inline]
    pub fn holder(&self) -> Option<BiomoleculeId> {
        self.occupancy.holder()
    }

    /// Offer the site to `candidate`.
    ///
    /// A free site accepts with probability equal to its affinity, drawn from
    /// the proposer's stream, and becomes `Reserved(candidate)`.  A site that
    /// is reserved or occupied always refuses; there is no queue.
    pub fn propose(&mut self, candidate: BiomoleculeId, rng: &mut AgentRng) -> bool {
        if !self.is_free() {
            return false;
        }
        if !rng.gen_bool(self.affinity) {
            return false;
        }
        self.occupancy = Occupancy::Reserved(candidate);
        true
    }

    /// Turn `agent`'s reservation into occupancy.  Returns `false` if the
    /// site is not reserved for (or already occupied by) `agent`.
    pub fn confirm_attachment(&mut self, agent: BiomoleculeId) -> bool {
        match self.occupancy {
            Occupancy::Reserved(a) if a == agent => {
                self.occupancy = Occupancy::Occupied(agent);
                true
            }
            Occupancy::Occupied(a) => a == agent,
            _ => false,
        }
    }

    /// Clear occupancy, returning the former holder.
    pub fn release(&mut self) -> Option<BiomoleculeId> {
        std::mem::take(&mut self.occupancy).holder()
    }

    /// Release only if `agent` is the holder.
    pub fn release_if_held_by(&mut self, agent: BiomoleculeId) -> bool {
        if self.holder() == Some(agent) {
            self.occupancy = Occupancy::Free;
            true
        } else {
            false
        }
    }

    /// Move the site with its owning structure.
    #[inline]
    pub fn update_position(&mut self, position: Vector2) {
        self.position = position;
    }

    pub fn set_affinity(&mut self, affinity: f64) {
        self.affinity = affinity.clamp(0.0, 1.0);
    }
}

// ── SiteStore ─────────────────────────────────────────────────────────────────

/// Arena of every attachment site in the model, keyed by `SiteId`.
#[derive(Clone, Debug)]
pub struct SiteStore {
    sites:   FxHashMap<SiteId, AttachmentSite>,
    next_id: SiteId,
}

impl SiteStore {
    pub fn new() -> Self {
        Self { sites: FxHashMap::default(), next_id: SiteId(0) }
    }

    /// Create a free site and return its freshly allocated id.
    pub fn insert(
        &mut self,
        kind:     SiteKind,
        owner:    SiteOwner,
        position: Vector2,
        affinity: f64,
    ) -> SiteId {
        let id = self.next_id;
        self.next_id = id.next();
        self.sites.insert(id, AttachmentSite::new(id, kind, owner, position, affinity));
        id
    }

    #[inline]
    pub fn get(&self, id: SiteId) -> Option<&AttachmentSite> {
        self.sites.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: SiteId) -> Option<&mut AttachmentSite> {
        self.sites.get_mut(&id)
    }

    pub fn remove(&mut self, id: SiteId) -> Option<AttachmentSite> {
        self.sites.remove(&id)
    }

    /// Remove every site belonging to `owner`, returned in ascending id order.
    pub fn remove_owned_by(&mut self, owner: SiteOwner) -> Vec<AttachmentSite> {
        let ids = self.ids_owned_by(owner);
        ids.into_iter().filter_map(|id| self.sites.remove(&id)).collect()
    }

    /// Ids of `owner`'s sites in ascending order.
    pub fn ids_owned_by(&self, owner: SiteOwner) -> Vec<SiteId> {
        let mut ids: Vec<SiteId> = self
            .sites
            .values()
            .filter(|s| s.owner == owner)
            .map(|s| s.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttachmentSite> {
        self.sites.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn clear(&mut self) {
        self.sites.clear();
        self.next_id = SiteId(0);
    }

    /// Propose `candidate` to every eligible free site within `radius` of
    /// `position`, best first, until one accepts.
    ///
    /// Candidates are ordered by affinity (highest first), then distance
    /// (nearest first), then id, so the visiting order never depends on map
    /// iteration order.  `eligible` lets the owner of the sites exclude ones
    /// whose structure is not currently bindable.
    pub fn propose_best(
        &mut self,
        candidate: BiomoleculeId,
        kind:      BiomoleculeKind,
        position:  Vector2,
        radius:    f64,
        eligible:  impl Fn(&AttachmentSite) -> bool,
        rng:       &mut AgentRng,
    ) -> Option<SiteId> {
        let mut ranked: Vec<(f64, f64, SiteId)> = self
            .sites
            .values()
            .filter(|s| s.is_free() && s.kind.accepts(kind) && eligible(s))
            .map(|s| (s.affinity, s.position.distance(position), s.id))
            .filter(|&(_, d, _)| d <= radius)
            .collect();
        ranked.sort_by(|a, b| {
            b.0.total_cmp(&a.0)
                .then(a.1.total_cmp(&b.1))
                .then(a.2.cmp(&b.2))
        });
        ranked.into_iter().map(|(_, _, id)| id).find(|&id| {
            self.sites
                .get_mut(&id)
                .is_some_and(|site| site.propose(candidate, rng))
        })
    }
}

impl Default for SiteStore {
    fn default() -> Self {
        Self::new()
    }
}
