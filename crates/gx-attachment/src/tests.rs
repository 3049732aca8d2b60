//! Unit tests for gx-attachment.

use gx_core::{
    AgentRng, BiomoleculeId, BiomoleculeKind, GeneId, MessengerRnaId, ProteinId, SiteId,
    TranscriptionFactorKind, Vector2,
};
use gx_motion::{MotionBounds, MotionEnvironment, MotionStrategy};

use crate::{
    AttachmentError, AttachmentEvent, AttachmentHost, AttachmentResult, AttachmentState,
    Candidate, Destruction, MobileBiomolecule, Occupancy, SiteKind, SiteOwner, SiteStore,
    Transcript, Translation,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const DT: f64 = 1.0 / 60.0;
const SEED: u64 = 7;
const GENE_LENGTH_BP: usize = 40;
const STRAND_LENGTH_BP: usize = 30;
const STRAND: MessengerRnaId = MessengerRnaId(0);

const TF: TranscriptionFactorKind = TranscriptionFactorKind::positive(1);

/// A world with one gene and one strand, recording what agents did to them.
#[derive(Default)]
struct MockHost {
    sites:              SiteStore,
    next_mrna:          u32,
    next_protein:       u32,
    strand_point:       Vector2,
    completed_mrnas:    Vec<(MessengerRnaId, usize)>,
    aborted_mrnas:      Vec<MessengerRnaId>,
    completed_proteins: Vec<ProteinId>,
    aborted_proteins:   Vec<ProteinId>,
    destroyed:          Vec<MessengerRnaId>,
    /// For each aborted translation, whether a strand site was still held.
    aborted_while_held: Vec<bool>,
}

impl MockHost {
    fn site(&mut self, kind: SiteKind, owner: SiteOwner, position: Vector2, affinity: f64) -> SiteId {
        self.sites.insert(kind, owner, position, affinity)
    }

    fn strand_of(&self, site: SiteId) -> AttachmentResult<MessengerRnaId> {
        match self.sites.get(site).map(|s| s.owner()) {
            Some(SiteOwner::MessengerRna(mrna)) => Ok(mrna),
            _ => Err(AttachmentError::UnsupportedSite { site, work: "strand work" }),
        }
    }
}

impl MotionEnvironment for MockHost {
    fn site_position(&self, site: SiteId) -> Option<Vector2> {
        self.sites.get(site).map(|s| s.position())
    }

    fn ribosome_attachment_location(
        &self,
        _mrna:     MessengerRnaId,
        _ribosome: BiomoleculeId,
    ) -> Option<Vector2> {
        Some(self.strand_point)
    }

    fn destroyer_attachment_location(&self, _mrna: MessengerRnaId) -> Option<Vector2> {
        Some(self.strand_point)
    }
}

impl AttachmentHost for MockHost {
    fn sites(&self) -> &SiteStore {
        &self.sites
    }

    fn sites_mut(&mut self) -> &mut SiteStore {
        &mut self.sites
    }

    fn propose_attachments(&mut self, candidate: &Candidate, rng: &mut AgentRng) -> Option<SiteId> {
        self.sites.propose_best(
            candidate.agent,
            candidate.kind,
            candidate.position,
            f64::INFINITY,
            |_| true,
            rng,
        )
    }

    fn begin_transcription(&mut self, _p: BiomoleculeId, _site: SiteId) -> AttachmentResult<Transcript> {
        let mrna = MessengerRnaId(self.next_mrna);
        self.next_mrna += 1;
        Ok(Transcript::new(GeneId(0), mrna, GENE_LENGTH_BP))
    }

    fn extend_transcription(&mut self, transcript: &Transcript) -> AttachmentResult<Vector2> {
        Ok(Vector2::new(transcript.transcribed_bp * 10.0, 0.0))
    }

    fn complete_transcription(&mut self, transcript: &Transcript) -> AttachmentResult<()> {
        self.completed_mrnas.push((transcript.mrna, transcript.completed_bp()));
        Ok(())
    }

    fn abort_transcription(&mut self, transcript: &Transcript) {
        self.aborted_mrnas.push(transcript.mrna);
    }

    fn begin_translation(&mut self, _r: BiomoleculeId, site: SiteId) -> AttachmentResult<Translation> {
        let mrna = self.strand_of(site)?;
        let protein = ProteinId(self.next_protein);
        self.next_protein += 1;
        Ok(Translation::new(mrna, protein, STRAND_LENGTH_BP))
    }

    fn advance_translation(&mut self, _translation: &Translation) -> AttachmentResult<()> {
        Ok(())
    }

    fn complete_translation(&mut self, translation: &Translation) -> AttachmentResult<()> {
        self.completed_proteins.push(translation.protein);
        Ok(())
    }

    fn abort_translation(&mut self, translation: &Translation) {
        let owner = SiteOwner::MessengerRna(translation.mrna);
        let held = self.sites.iter().any(|s| s.owner() == owner && s.holder().is_some());
        self.aborted_while_held.push(held);
        self.aborted_proteins.push(translation.protein);
    }

    fn begin_destruction(&mut self, _d: BiomoleculeId, site: SiteId) -> AttachmentResult<Destruction> {
        Ok(Destruction::new(self.strand_of(site)?, STRAND_LENGTH_BP))
    }

    fn advance_destruction(&mut self, _destruction: &Destruction) -> AttachmentResult<()> {
        Ok(())
    }

    fn complete_destruction(&mut self, destruction: &Destruction) -> AttachmentResult<()> {
        self.sites.remove_owned_by(SiteOwner::MessengerRna(destruction.mrna));
        self.destroyed.push(destruction.mrna);
        Ok(())
    }

    fn abort_destruction(&mut self, destruction: &Destruction) {
        self.sites.remove_owned_by(SiteOwner::MessengerRna(destruction.mrna));
    }
}

fn agent(id: u32, kind: BiomoleculeKind, position: Vector2) -> MobileBiomolecule {
    MobileBiomolecule::new(BiomoleculeId(id), kind, position, MotionBounds::unbounded(), SEED)
}

/// Step until `done` sees a matching event or `max_steps` elapse; returns
/// every event emitted.
fn run_until(
    agent:     &mut MobileBiomolecule,
    host:      &mut MockHost,
    max_steps: usize,
    done:      impl Fn(&AttachmentEvent) -> bool,
) -> Vec<AttachmentEvent> {
    let mut all = Vec::new();
    for _ in 0..max_steps {
        let events = agent.step(host, DT).unwrap();
        let finished = events.iter().any(&done);
        all.extend(events);
        if finished {
            break;
        }
    }
    all
}

// ── AttachmentSite ────────────────────────────────────────────────────────────

#[cfg(test)]
mod site {
    use super::*;

    fn rng() -> AgentRng {
        AgentRng::new(SEED, BiomoleculeId(1))
    }

    fn store_with(affinity: f64) -> (SiteStore, SiteId) {
        let mut store = SiteStore::new();
        let id = store.insert(SiteKind::Polymerase, SiteOwner::Gene(GeneId(0)), Vector2::ZERO, affinity);
        (store, id)
    }

    #[test]
    fn full_affinity_always_accepts() {
        let mut rng = rng();
        for _ in 0..500 {
            let (mut store, id) = store_with(1.0);
            let site = store.get_mut(id).unwrap();
            assert!(site.propose(BiomoleculeId(1), &mut rng));
            assert_eq!(site.occupancy(), Occupancy::Reserved(BiomoleculeId(1)));
        }
    }

    #[test]
    fn zero_affinity_never_accepts() {
        let (mut store, id) = store_with(0.0);
        let mut rng = rng();
        let site = store.get_mut(id).unwrap();
        for _ in 0..5_000 {
            assert!(!site.propose(BiomoleculeId(1), &mut rng));
        }
        assert!(site.is_free());
    }

    #[test]
    fn partial_affinity_accepts_sometimes() {
        let mut rng = rng();
        let accepted = (0..2_000)
            .filter(|_| {
                let (mut store, id) = store_with(0.5);
                store.get_mut(id).unwrap().propose(BiomoleculeId(1), &mut rng)
            })
            .count();
        assert!((800..1200).contains(&accepted), "accepted {accepted}/2000");
    }

    #[test]
    fn held_site_refuses_everyone() {
        let (mut store, id) = store_with(1.0);
        let mut rng = rng();
        let site = store.get_mut(id).unwrap();
        assert!(site.propose(BiomoleculeId(1), &mut rng));
        assert!(!site.propose(BiomoleculeId(2), &mut rng));
        assert!(site.confirm_attachment(BiomoleculeId(1)));
        assert!(!site.propose(BiomoleculeId(2), &mut rng));
        assert_eq!(site.holder(), Some(BiomoleculeId(1)));
    }

    #[test]
    fn confirm_requires_own_reservation() {
        let (mut store, id) = store_with(1.0);
        let mut rng = rng();
        let site = store.get_mut(id).unwrap();
        assert!(!site.confirm_attachment(BiomoleculeId(1)));
        site.propose(BiomoleculeId(1), &mut rng);
        assert!(!site.confirm_attachment(BiomoleculeId(2)));
        assert!(site.confirm_attachment(BiomoleculeId(1)));
        assert_eq!(site.occupancy(), Occupancy::Occupied(BiomoleculeId(1)));
    }

    #[test]
    fn release_returns_former_holder() {
        let (mut store, id) = store_with(1.0);
        let mut rng = rng();
        let site = store.get_mut(id).unwrap();
        site.propose(BiomoleculeId(4), &mut rng);
        assert!(!site.release_if_held_by(BiomoleculeId(5)));
        assert_eq!(site.release(), Some(BiomoleculeId(4)));
        assert_eq!(site.release(), None);
        assert!(site.is_free());
    }

    #[test]
    fn affinity_is_clamped() {
        let (mut store, id) = store_with(3.0);
        assert_eq!(store.get(id).unwrap().affinity(), 1.0);
        store.get_mut(id).unwrap().set_affinity(-1.0);
        assert_eq!(store.get(id).unwrap().affinity(), 0.0);
    }

    #[test]
    fn kinds_accept_matching_agents_only() {
        let tf_site = SiteKind::TranscriptionFactor(TF);
        assert!(tf_site.accepts(BiomoleculeKind::TranscriptionFactor(TF)));
        assert!(!tf_site.accepts(BiomoleculeKind::TranscriptionFactor(TranscriptionFactorKind::negative(1))));
        assert!(!tf_site.accepts(BiomoleculeKind::RnaPolymerase));
        assert!(SiteKind::Ribosome.accepts(BiomoleculeKind::Ribosome));
        assert!(!SiteKind::Destroyer.accepts(BiomoleculeKind::Ribosome));
    }
}

// ── SiteStore ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod site_store {
    use super::*;

    #[test]
    fn ids_are_sequential_and_removed_with_owner() {
        let mut store = SiteStore::new();
        let owner = SiteOwner::MessengerRna(MessengerRnaId(3));
        let a = store.insert(SiteKind::Ribosome, owner, Vector2::ZERO, 1.0);
        let b = store.insert(SiteKind::Destroyer, owner, Vector2::ZERO, 1.0);
        let c = store.insert(SiteKind::Polymerase, SiteOwner::Gene(GeneId(0)), Vector2::ZERO, 1.0);
        assert_eq!((a, b, c), (SiteId(0), SiteId(1), SiteId(2)));

        let removed = store.remove_owned_by(owner);
        assert_eq!(removed.iter().map(|s| s.id()).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(store.len(), 1);
        assert!(store.get(c).is_some());
    }

    #[test]
    fn best_site_prefers_affinity_then_distance() {
        let mut store = SiteStore::new();
        let gene = SiteOwner::Gene(GeneId(0));
        let near_weak = store.insert(SiteKind::Polymerase, gene, Vector2::new(10.0, 0.0), 0.999);
        let far_strong = store.insert(SiteKind::Polymerase, gene, Vector2::new(500.0, 0.0), 1.0);
        let mut rng = AgentRng::new(SEED, BiomoleculeId(1));
        let picked = store.propose_best(
            BiomoleculeId(1), BiomoleculeKind::RnaPolymerase, Vector2::ZERO, 1_000.0, |_| true, &mut rng,
        );
        assert_eq!(picked, Some(far_strong));
        assert!(store.get(near_weak).unwrap().is_free());

        let nearer = store.insert(SiteKind::Polymerase, gene, Vector2::new(5.0, 0.0), 0.999);
        let picked = store.propose_best(
            BiomoleculeId(2), BiomoleculeKind::RnaPolymerase, Vector2::ZERO, 1_000.0, |_| true, &mut rng,
        );
        // Both remaining sites rarely refuse; the nearer one is asked first.
        assert!(picked == Some(nearer) || picked == Some(near_weak));
    }

    #[test]
    fn best_site_respects_radius_kind_and_eligibility() {
        let mut store = SiteStore::new();
        let gene = SiteOwner::Gene(GeneId(0));
        let far = store.insert(SiteKind::Polymerase, gene, Vector2::new(900.0, 0.0), 1.0);
        store.insert(SiteKind::Ribosome, gene, Vector2::ZERO, 1.0);
        let mut rng = AgentRng::new(SEED, BiomoleculeId(1));

        let pick = |store: &mut SiteStore, radius, rng: &mut AgentRng, eligible: bool| {
            store.propose_best(
                BiomoleculeId(1), BiomoleculeKind::RnaPolymerase, Vector2::ZERO, radius,
                |_| eligible, rng,
            )
        };
        assert_eq!(pick(&mut store, 500.0, &mut rng, true), None);
        assert_eq!(pick(&mut store, 1_000.0, &mut rng, false), None);
        assert_eq!(pick(&mut store, 1_000.0, &mut rng, true), Some(far));
    }
}

// ── Work handles ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod work {
    use super::*;

    #[test]
    fn progress_is_monotonic_and_capped() {
        let mut t = Transcript::new(GeneId(0), MessengerRnaId(0), 10);
        t.advance(4.5);
        t.advance(-3.0);
        assert_eq!(t.transcribed_bp, 4.5);
        assert_eq!(t.completed_bp(), 4);
        t.advance(100.0);
        assert_eq!(t.transcribed_bp, 10.0);
        assert!(t.is_complete());
    }

    #[test]
    fn translation_proportion() {
        let mut t = Translation::new(MessengerRnaId(0), ProteinId(0), 20);
        assert_eq!(t.proportion(), 0.0);
        t.advance(5.0);
        assert_eq!(t.proportion(), 0.25);
        assert!(!t.is_complete());
        assert_eq!(Translation::new(MessengerRnaId(0), ProteinId(0), 0).proportion(), 1.0);
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod machine {
    use super::*;
    use gx_core::Rect;
    use crate::role::{PolymeraseWork, POLYMERASE_CONFORMATION_SECS};
    use crate::{ATTACHMENT_DISTANCE_THRESHOLD, Role};

    #[test]
    fn starts_available_and_wandering() {
        let a = agent(0, BiomoleculeKind::RnaPolymerase, Vector2::ZERO);
        assert_eq!(a.machine.state(), AttachmentState::UnattachedAndAvailable);
        assert!(matches!(a.body.motion, MotionStrategy::RandomWalk(_)));
        assert!(a.body.movable_by_user);
        assert_eq!(a.machine.attachment_site(), None);
    }

    #[test]
    fn transcription_factor_approaches_and_binds() {
        let mut host = MockHost::default();
        let site = host.site(SiteKind::TranscriptionFactor(TF), SiteOwner::Gene(GeneId(0)), Vector2::new(300.0, 0.0), 1.0);
        let mut tf = agent(0, BiomoleculeKind::TranscriptionFactor(TF), Vector2::new(0.0, 200.0));

        let events = tf.step(&mut host, DT).unwrap();
        assert_eq!(events, vec![AttachmentEvent::SiteReserved { agent: tf.id(), site }]);
        assert_eq!(tf.machine.state(), AttachmentState::MovingTowardsAttachment);
        assert!(matches!(tf.body.motion, MotionStrategy::MeanderToDestination(_)));

        let events = run_until(&mut tf, &mut host, 600, |e| matches!(e, AttachmentEvent::Attached { .. }));
        assert!(events.contains(&AttachmentEvent::Attached { agent: tf.id(), site }));
        assert!(tf.machine.state().is_attached());
        assert_eq!(host.sites.get(site).unwrap().occupancy(), Occupancy::Occupied(tf.id()));

        let target = Vector2::new(300.0, 0.0) - tf.machine.destination_offset();
        assert!(tf.position().distance(target) < ATTACHMENT_DISTANCE_THRESHOLD);
    }

    #[test]
    fn full_affinity_factor_stays_bound() {
        let mut host = MockHost::default();
        let site = host.site(SiteKind::TranscriptionFactor(TF), SiteOwner::Gene(GeneId(0)), Vector2::ZERO, 1.0);
        let mut tf = agent(0, BiomoleculeKind::TranscriptionFactor(TF), Vector2::ZERO);
        run_until(&mut tf, &mut host, 600, |e| matches!(e, AttachmentEvent::Attached { .. }));
        for _ in 0..2_000 {
            tf.step(&mut host, DT).unwrap();
        }
        assert!(tf.machine.state().is_attached());
        assert_eq!(host.sites.get(site).unwrap().holder(), Some(tf.id()));
    }

    #[test]
    fn weak_factor_eventually_detaches() {
        let mut host = MockHost::default();
        let site = host.site(SiteKind::TranscriptionFactor(TF), SiteOwner::Gene(GeneId(0)), Vector2::ZERO, 0.05);
        let mut tf = agent(0, BiomoleculeKind::TranscriptionFactor(TF), Vector2::ZERO);
        let events = run_until(&mut tf, &mut host, 20_000, |e| matches!(e, AttachmentEvent::Detached { .. }));
        assert!(events.contains(&AttachmentEvent::Detached { agent: tf.id(), site }));
        assert!(tf.machine.state().is_unavailable());
        assert!(host.sites.get(site).unwrap().is_free());
    }

    #[test]
    fn polymerase_transcribes_one_full_length_mrna() {
        let mut host = MockHost::default();
        let site = host.site(SiteKind::Polymerase, SiteOwner::Gene(GeneId(0)), Vector2::ZERO, 1.0);
        let mut rnap = agent(0, BiomoleculeKind::RnaPolymerase, Vector2::new(0.0, 100.0));

        let events = run_until(&mut rnap, &mut host, 5_000, |e| {
            matches!(e, AttachmentEvent::MessengerRnaCompleted { .. })
        });
        let completed: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, AttachmentEvent::MessengerRnaCompleted { .. }))
            .collect();
        assert_eq!(completed.len(), 1);
        assert_eq!(host.completed_mrnas, vec![(MessengerRnaId(0), GENE_LENGTH_BP)]);
        assert!(events.contains(&AttachmentEvent::Detached { agent: rnap.id(), site }));
        assert!(rnap.machine.state().is_unavailable());
        assert!(host.sites.get(site).unwrap().is_free());
    }

    #[test]
    fn polymerase_conforms_before_transcribing() {
        let mut host = MockHost::default();
        host.site(SiteKind::Polymerase, SiteOwner::Gene(GeneId(0)), Vector2::ZERO, 1.0);
        let mut rnap = agent(0, BiomoleculeKind::RnaPolymerase, Vector2::ZERO);
        run_until(&mut rnap, &mut host, 600, |e| matches!(e, AttachmentEvent::Attached { .. }));
        assert!(matches!(rnap.machine.role(), Role::RnaPolymerase(PolymeraseWork::Conforming { .. })));
        assert!(!rnap.body.movable_by_user);

        let conform_steps = (POLYMERASE_CONFORMATION_SECS / DT).ceil() as usize + 1;
        for _ in 0..conform_steps {
            rnap.step(&mut host, DT).unwrap();
        }
        assert!(matches!(rnap.machine.role(), Role::RnaPolymerase(PolymeraseWork::Transcribing(_))));
        assert_eq!(rnap.body.motion, MotionStrategy::Stillness);
    }

    #[test]
    fn cooldown_blocks_proposals_until_elapsed() {
        let mut host = MockHost::default();
        let site = host.site(SiteKind::Polymerase, SiteOwner::Gene(GeneId(0)), Vector2::ZERO, 1.0);
        let mut rnap = agent(0, BiomoleculeKind::RnaPolymerase, Vector2::ZERO).with_cooldown(3.0);
        rnap.machine.force_immediate_unattached_but_unavailable(&mut rnap.body, &mut host);

        // 0.5 s steps: elapsed reaches 3.0 exactly on the sixth step.
        for _ in 0..5 {
            rnap.step(&mut host, 0.5).unwrap();
            assert!(rnap.machine.state().is_unavailable());
            assert!(host.sites.get(site).unwrap().is_free());
        }
        rnap.step(&mut host, 0.5).unwrap();
        assert_eq!(rnap.machine.state(), AttachmentState::UnattachedAndAvailable);
        assert!(host.sites.get(site).unwrap().is_free());

        rnap.step(&mut host, 0.5).unwrap();
        assert_eq!(rnap.machine.state(), AttachmentState::MovingTowardsAttachment);
    }

    #[test]
    fn zero_cooldown_leaves_after_one_step() {
        let mut host = MockHost::default();
        let mut rnap = agent(0, BiomoleculeKind::RnaPolymerase, Vector2::ZERO).with_cooldown(0.0);
        rnap.machine.force_immediate_unattached_but_unavailable(&mut rnap.body, &mut host);
        assert!(rnap.machine.state().is_unavailable());
        rnap.step(&mut host, DT).unwrap();
        assert_eq!(rnap.machine.state(), AttachmentState::UnattachedAndAvailable);
    }

    #[test]
    fn ribosome_binds_without_arrival_check() {
        let mut host = MockHost::default();
        host.strand_point = Vector2::new(5_000.0, 0.0);
        let site = host.site(SiteKind::Ribosome, SiteOwner::MessengerRna(STRAND), Vector2::new(5_000.0, 0.0), 1.0);
        let mut ribosome = agent(0, BiomoleculeKind::Ribosome, Vector2::ZERO);

        ribosome.step(&mut host, DT).unwrap();
        assert_eq!(ribosome.machine.state(), AttachmentState::MovingTowardsAttachment);
        assert!(!ribosome.body.movable_by_user);

        let events = ribosome.step(&mut host, DT).unwrap();
        assert_eq!(events, vec![AttachmentEvent::Attached { agent: ribosome.id(), site }]);
        assert!(ribosome.machine.state().is_attached());
        assert!(matches!(ribosome.body.motion, MotionStrategy::RibosomeTranslatingRna { .. }));
        assert_eq!(ribosome.position(), host.strand_point - ribosome.machine.destination_offset());
    }

    #[test]
    fn ribosome_completes_protein_and_frees_site() {
        let mut host = MockHost::default();
        let site = host.site(SiteKind::Ribosome, SiteOwner::MessengerRna(STRAND), Vector2::ZERO, 1.0);
        let mut ribosome = agent(0, BiomoleculeKind::Ribosome, Vector2::ZERO);
        let events = run_until(&mut ribosome, &mut host, 1_000, |e| {
            matches!(e, AttachmentEvent::ProteinCompleted { .. })
        });
        assert!(events.contains(&AttachmentEvent::ProteinCompleted {
            ribosome: ribosome.id(),
            mrna:     STRAND,
            protein:  ProteinId(0),
        }));
        assert_eq!(host.completed_proteins, vec![ProteinId(0)]);
        assert_eq!(ribosome.machine.state(), AttachmentState::UnattachedAndAvailable);
        assert!(host.sites.get(site).unwrap().is_free());
    }

    #[test]
    fn forced_release_aborts_translation() {
        let mut host = MockHost::default();
        let site = host.site(SiteKind::Ribosome, SiteOwner::MessengerRna(STRAND), Vector2::ZERO, 1.0);
        let mut ribosome = agent(0, BiomoleculeKind::Ribosome, Vector2::ZERO);
        for _ in 0..10 {
            ribosome.step(&mut host, DT).unwrap();
        }
        assert!(ribosome.machine.role().has_work_in_progress());

        let events = ribosome.machine.force_immediate_unattached_and_available(&mut ribosome.body, &mut host);
        assert_eq!(events, vec![AttachmentEvent::Detached { agent: ribosome.id(), site }]);
        assert_eq!(host.aborted_proteins, vec![ProteinId(0)]);
        assert_eq!(host.aborted_while_held, vec![true], "translation must stop before the site is let go");
        assert!(host.completed_proteins.is_empty());
        assert!(!ribosome.machine.role().has_work_in_progress());
        assert_eq!(ribosome.machine.attachment_site(), None);
        assert!(host.sites.get(site).unwrap().is_free());
        assert!(ribosome.body.movable_by_user);
    }

    #[test]
    fn destroyer_consumes_strand() {
        let mut host = MockHost::default();
        let site = host.site(SiteKind::Destroyer, SiteOwner::MessengerRna(STRAND), Vector2::new(100.0, 0.0), 1.0);
        let mut destroyer = agent(0, BiomoleculeKind::MessengerRnaDestroyer, Vector2::ZERO);

        destroyer.step(&mut host, DT).unwrap();
        assert_eq!(destroyer.machine.state(), AttachmentState::MovingTowardsAttachment);
        assert!(!destroyer.body.movable_by_user);

        let events = run_until(&mut destroyer, &mut host, 2_000, |e| {
            matches!(e, AttachmentEvent::MessengerRnaDestroyed { .. })
        });
        assert!(events.contains(&AttachmentEvent::Detached { agent: destroyer.id(), site }));
        assert!(events.contains(&AttachmentEvent::MessengerRnaDestroyed {
            destroyer: destroyer.id(),
            mrna:      STRAND,
        }));
        assert_eq!(host.destroyed, vec![STRAND]);
        assert!(host.sites.is_empty());
        assert_eq!(destroyer.machine.state(), AttachmentState::UnattachedAndAvailable);
    }

    #[test]
    fn out_of_reach_site_still_attaches() {
        let bounds = MotionBounds::new(Rect::new(Vector2::ZERO, Vector2::new(1_000.0, 1_000.0)));
        let mut host = MockHost::default();
        let site = host.site(SiteKind::Destroyer, SiteOwner::MessengerRna(STRAND), Vector2::new(3_000.0, 500.0), 1.0);
        let mut destroyer = MobileBiomolecule::new(
            BiomoleculeId(0), BiomoleculeKind::MessengerRnaDestroyer, Vector2::new(500.0, 500.0), bounds, SEED,
        );

        let events = run_until(&mut destroyer, &mut host, 2_000, |e| matches!(e, AttachmentEvent::Attached { .. }));
        assert!(events.contains(&AttachmentEvent::Attached { agent: destroyer.id(), site }));
        assert!(destroyer.machine.state().is_attached());
        assert!(destroyer.body.in_bounds());
    }

    #[test]
    fn vanished_reservation_returns_to_available() {
        let mut host = MockHost::default();
        let site = host.site(SiteKind::Polymerase, SiteOwner::Gene(GeneId(0)), Vector2::new(2_000.0, 0.0), 1.0);
        let mut rnap = agent(0, BiomoleculeKind::RnaPolymerase, Vector2::ZERO);
        rnap.step(&mut host, DT).unwrap();
        assert_eq!(rnap.machine.attachment_site(), Some(site));

        host.sites.get_mut(site).unwrap().release();
        rnap.step(&mut host, DT).unwrap();
        assert_eq!(rnap.machine.state(), AttachmentState::UnattachedAndAvailable);
        assert_eq!(rnap.machine.attachment_site(), None);
    }

    #[test]
    fn attached_without_site_is_an_error() {
        let mut host = MockHost::default();
        let site = host.site(SiteKind::TranscriptionFactor(TF), SiteOwner::Gene(GeneId(0)), Vector2::ZERO, 1.0);
        let mut tf = agent(0, BiomoleculeKind::TranscriptionFactor(TF), Vector2::ZERO);
        run_until(&mut tf, &mut host, 600, |e| matches!(e, AttachmentEvent::Attached { .. }));

        host.sites.remove(site);
        assert!(tf.step(&mut host, DT).is_err());
    }
}

// ── MobileBiomolecule ─────────────────────────────────────────────────────────

#[cfg(test)]
mod biomolecule {
    use super::*;
    use gx_core::Rect;

    #[test]
    fn starts_inside_bounds() {
        let bounds = MotionBounds::new(Rect::new(Vector2::ZERO, Vector2::new(1_000.0, 1_000.0)));
        let a = MobileBiomolecule::new(BiomoleculeId(0), BiomoleculeKind::Ribosome, Vector2::new(-50.0, 5_000.0), bounds, SEED);
        assert!(a.body.in_bounds());
    }

    #[test]
    fn wandering_stays_inside_bounds() {
        let bounds = MotionBounds::new(Rect::new(Vector2::ZERO, Vector2::new(2_000.0, 1_000.0)));
        let mut host = MockHost::default();
        let mut a = MobileBiomolecule::new(BiomoleculeId(0), BiomoleculeKind::Ribosome, Vector2::new(500.0, 500.0), bounds, SEED);
        for _ in 0..3_000 {
            a.step(&mut host, DT).unwrap();
            assert!(a.body.in_bounds(), "escaped to {}", a.position());
        }
    }

    #[test]
    fn grab_releases_site_and_pauses() {
        let mut host = MockHost::default();
        let site = host.site(SiteKind::TranscriptionFactor(TF), SiteOwner::Gene(GeneId(0)), Vector2::ZERO, 1.0);
        let mut tf = agent(0, BiomoleculeKind::TranscriptionFactor(TF), Vector2::ZERO);
        run_until(&mut tf, &mut host, 600, |e| matches!(e, AttachmentEvent::Attached { .. }));

        let events = tf.grab(&mut host).unwrap();
        assert_eq!(events, vec![AttachmentEvent::Detached { agent: tf.id(), site }]);
        assert!(tf.is_user_controlled());
        assert!(host.sites.get(site).unwrap().is_free());

        tf.drag_to(Vector2::new(400.0, 400.0));
        for _ in 0..30 {
            assert!(tf.step(&mut host, DT).unwrap().is_empty());
        }
        assert_eq!(tf.position(), Vector2::new(400.0, 400.0));

        tf.release_grab();
        assert!(!tf.is_user_controlled());
        tf.step(&mut host, DT).unwrap();
        assert_eq!(tf.machine.state(), AttachmentState::MovingTowardsAttachment);
    }

    #[test]
    fn grab_refused_when_not_movable() {
        let mut host = MockHost::default();
        host.site(SiteKind::Ribosome, SiteOwner::MessengerRna(STRAND), Vector2::ZERO, 1.0);
        let mut ribosome = agent(0, BiomoleculeKind::Ribosome, Vector2::ZERO);
        ribosome.step(&mut host, DT).unwrap();
        assert!(ribosome.grab(&mut host).is_none());
        assert!(!ribosome.is_user_controlled());
    }

    #[test]
    fn settle_without_advance_does_nothing() {
        let mut host = MockHost::default();
        let site = host.site(SiteKind::Polymerase, SiteOwner::Gene(GeneId(0)), Vector2::ZERO, 1.0);
        let mut rnap = agent(0, BiomoleculeKind::RnaPolymerase, Vector2::ZERO);
        assert!(rnap.settle(&mut host).unwrap().is_empty());
        assert!(host.sites.get(site).unwrap().is_free());

        rnap.advance(&mut host, DT).unwrap();
        assert!(host.sites.get(site).unwrap().is_free(), "advance never proposes");
        assert_eq!(
            rnap.settle(&mut host).unwrap(),
            vec![AttachmentEvent::SiteReserved { agent: rnap.id(), site }]
        );
        assert!(rnap.settle(&mut host).unwrap().is_empty());
    }

    #[test]
    fn lowest_id_wins_whatever_the_advance_order() {
        for low_first in [true, false] {
            let mut host = MockHost::default();
            let site = host.site(SiteKind::Polymerase, SiteOwner::Gene(GeneId(0)), Vector2::ZERO, 1.0);
            let mut low = agent(0, BiomoleculeKind::RnaPolymerase, Vector2::new(0.0, 100.0));
            let mut high = agent(1, BiomoleculeKind::RnaPolymerase, Vector2::new(0.0, 100.0));

            if low_first {
                low.advance(&mut host, DT).unwrap();
                high.advance(&mut host, DT).unwrap();
            } else {
                high.advance(&mut host, DT).unwrap();
                low.advance(&mut host, DT).unwrap();
            }
            low.settle(&mut host).unwrap();
            high.settle(&mut host).unwrap();

            assert_eq!(host.sites.get(site).unwrap().occupancy(), Occupancy::Reserved(low.id()));
            assert_eq!(low.machine.attachment_site(), Some(site));
            assert_eq!(high.machine.state(), AttachmentState::UnattachedAndAvailable);
        }
    }

    #[test]
    fn same_seed_same_trajectory() {
        let run = || {
            let mut host = MockHost::default();
            let mut a = agent(3, BiomoleculeKind::RnaPolymerase, Vector2::new(10.0, 10.0));
            for _ in 0..500 {
                a.step(&mut host, DT).unwrap();
            }
            a.position()
        };
        assert_eq!(run(), run());
    }
}
