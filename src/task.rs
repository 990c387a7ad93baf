//! Event-loop task which applies the generation-level cuts to every particle
//! of every event, and histograms the particles that pass them

use crate::{
    candidate::{McEvent, McParticle},
    cuts::{CutConfiguration, Quantity},
    gencuts::ParticleGenCuts,
    histogram::{Axis, Histogram1D, Histogram2D},
    momentum,
    numeric::Float,
    vertex,
};
use log::debug;
use std::collections::BTreeMap;

/// Accumulates the output of the analysis over a number of events
#[derive(Clone, Debug)]
pub struct GenParticleTask {
    /// Number of processed events
    num_events: usize,

    /// Number of particles submitted to the cuts
    num_candidates: usize,

    /// Number of particles that passed the cuts
    num_accepted: usize,

    /// The cuts, with their own statistics and QA histograms
    cuts: ParticleGenCuts,

    /// Kinematic distributions of the accepted particles
    kinematics: AcceptedKinematics,

    /// Number of accepted particles of each PDG code
    species: BTreeMap<i32, usize>,
}
//
impl GenParticleTask {
    /// Set up the task for a given set of cuts
    pub fn new(name: &str, cfg: CutConfiguration, qa_enabled: bool) -> Self {
        let mut cuts = ParticleGenCuts::new(name, cfg);
        cuts.set_qa_enabled(qa_enabled);
        Self {
            num_events: 0,
            num_candidates: 0,
            num_accepted: 0,
            kinematics: AcceptedKinematics::new(name),
            cuts,
            species: BTreeMap::new(),
        }
    }

    /// Process one event
    pub fn process_event(&mut self, event: &McEvent) {
        self.num_events += 1;
        for particle in event.particles() {
            self.num_candidates += 1;
            if self.cuts.evaluate(particle.into(), event) {
                self.num_accepted += 1;
                self.kinematics.fill(particle, event);
                *self.species.entry(particle.pdg.id()).or_default() += 1;
            }
        }
    }

    /// Integrate the results of another task
    #[allow(clippy::needless_pass_by_value)]
    pub fn merge(&mut self, other: Self) {
        self.num_events += other.num_events;
        self.num_candidates += other.num_candidates;
        self.num_accepted += other.num_accepted;
        self.cuts.merge(&other.cuts);
        self.kinematics.merge(&other.kinematics);
        for (pdg, count) in other.species {
            *self.species.entry(pdg).or_default() += count;
        }
    }

    /// Turn the accumulated data into final results
    pub fn finalize(self) -> TaskResults {
        debug!(
            "Finalizing after {} events, {} candidates",
            self.num_events, self.num_candidates
        );
        let acceptance = if self.num_candidates > 0 {
            self.num_accepted as Float / self.num_candidates as Float
        } else {
            0.
        };
        TaskResults {
            num_events: self.num_events,
            num_candidates: self.num_candidates,
            num_accepted: self.num_accepted,
            acceptance,
            cuts: self.cuts,
            kinematics: self.kinematics,
            species: self.species,
        }
    }
}

/// Histograms of the accepted particles
#[derive(Clone, Debug)]
pub struct AcceptedKinematics {
    /// Transverse momentum (GeV)
    pub pt: Histogram1D,

    /// Pseudorapidity
    pub eta: Histogram1D,

    /// Decay length (cm), for particles that decay
    pub decay_length: Histogram1D,

    /// Pseudorapidity versus transverse momentum
    pub pt_eta: Histogram2D,
}
//
impl AcceptedKinematics {
    fn new(name: &str) -> Self {
        Self {
            pt: Histogram1D::new(format!("{name}_pt"), 50, 0., 5.),
            eta: Histogram1D::new(format!("{name}_eta"), 40, -4., 4.),
            decay_length: Histogram1D::new(format!("{name}_decay_length"), 100, 0., 50.),
            pt_eta: Histogram2D::new(
                format!("{name}_pt_eta"),
                Axis::new(50, 0., 5.),
                Axis::new(40, -4., 4.),
            ),
        }
    }

    fn fill(&mut self, particle: &McParticle, event: &McEvent) {
        let pt = momentum::pt(&particle.momentum);
        let eta = momentum::pseudorapidity(&particle.momentum);
        self.pt.fill(pt);
        self.eta.fill(eta);
        self.pt_eta.fill(pt, eta);
        if let Some(daughter) = particle.first_daughter().and_then(|l| event.particle(l)) {
            self.decay_length.fill(vertex::distance(
                &particle.production_vertex,
                &daughter.production_vertex,
            ));
        }
    }

    fn merge(&mut self, other: &Self) {
        self.pt.merge(&other.pt);
        self.eta.merge(&other.eta);
        self.decay_length.merge(&other.decay_length);
        self.pt_eta.merge(&other.pt_eta);
    }
}

/// Final results of the analysis
pub struct TaskResults {
    /// Number of processed events
    pub num_events: usize,

    /// Number of particles submitted to the cuts
    pub num_candidates: usize,

    /// Number of particles that passed the cuts
    pub num_accepted: usize,

    /// Fraction of the particles that passed the cuts
    pub acceptance: Float,

    /// The cuts, with their statistics and QA histograms
    pub cuts: ParticleGenCuts,

    /// Kinematic distributions of the accepted particles
    pub kinematics: AcceptedKinematics,

    /// Number of accepted particles of each PDG code
    pub species: BTreeMap<i32, usize>,
}
//
impl TaskResults {
    /// Mean decay length of the accepted particles that decay, if any
    pub fn mean_decay_length(&self) -> Option<Float> {
        self.kinematics.decay_length.mean()
    }

    /// Range applied to the decay length by the cuts
    pub fn decay_length_range(&self) -> (Float, Float) {
        let cfg = self.cuts.configuration();
        (cfg.min(Quantity::DecayLength), cfg.max(Quantity::DecayLength))
    }
}
