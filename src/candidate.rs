//! This module defines the particle-like objects which cuts are applied to,
//! and the Monte-Carlo truth record which they live in

use crate::{momentum::Momentum, vertex::Vertex};
use particle_id::ParticleID;
use std::fmt::{self, Display};

/// Position of a particle in the truth record of its event
pub type Label = usize;

/// Generated (Monte-Carlo truth) particle
#[derive(Clone, Debug, PartialEq)]
pub struct McParticle {
    /// Position of this particle in its event
    pub label: Label,

    /// PDG particle identifier
    pub pdg: ParticleID,

    /// Electric charge, in units of |e|/3 as in the PDG tables
    pub charge: i32,

    /// Production vertex
    pub production_vertex: Vertex,

    /// 4-momentum at production
    pub momentum: Momentum,

    /// Truth that this particle is a physical primary
    pub physical_primary: bool,

    /// Labels of the decay products, in the order they were produced
    pub daughters: Vec<Label>,
}
//
impl McParticle {
    /// Truth that this particle carries electric charge
    pub fn is_charged(&self) -> bool {
        self.charge != 0
    }

    /// Label of the first decay product, if any
    pub fn first_daughter(&self) -> Option<Label> {
        self.daughters.first().copied()
    }
}

/// Reconstructed track
#[derive(Clone, Debug, PartialEq)]
pub struct RecoTrack {
    /// Label of the generated particle this track was matched to, if any
    pub mc_label: Option<Label>,

    /// Reconstructed charge sign (±1)
    pub charge: i32,

    /// Point of closest approach to the primary vertex
    pub vertex: Vertex,

    /// Reconstructed 4-momentum
    pub momentum: Momentum,
}

/// Particle-like object that may be submitted to a set of cuts
///
/// The host decides which kind of object it is dealing with before calling
/// the cuts, so that cuts only need to match on this enum.
///
#[derive(Clone, Copy, Debug)]
pub enum Candidate<'a> {
    /// Monte-Carlo truth particle
    Generated(&'a McParticle),

    /// Reconstructed track
    Reconstructed(&'a RecoTrack),
}
//
impl Candidate<'_> {
    /// Short name of this kind of candidate, for diagnostics
    pub fn kind(&self) -> CandidateKind {
        match self {
            Candidate::Generated(_) => CandidateKind::Generated,
            Candidate::Reconstructed(_) => CandidateKind::Reconstructed,
        }
    }
}

impl<'a> From<&'a McParticle> for Candidate<'a> {
    fn from(particle: &'a McParticle) -> Self {
        Candidate::Generated(particle)
    }
}

impl<'a> From<&'a RecoTrack> for Candidate<'a> {
    fn from(track: &'a RecoTrack) -> Self {
        Candidate::Reconstructed(track)
    }
}

/// Kind of a candidate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CandidateKind {
    /// See `Candidate::Generated`
    Generated,
    /// See `Candidate::Reconstructed`
    Reconstructed,
}

impl Display for CandidateKind {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateKind::Generated => write!(fmt, "generated particle"),
            CandidateKind::Reconstructed => write!(fmt, "reconstructed track"),
        }
    }
}

/// Monte-Carlo truth record of one event
#[derive(Clone, Debug, Default, PartialEq)]
pub struct McEvent {
    particles: Vec<McParticle>,
}
//
impl McEvent {
    /// Build an event from a list of particles
    ///
    /// Each particle's label must be its position in the list.
    ///
    pub fn new(particles: Vec<McParticle>) -> Self {
        debug_assert!(particles
            .iter()
            .enumerate()
            .all(|(idx, part)| part.label == idx));
        Self { particles }
    }

    /// Number of particles in the event
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Truth that this event holds no particle
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Access all particles of the event
    pub fn particles(&self) -> &[McParticle] {
        &self.particles[..]
    }

    /// Look up a particle by label
    pub fn particle(&self, label: Label) -> Option<&McParticle> {
        self.particles.get(label)
    }

    /// Physical primary classification of the particle at some label
    pub fn is_physical_primary(&self, label: Label) -> Option<bool> {
        self.particle(label).map(|part| part.physical_primary)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::momentum::Momentum;

    /// Build a particle at rest with the given vertex and daughters
    pub(crate) fn particle(
        label: Label,
        pdg: i32,
        charge: i32,
        production_vertex: Vertex,
        daughters: Vec<Label>,
    ) -> McParticle {
        McParticle {
            label,
            pdg: ParticleID::new(pdg),
            charge,
            production_vertex,
            momentum: Momentum::new(0., 0., 0., 1.),
            physical_primary: true,
            daughters,
        }
    }

    #[test]
    fn event_lookup() {
        let event = McEvent::new(vec![
            particle(0, 310, 0, Vertex::zeros(), vec![1, 2]),
            McParticle {
                physical_primary: false,
                ..particle(1, 211, 3, Vertex::new(3., 4., 0.), vec![])
            },
            McParticle {
                physical_primary: false,
                ..particle(2, -211, -3, Vertex::new(3., 4., 0.), vec![])
            },
        ]);
        assert_eq!(event.len(), 3);
        assert_eq!(event.particles()[0].first_daughter(), Some(1));
        assert_eq!(event.is_physical_primary(0), Some(true));
        assert_eq!(event.is_physical_primary(2), Some(false));
        assert_eq!(event.is_physical_primary(3), None);
        assert!(event.particle(1).unwrap().is_charged());
        assert!(!event.particle(0).unwrap().is_charged());
    }

    #[test]
    fn candidate_kinds() {
        let part = particle(0, 22, 0, Vertex::zeros(), vec![]);
        let track = RecoTrack {
            mc_label: Some(0),
            charge: 1,
            vertex: Vertex::zeros(),
            momentum: Momentum::new(1., 0., 0., 1.),
        };
        assert_eq!(Candidate::from(&part).kind(), CandidateKind::Generated);
        assert_eq!(Candidate::from(&track).kind(), CandidateKind::Reconstructed);
    }
}
