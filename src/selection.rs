//! Evaluation of the individual cuts on one candidate

use crate::{
    bitmap::DecisionBitmap,
    candidate::{Candidate, CandidateKind, McEvent, McParticle},
    cuts::{Criterion, CutConfiguration, Property, Quantity, NUM_QUANTITIES},
    error::CutError,
    numeric::Float,
    vertex::{self, Vertex, X, Y, Z},
};
use particle_id::ParticleID;

/// Everything about a generated particle that the cuts look at
#[derive(Clone, Debug, PartialEq)]
pub struct Observables {
    /// Particle carries electric charge
    pub charged: bool,

    /// Particle is a physical primary
    pub physical_primary: bool,

    /// PDG particle identifier
    pub pdg: ParticleID,

    /// Values of the quantities which range cuts apply to
    quantities: [Float; NUM_QUANTITIES],
}
//
impl Observables {
    /// Extract the observables of a generated particle
    ///
    /// Decay quantities are computed from the first daughter only. A particle
    /// without daughters gets a decay vertex at the origin, and zero decay
    /// length and radius: these values then go through the range cuts like
    /// any other.
    ///
    pub fn extract(particle: &McParticle, mc_event: &McEvent) -> Result<Self, CutError> {
        let physical_primary = mc_event.is_physical_primary(particle.label).ok_or(
            CutError::MissingCollaborator {
                what: "primary classification",
                label: particle.label,
            },
        )?;

        let prod_vtx = &particle.production_vertex;
        let (decay_vtx, decay_length, decay_rxy) = match particle.first_daughter() {
            Some(daughter_label) => {
                let daughter = mc_event.particle(daughter_label).ok_or(
                    CutError::MissingCollaborator {
                        what: "first daughter",
                        label: particle.label,
                    },
                )?;
                let decay_vtx = daughter.production_vertex;
                (
                    decay_vtx,
                    vertex::distance(prod_vtx, &decay_vtx),
                    vertex::transverse_radius(&decay_vtx),
                )
            }
            None => (Vertex::zeros(), 0., 0.),
        };

        let mut quantities = [0.; NUM_QUANTITIES];
        quantities[Quantity::ProdVtxX.index()] = prod_vtx[X];
        quantities[Quantity::ProdVtxY.index()] = prod_vtx[Y];
        quantities[Quantity::ProdVtxZ.index()] = prod_vtx[Z];
        quantities[Quantity::DecayVtxX.index()] = decay_vtx[X];
        quantities[Quantity::DecayVtxY.index()] = decay_vtx[Y];
        quantities[Quantity::DecayVtxZ.index()] = decay_vtx[Z];
        quantities[Quantity::DecayLength.index()] = decay_length;
        quantities[Quantity::DecayRxy.index()] = decay_rxy;

        Ok(Self {
            charged: particle.is_charged(),
            physical_primary,
            pdg: particle.pdg,
            quantities,
        })
    }

    /// Value of a boolean property
    pub fn property(&self, property: Property) -> bool {
        match property {
            Property::Charged => self.charged,
            Property::PhysicalPrimary => self.physical_primary,
        }
    }

    /// Value of a quantity
    pub fn quantity(&self, quantity: Quantity) -> Float {
        self.quantities[quantity.index()]
    }
}

impl Criterion {
    /// Decide whether a particle with these observables passes this
    /// individual cut
    pub fn accepts(&self, observables: &Observables) -> bool {
        match *self {
            Criterion::Flag {
                property,
                require_true,
                require_false,
            } => {
                if !(require_true || require_false) {
                    return true;
                }
                let value = observables.property(property);
                (require_true && value) || (require_false && !value)
            }
            Criterion::Pdg(None) => true,
            Criterion::Pdg(Some(requirement)) => requirement.accepts(observables.pdg),
            Criterion::Bound {
                quantity,
                side,
                limit,
            } => side.accepts(observables.quantity(quantity), limit),
        }
    }
}

/// Compute the outcome of every individual cut on a candidate
pub fn selection_bitmap(
    cfg: &CutConfiguration,
    candidate: Candidate<'_>,
    mc_event: &McEvent,
) -> Result<DecisionBitmap, CutError> {
    let particle = match candidate {
        Candidate::Generated(particle) => particle,
        other => {
            return Err(CutError::InvalidCandidateType {
                expected: CandidateKind::Generated,
                found: other.kind(),
            })
        }
    };
    let observables = Observables::extract(particle, mc_event)?;
    let mut bitmap = DecisionBitmap::all_failed();
    for (cut, criterion) in cfg.criteria() {
        bitmap.set(cut, criterion.accepts(&observables));
    }
    Ok(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        candidate::{tests::particle, RecoTrack},
        cuts::Cut,
        momentum::Momentum,
    };

    /// Neutral primary at the origin which decays at (3, 4, 0)
    fn decaying_event() -> McEvent {
        let mut daughter = particle(1, 211, 3, Vertex::new(3., 4., 0.), vec![]);
        daughter.physical_primary = false;
        McEvent::new(vec![
            particle(0, 310, 0, Vertex::zeros(), vec![1]),
            daughter,
        ])
    }

    #[test]
    fn decay_observables() {
        let event = decaying_event();
        let obs = Observables::extract(&event.particles()[0], &event).unwrap();
        assert_eq!(obs.quantity(Quantity::DecayLength), 5.);
        assert_eq!(obs.quantity(Quantity::DecayRxy), 5.);
        assert_eq!(obs.quantity(Quantity::DecayVtxX), 3.);
        assert_eq!(obs.quantity(Quantity::DecayVtxY), 4.);
        assert!(!obs.charged);
        assert!(obs.physical_primary);

        let obs = Observables::extract(&event.particles()[1], &event).unwrap();
        assert_eq!(obs.quantity(Quantity::ProdVtxX), 3.);
        assert_eq!(obs.quantity(Quantity::DecayLength), 0.);
        assert_eq!(obs.quantity(Quantity::DecayVtxY), 0.);
        assert!(obs.charged);
        assert!(!obs.physical_primary);
    }

    #[test]
    fn all_cuts_disabled_accept_everything() {
        let cfg = CutConfiguration::default();
        let event = decaying_event();
        for part in event.particles() {
            let bitmap = selection_bitmap(&cfg, part.into(), &event).unwrap();
            assert_eq!(bitmap, DecisionBitmap::all_passed());
        }
    }

    #[test]
    fn flag_cuts_are_inclusive() {
        let event = decaying_event();
        let mut cfg = CutConfiguration::default();
        cfg.set_require_charged(true);
        cfg.set_require_neutral(true);
        cfg.set_require_primary(true);
        cfg.set_require_secondary(true);
        for part in event.particles() {
            let bitmap = selection_bitmap(&cfg, part.into(), &event).unwrap();
            assert!(bitmap.test(Cut::Charge));
            assert!(bitmap.test(Cut::PrimSec));
        }

        cfg.set_require_neutral(false);
        cfg.set_require_primary(false);
        let kaon = selection_bitmap(&cfg, (&event.particles()[0]).into(), &event).unwrap();
        let pion = selection_bitmap(&cfg, (&event.particles()[1]).into(), &event).unwrap();
        assert!(!kaon.test(Cut::Charge));
        assert!(!kaon.test(Cut::PrimSec));
        assert!(pion.test(Cut::Charge));
        assert!(pion.test(Cut::PrimSec));
    }

    #[test]
    fn pdg_cut() {
        let event = decaying_event();
        let mut cfg = CutConfiguration::default();
        cfg.set_require_pdg_code(ParticleID::new(211), true);
        let pion = selection_bitmap(&cfg, (&event.particles()[1]).into(), &event).unwrap();
        assert!(pion.test(Cut::PdgCode));
        cfg.set_require_pdg_code(ParticleID::new(-211), true);
        let pion = selection_bitmap(&cfg, (&event.particles()[1]).into(), &event).unwrap();
        assert!(!pion.test(Cut::PdgCode));
        cfg.set_require_pdg_code(ParticleID::new(-211), false);
        let pion = selection_bitmap(&cfg, (&event.particles()[1]).into(), &event).unwrap();
        assert!(!pion.test(Cut::PdgCode));
        assert_eq!(pion.failed_bits().count(), 1);
    }

    #[test]
    fn decay_length_cut() {
        let event = decaying_event();
        let mut cfg = CutConfiguration::default();
        cfg.set_decay_length_range(-1., 4.);
        let bitmap = selection_bitmap(&cfg, (&event.particles()[0]).into(), &event).unwrap();
        assert!(!bitmap.test(Cut::DecayLengthMax));
        assert!(!bitmap.passes());
        assert_eq!(
            bitmap.failed_bits().collect::<Vec<_>>(),
            vec![Cut::DecayLengthMax.index()]
        );
    }

    #[test]
    fn no_daughter_quantities_are_not_skipped() {
        let event = decaying_event();
        let mut cfg = CutConfiguration::default();
        cfg.set_decay_rxy_range(1., 10.);
        let pion = selection_bitmap(&cfg, (&event.particles()[1]).into(), &event).unwrap();
        assert!(!pion.test(Cut::DecayRxyMin));
        assert!(pion.test(Cut::DecayLengthMin));
    }

    #[test]
    fn reconstructed_tracks_are_rejected() {
        let track = RecoTrack {
            mc_label: Some(1),
            charge: 1,
            vertex: Vertex::zeros(),
            momentum: Momentum::new(0., 0., 1., 1.),
        };
        let result = selection_bitmap(
            &CutConfiguration::default(),
            (&track).into(),
            &decaying_event(),
        );
        assert_eq!(
            result,
            Err(CutError::InvalidCandidateType {
                expected: CandidateKind::Generated,
                found: CandidateKind::Reconstructed,
            })
        );
    }

    #[test]
    fn dangling_daughter() {
        let event = decaying_event();
        let orphan = particle(0, 310, 0, Vertex::zeros(), vec![7]);
        let result = selection_bitmap(&CutConfiguration::default(), (&orphan).into(), &event);
        assert_eq!(
            result,
            Err(CutError::MissingCollaborator {
                what: "first daughter",
                label: 0,
            })
        );

        let stranger = particle(9, 22, 0, Vertex::zeros(), vec![]);
        let result = selection_bitmap(&CutConfiguration::default(), (&stranger).into(), &event);
        assert!(matches!(
            result,
            Err(CutError::MissingCollaborator { label: 9, .. })
        ));
    }
}
