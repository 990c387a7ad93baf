//! This module provides a toy Monte-Carlo event generator
//!
//! It is nowhere near a physics generator: it only produces the kind of truth
//! record (primaries, secondaries from weak decays, displaced vertices) that
//! generation-level cuts need to be exercised on.

use crate::{
    candidate::{Label, McEvent, McParticle},
    momentum::{self, Momentum, E},
    numeric::{
        reals::{consts::PI, MIN_POSITIVE},
        Float,
    },
    random::RandomGenerator,
    vertex::Vertex,
};
use log::trace;
use nalgebra::Vector3;
use particle_id::ParticleID;
use prefix_num_ops::real::*;

/// Transverse spread of the primary vertex (cm)
const VERTEX_SIGMA_XY: Float = 0.01;

/// Longitudinal spread of the primary vertex (cm)
const VERTEX_SIGMA_Z: Float = 5.;

/// Mean momentum of the generated primaries (GeV)
const MEAN_MOMENTUM: Float = 0.6;

/// Properties of a species that the generator knows about
struct Species {
    /// PDG code
    pdg: i32,
    /// Charge in units of |e|/3
    charge: i32,
    /// Mass (GeV)
    mass: Float,
    /// Relative abundance among primaries
    abundance: Float,
    /// Proper decay length (cm) and PDG codes of the two decay products
    decay: Option<(Float, [i32; 2])>,
}

/// Number of species that the generator can produce
const NUM_SPECIES: usize = 9;

/// Species that the generator can produce
#[rustfmt::skip]
const SPECIES: [Species; NUM_SPECIES] = [
    Species { pdg: 211, charge: 3, mass: 0.139_570, abundance: 0.30, decay: None },
    Species { pdg: -211, charge: -3, mass: 0.139_570, abundance: 0.30, decay: None },
    Species { pdg: 321, charge: 3, mass: 0.493_677, abundance: 0.05, decay: None },
    Species { pdg: -321, charge: -3, mass: 0.493_677, abundance: 0.05, decay: None },
    Species { pdg: 2212, charge: 3, mass: 0.938_272, abundance: 0.04, decay: None },
    Species { pdg: -2212, charge: -3, mass: 0.938_272, abundance: 0.04, decay: None },
    Species { pdg: 22, charge: 0, mass: 0., abundance: 0.12, decay: None },
    Species { pdg: 310, charge: 0, mass: 0.497_611, abundance: 0.07, decay: Some((2.6844, [211, -211])) },
    Species { pdg: 3122, charge: 0, mass: 1.115_683, abundance: 0.03, decay: Some((7.89, [2212, -211])) },
];

/// Look up a species by PDG code
fn species(pdg: i32) -> &'static Species {
    SPECIES
        .iter()
        .find(|s| s.pdg == pdg)
        .expect("Decay products must be known species")
}

/// Generator of toy Monte-Carlo events
pub struct EventGenerator {
    /// Number of primaries in each event
    primaries_per_event: usize,

    /// Cumulative abundances of the species, normalized to 1
    cumulative_abundances: [Float; NUM_SPECIES],
}
//
impl EventGenerator {
    // ### CONSTRUCTION ###

    /// Prepare to generate events with a fixed number of primaries
    pub fn new(primaries_per_event: usize) -> Self {
        let total = SPECIES.iter().map(|s| s.abundance).sum::<Float>();
        let mut cumulative_abundances = [0.; NUM_SPECIES];
        let mut acc = 0.;
        for (cumulative, species) in cumulative_abundances.iter_mut().zip(SPECIES.iter()) {
            acc += species.abundance / total;
            *cumulative = acc;
        }
        Self {
            primaries_per_event,
            cumulative_abundances,
        }
    }

    // ### EVENT GENERATION ###

    /// Generate one event
    ///
    /// Primaries come first in the truth record, decay products of unstable
    /// primaries are appended after them.
    ///
    pub fn generate(&self, rng: &mut RandomGenerator) -> McEvent {
        let primary_vertex = Vertex::new(
            VERTEX_SIGMA_XY * gaussian(rng),
            VERTEX_SIGMA_XY * gaussian(rng),
            VERTEX_SIGMA_Z * gaussian(rng),
        );

        let mut particles = Vec::with_capacity(2 * self.primaries_per_event);
        for label in 0..self.primaries_per_event {
            let species = self.pick_species(rng);
            let p = MEAN_MOMENTUM * -ln(rng.random() + MIN_POSITIVE);
            let p_xyz = p * random_direction(rng);
            particles.push(McParticle {
                label,
                pdg: ParticleID::new(species.pdg),
                charge: species.charge,
                production_vertex: primary_vertex,
                momentum: momentum::on_shell(p_xyz, species.mass),
                physical_primary: true,
                daughters: Vec::new(),
            });
        }

        for parent_label in 0..self.primaries_per_event {
            let species = species(particles[parent_label].pdg.id());
            if let Some((c_tau, products)) = species.decay {
                let next_label = particles.len();
                let daughters = Self::decay(
                    &particles[parent_label],
                    species.mass,
                    c_tau,
                    products,
                    next_label,
                    rng,
                );
                particles[parent_label].daughters = vec![next_label, next_label + 1];
                particles.extend(daughters);
            }
        }

        trace!("Generated an event with {} particles", particles.len());
        McEvent::new(particles)
    }

    /// Pick the species of a primary according to the abundance table
    fn pick_species(&self, rng: &mut RandomGenerator) -> &'static Species {
        let r = rng.random();
        let idx = self
            .cumulative_abundances
            .iter()
            .position(|&cumulative| r < cumulative)
            .unwrap_or(NUM_SPECIES - 1);
        &SPECIES[idx]
    }

    /// Decay a particle into two daughters at a displaced vertex
    fn decay(
        parent: &McParticle,
        mass: Float,
        c_tau: Float,
        products: [i32; 2],
        first_label: Label,
        rng: &mut RandomGenerator,
    ) -> [McParticle; 2] {
        // Flight length in the laboratory frame is βγcτ times an exponential
        let p_parent = momentum::xyz(&parent.momentum);
        let beta_gamma = p_parent.norm() / mass;
        let flight = -c_tau * beta_gamma * ln(rng.random() + MIN_POSITIVE);
        let direction = p_parent
            .try_normalize(MIN_POSITIVE)
            .unwrap_or_else(Vector3::z);
        let decay_vertex = parent.production_vertex + flight * direction;

        // Isotropic two-body decay in the parent rest frame
        let [d1, d2] = products.map(species);
        let (m1, m2) = (d1.mass, d2.mass);
        let p_star = sqrt(
            (mass.powi(2) - (m1 + m2).powi(2)) * (mass.powi(2) - (m1 - m2).powi(2)),
        ) / (2. * mass);
        let dir_star = random_direction(rng);
        let rest_momenta = [
            momentum::on_shell(p_star * dir_star, m1),
            momentum::on_shell(-p_star * dir_star, m2),
        ];

        let daughter = |idx: usize, species: &Species| McParticle {
            label: first_label + idx,
            pdg: ParticleID::new(species.pdg),
            charge: species.charge,
            production_vertex: decay_vertex,
            momentum: boost(&rest_momenta[idx], &parent.momentum, mass),
            physical_primary: false,
            daughters: Vec::new(),
        };
        [daughter(0, d1), daughter(1, d2)]
    }
}

/// Standard normal deviate, using the Box-Muller method
fn gaussian(rng: &mut RandomGenerator) -> Float {
    let r = sqrt(-2. * ln(rng.random() + MIN_POSITIVE));
    let phi = 2. * PI * rng.random();
    r * cos(phi)
}

/// Uniformly distributed unit 3-vector
fn random_direction(rng: &mut RandomGenerator) -> Vector3<Float> {
    let cos_theta = 2. * rng.random() - 1.;
    let phi = 2. * PI * rng.random();
    let sin_theta = sqrt(1. - cos_theta.powi(2));
    Vector3::new(sin_theta * cos(phi), sin_theta * sin(phi), cos_theta)
}

/// Boost a rest-frame 4-momentum into the frame where a particle of mass
/// `mass` has 4-momentum `frame`
fn boost(p_rest: &Momentum, frame: &Momentum, mass: Float) -> Momentum {
    let beta = momentum::xyz(frame) / frame[E];
    let gamma = frame[E] / mass;
    let beta2 = beta.norm_squared();
    let beta_p = beta.dot(&momentum::xyz(p_rest));
    let coeff = if beta2 > 0. {
        (gamma - 1.) * beta_p / beta2 + gamma * p_rest[E]
    } else {
        0.
    };
    let p_xyz = momentum::xyz(p_rest) + coeff * beta;
    Momentum::new(p_xyz[0], p_xyz[1], p_xyz[2], gamma * (p_rest[E] + beta_p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::DEFAULT_SEED;

    #[test]
    fn truth_record_structure() {
        let evgen = EventGenerator::new(50);
        let mut rng = RandomGenerator::for_batch(DEFAULT_SEED, 0);
        for _ in 0..20 {
            let event = evgen.generate(&mut rng);
            assert!(event.len() >= 50);
            for part in event.particles() {
                assert_eq!(part.physical_primary, part.label < 50);
                let daughters = part
                    .daughters
                    .iter()
                    .map(|&l| event.particle(l).unwrap())
                    .collect::<Vec<_>>();
                for daughter in daughters.iter() {
                    assert!(!daughter.physical_primary);
                    assert!(daughter.label > part.label);
                    assert_eq!(daughter.production_vertex, daughters[0].production_vertex);
                }
                match species(part.pdg.id()).decay {
                    Some((_c_tau, products)) => {
                        let pdgs = daughters.iter().map(|d| d.pdg.id()).collect::<Vec<_>>();
                        assert_eq!(pdgs, products.to_vec());
                    }
                    None => assert!(daughters.is_empty()),
                }
            }
        }
    }

    #[test]
    fn decays_conserve_charge_and_momentum() {
        let evgen = EventGenerator::new(200);
        let mut rng = RandomGenerator::for_batch(DEFAULT_SEED, 1);
        let event = evgen.generate(&mut rng);
        for part in event.particles().iter().filter(|p| !p.daughters.is_empty()) {
            let daughters = part
                .daughters
                .iter()
                .map(|&l| event.particle(l).unwrap())
                .collect::<Vec<_>>();
            let charge = daughters.iter().map(|d| d.charge).sum::<i32>();
            assert_eq!(charge, part.charge);
            let p_sum = daughters[0].momentum + daughters[1].momentum;
            assert!((p_sum - part.momentum).norm() < 1e-6 * (1. + part.momentum[E]));
        }
    }

    #[test]
    fn same_seed_same_events() {
        let evgen = EventGenerator::new(10);
        let mut rng1 = RandomGenerator::for_batch(7, 2);
        let mut rng2 = RandomGenerator::for_batch(7, 2);
        assert_eq!(evgen.generate(&mut rng1), evgen.generate(&mut rng2));
    }
}
