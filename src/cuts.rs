//! Definition and configuration of the generation-level particle cuts
//!
//! The `Cut` enum is the single source of truth for the ordering of the cuts:
//! a cut's position in this enum is its bit number in the decision bitmap,
//! its (1-based) bin in the cut statistics, and its index in the QA
//! histograms.

use crate::numeric::Float;
use particle_id::ParticleID;
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

/// Individual cuts, in bitmap order
#[derive(Clone, Copy, Debug, Display, EnumCount, EnumIter, Eq, Hash, PartialEq)]
#[allow(missing_docs)]
pub enum Cut {
    #[strum(to_string = "charge")]
    Charge,
    #[strum(to_string = "prim/sec")]
    PrimSec,
    #[strum(to_string = "PDG")]
    PdgCode,
    #[strum(to_string = "VtxXMin")]
    ProdVtxXMin,
    #[strum(to_string = "VtxXMax")]
    ProdVtxXMax,
    #[strum(to_string = "VtxYMin")]
    ProdVtxYMin,
    #[strum(to_string = "VtxYMax")]
    ProdVtxYMax,
    #[strum(to_string = "VtxZMin")]
    ProdVtxZMin,
    #[strum(to_string = "VtxZMax")]
    ProdVtxZMax,
    #[strum(to_string = "DecXMin")]
    DecayVtxXMin,
    #[strum(to_string = "DecXMax")]
    DecayVtxXMax,
    #[strum(to_string = "DecYMin")]
    DecayVtxYMin,
    #[strum(to_string = "DecYMax")]
    DecayVtxYMax,
    #[strum(to_string = "DecZMin")]
    DecayVtxZMin,
    #[strum(to_string = "DecZMax")]
    DecayVtxZMax,
    #[strum(to_string = "DecLgthMin")]
    DecayLengthMin,
    #[strum(to_string = "DecLgthMax")]
    DecayLengthMax,
    #[strum(to_string = "DecRxyMin")]
    DecayRxyMin,
    #[strum(to_string = "DecRxyMax")]
    DecayRxyMax,
}

/// Number of individual cuts
pub const NUM_CUTS: usize = Cut::COUNT;

impl Cut {
    /// Bit number of this cut in the decision bitmap
    pub fn index(self) -> usize {
        self as usize
    }

    /// Bin of this cut in the cut statistics histograms (1-based)
    pub fn bin(self) -> usize {
        self.index() + 1
    }

    /// Cut associated with some bit number
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Stem of the QA histogram names for this cut
    pub fn qa_stem(self) -> &'static str {
        use Cut::*;
        match self {
            Charge => "charge",
            PrimSec => "primSec",
            PdgCode => "pdgCode",
            ProdVtxXMin => "prodVtxXMin",
            ProdVtxXMax => "prodVtxXMax",
            ProdVtxYMin => "prodVtxYMin",
            ProdVtxYMax => "prodVtxYMax",
            ProdVtxZMin => "prodVtxZMin",
            ProdVtxZMax => "prodVtxZMax",
            DecayVtxXMin => "decVtxXMin",
            DecayVtxXMax => "decVtxXMax",
            DecayVtxYMin => "decVtxYMin",
            DecayVtxYMax => "decVtxYMax",
            DecayVtxZMin => "decVtxZMin",
            DecayVtxZMax => "decVtxZMax",
            DecayLengthMin => "decLengthMin",
            DecayLengthMax => "decLengthMax",
            DecayRxyMin => "decRxyMin",
            DecayRxyMax => "decRxyMax",
        }
    }

    /// Quantity and side of the bound checked by this cut, if it is a
    /// range cut
    pub fn bound(self) -> Option<(Quantity, Side)> {
        use {Cut::*, Quantity::*, Side::*};
        match self {
            Charge | PrimSec | PdgCode => None,
            ProdVtxXMin => Some((ProdVtxX, Min)),
            ProdVtxXMax => Some((ProdVtxX, Max)),
            ProdVtxYMin => Some((ProdVtxY, Min)),
            ProdVtxYMax => Some((ProdVtxY, Max)),
            ProdVtxZMin => Some((ProdVtxZ, Min)),
            ProdVtxZMax => Some((ProdVtxZ, Max)),
            DecayVtxXMin => Some((DecayVtxX, Min)),
            DecayVtxXMax => Some((DecayVtxX, Max)),
            DecayVtxYMin => Some((DecayVtxY, Min)),
            DecayVtxYMax => Some((DecayVtxY, Max)),
            DecayVtxZMin => Some((DecayVtxZ, Min)),
            DecayVtxZMax => Some((DecayVtxZ, Max)),
            DecayLengthMin => Some((DecayLength, Min)),
            DecayLengthMax => Some((DecayLength, Max)),
            DecayRxyMin => Some((DecayRxy, Min)),
            DecayRxyMax => Some((DecayRxy, Max)),
        }
    }
}

/// Quantities which range cuts can be applied to
#[derive(Clone, Copy, Debug, Display, EnumCount, EnumIter, Eq, Hash, PartialEq)]
pub enum Quantity {
    /// X coordinate of the production vertex
    ProdVtxX,
    /// Y coordinate of the production vertex
    ProdVtxY,
    /// Z coordinate of the production vertex
    ProdVtxZ,
    /// X coordinate of the decay vertex
    DecayVtxX,
    /// Y coordinate of the decay vertex
    DecayVtxY,
    /// Z coordinate of the decay vertex
    DecayVtxZ,
    /// Distance between the production and decay vertices
    DecayLength,
    /// Distance between the decay vertex and the beam axis
    DecayRxy,
}

/// Number of quantities which range cuts can be applied to
pub const NUM_QUANTITIES: usize = Quantity::COUNT;

impl Quantity {
    /// Index of this quantity in per-quantity storage
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Side of a range which a bound cut checks
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    /// Value must be strictly greater than the limit
    Min,
    /// Value must be strictly smaller than the limit
    Max,
}
//
impl Side {
    /// Check a value against a limit on this side
    pub fn accepts(self, value: Float, limit: Float) -> bool {
        match self {
            Side::Min => value > limit,
            Side::Max => value < limit,
        }
    }
}

/// Boolean properties which flag cuts can be applied to
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Property {
    /// Particle carries electric charge
    Charged,
    /// Particle is a physical primary
    PhysicalPrimary,
}

/// Requirement on the PDG code of a particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PdgRequirement {
    /// Expected PDG code
    pub code: ParticleID,

    /// Compare the absolute value of the particle's code to `code`, so that
    /// antiparticles also pass. A negative `code` then matches nothing.
    pub absolute: bool,
}
//
impl PdgRequirement {
    /// Check a PDG code against this requirement
    pub fn accepts(&self, pdg: ParticleID) -> bool {
        if self.absolute {
            pdg.id().abs() == self.code.id()
        } else {
            pdg == self.code
        }
    }
}

/// What one individual cut checks, under a given configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Criterion {
    /// Requirement on a boolean property of the particle
    ///
    /// When neither side is required, the cut is disabled and always passes.
    /// When both are required, either value of the property passes.
    ///
    Flag {
        /// Property being checked
        property: Property,
        /// Accept particles which have the property
        require_true: bool,
        /// Accept particles which do not have the property
        require_false: bool,
    },

    /// Requirement on the PDG code of the particle (disabled if None)
    Pdg(Option<PdgRequirement>),

    /// Strict bound on a quantity
    Bound {
        /// Quantity being checked
        quantity: Quantity,
        /// Side of the range
        side: Side,
        /// Value which the quantity must not reach
        limit: Float,
    },
}

/// Default lower bound of most ranges (effectively unbounded)
pub const DEFAULT_MIN: Float = -1e9;

/// Default upper bound of all ranges (effectively unbounded)
pub const DEFAULT_MAX: Float = 1e9;

/// Default lower bound of the decay length and transverse decay radius
pub const DEFAULT_DECAY_DISTANCE_MIN: Float = -1.;

/// Configuration of the generation-level particle cuts
#[derive(Clone, Debug, PartialEq)]
pub struct CutConfiguration {
    require_charged: bool,
    require_neutral: bool,
    require_primary: bool,
    require_secondary: bool,
    pdg: Option<PdgRequirement>,
    min: [Float; NUM_QUANTITIES],
    max: [Float; NUM_QUANTITIES],
}

impl Default for CutConfiguration {
    /// Permissive configuration which lets every particle through
    fn default() -> Self {
        let mut min = [DEFAULT_MIN; NUM_QUANTITIES];
        min[Quantity::DecayLength.index()] = DEFAULT_DECAY_DISTANCE_MIN;
        min[Quantity::DecayRxy.index()] = DEFAULT_DECAY_DISTANCE_MIN;
        Self {
            require_charged: false,
            require_neutral: false,
            require_primary: false,
            require_secondary: false,
            pdg: None,
            min,
            max: [DEFAULT_MAX; NUM_QUANTITIES],
        }
    }
}

impl CutConfiguration {
    // ### CUT DESCRIPTION ###

    /// Criterion checked by one cut
    pub fn criterion(&self, cut: Cut) -> Criterion {
        match cut {
            Cut::Charge => Criterion::Flag {
                property: Property::Charged,
                require_true: self.require_charged,
                require_false: self.require_neutral,
            },
            Cut::PrimSec => Criterion::Flag {
                property: Property::PhysicalPrimary,
                require_true: self.require_primary,
                require_false: self.require_secondary,
            },
            Cut::PdgCode => Criterion::Pdg(self.pdg),
            range_cut => {
                let (quantity, side) = range_cut
                    .bound()
                    .expect("All other cuts are range cuts");
                let limit = match side {
                    Side::Min => self.min(quantity),
                    Side::Max => self.max(quantity),
                };
                Criterion::Bound {
                    quantity,
                    side,
                    limit,
                }
            }
        }
    }

    /// All cuts with their criteria, in bitmap order
    pub fn criteria(&self) -> impl Iterator<Item = (Cut, Criterion)> + '_ {
        Cut::iter().map(move |cut| (cut, self.criterion(cut)))
    }

    // ### FLAG REQUIREMENTS ###

    /// Require (or stop requiring) particles to be charged
    pub fn set_require_charged(&mut self, require: bool) {
        self.require_charged = require;
    }

    /// Require (or stop requiring) particles to be neutral
    pub fn set_require_neutral(&mut self, require: bool) {
        self.require_neutral = require;
    }

    /// Require (or stop requiring) particles to be physical primaries
    pub fn set_require_primary(&mut self, require: bool) {
        self.require_primary = require;
    }

    /// Require (or stop requiring) particles to be secondaries
    pub fn set_require_secondary(&mut self, require: bool) {
        self.require_secondary = require;
    }

    /// Truth that charged particles are required
    pub fn require_charged(&self) -> bool {
        self.require_charged
    }

    /// Truth that neutral particles are required
    pub fn require_neutral(&self) -> bool {
        self.require_neutral
    }

    /// Truth that physical primaries are required
    pub fn require_primary(&self) -> bool {
        self.require_primary
    }

    /// Truth that secondaries are required
    pub fn require_secondary(&self) -> bool {
        self.require_secondary
    }

    // ### PDG CODE REQUIREMENT ###

    /// Require a certain PDG code, optionally ignoring its sign
    pub fn set_require_pdg_code(&mut self, code: ParticleID, absolute: bool) {
        self.pdg = Some(PdgRequirement { code, absolute });
    }

    /// Accept any PDG code
    pub fn clear_pdg_code_requirement(&mut self) {
        self.pdg = None;
    }

    /// Current PDG code requirement
    pub fn pdg_code_requirement(&self) -> Option<PdgRequirement> {
        self.pdg
    }

    // ### RANGES ###

    /// Lower bound on some quantity
    pub fn min(&self, quantity: Quantity) -> Float {
        self.min[quantity.index()]
    }

    /// Upper bound on some quantity
    pub fn max(&self, quantity: Quantity) -> Float {
        self.max[quantity.index()]
    }

    /// Set the lower bound on some quantity
    pub fn set_min(&mut self, quantity: Quantity, min: Float) {
        self.min[quantity.index()] = min;
    }

    /// Set the upper bound on some quantity
    pub fn set_max(&mut self, quantity: Quantity, max: Float) {
        self.max[quantity.index()] = max;
    }

    /// Set both bounds on some quantity
    pub fn set_range(&mut self, quantity: Quantity, min: Float, max: Float) {
        self.set_min(quantity, min);
        self.set_max(quantity, max);
    }

    /// Set the range of the production vertex X coordinate
    pub fn set_prod_vtx_range_x(&mut self, min: Float, max: Float) {
        self.set_range(Quantity::ProdVtxX, min, max)
    }

    /// Set the range of the production vertex Y coordinate
    pub fn set_prod_vtx_range_y(&mut self, min: Float, max: Float) {
        self.set_range(Quantity::ProdVtxY, min, max)
    }

    /// Set the range of the production vertex Z coordinate
    pub fn set_prod_vtx_range_z(&mut self, min: Float, max: Float) {
        self.set_range(Quantity::ProdVtxZ, min, max)
    }

    /// Set the range of the decay vertex X coordinate
    pub fn set_decay_vtx_range_x(&mut self, min: Float, max: Float) {
        self.set_range(Quantity::DecayVtxX, min, max)
    }

    /// Set the range of the decay vertex Y coordinate
    pub fn set_decay_vtx_range_y(&mut self, min: Float, max: Float) {
        self.set_range(Quantity::DecayVtxY, min, max)
    }

    /// Set the range of the decay vertex Z coordinate
    pub fn set_decay_vtx_range_z(&mut self, min: Float, max: Float) {
        self.set_range(Quantity::DecayVtxZ, min, max)
    }

    /// Set the range of the decay length
    pub fn set_decay_length_range(&mut self, min: Float, max: Float) {
        self.set_range(Quantity::DecayLength, min, max)
    }

    /// Set the range of the transverse decay radius
    pub fn set_decay_rxy_range(&mut self, min: Float, max: Float) {
        self.set_range(Quantity::DecayRxy, min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cut_ordering() {
        assert_eq!(NUM_CUTS, 19);
        assert_eq!(NUM_QUANTITIES, 8);
        for (idx, cut) in Cut::iter().enumerate() {
            assert_eq!(cut.index(), idx);
            assert_eq!(cut.bin(), idx + 1);
            assert_eq!(Cut::from_index(idx), Some(cut));
        }
        assert_eq!(Cut::from_index(NUM_CUTS), None);
        assert_eq!(Cut::Charge.to_string(), "charge");
        assert_eq!(Cut::DecayRxyMax.to_string(), "DecRxyMax");
    }

    #[test]
    fn every_quantity_has_both_bounds() {
        for quantity in Quantity::iter() {
            let sides = Cut::iter()
                .filter_map(Cut::bound)
                .filter(|&(q, _)| q == quantity)
                .map(|(_, side)| side)
                .collect::<Vec<_>>();
            assert_eq!(sides, vec![Side::Min, Side::Max]);
        }
        assert_eq!(Cut::iter().filter(|cut| cut.bound().is_none()).count(), 3);
    }

    #[test]
    fn permissive_defaults() {
        let cfg = CutConfiguration::default();
        assert_eq!(cfg.min(Quantity::ProdVtxX), -1e9);
        assert_eq!(cfg.max(Quantity::DecayRxy), 1e9);
        assert_eq!(cfg.min(Quantity::DecayLength), -1.);
        assert_eq!(cfg.min(Quantity::DecayRxy), -1.);
        assert_eq!(cfg.pdg_code_requirement(), None);
        assert_eq!(
            cfg.criterion(Cut::Charge),
            Criterion::Flag {
                property: Property::Charged,
                require_true: false,
                require_false: false,
            }
        );
    }

    #[test]
    fn criteria_follow_setters() {
        let mut cfg = CutConfiguration::default();
        cfg.set_decay_length_range(0.5, 4.);
        cfg.set_require_secondary(true);
        cfg.set_require_pdg_code(ParticleID::new(211), true);
        let criteria = cfg.criteria().collect::<Vec<_>>();
        assert_eq!(criteria.len(), NUM_CUTS);
        assert_eq!(
            criteria[Cut::DecayLengthMax.index()],
            (
                Cut::DecayLengthMax,
                Criterion::Bound {
                    quantity: Quantity::DecayLength,
                    side: Side::Max,
                    limit: 4.,
                }
            )
        );
        assert_eq!(
            criteria[Cut::PrimSec.index()].1,
            Criterion::Flag {
                property: Property::PhysicalPrimary,
                require_true: false,
                require_false: true,
            }
        );
        cfg.clear_pdg_code_requirement();
        assert_eq!(cfg.criterion(Cut::PdgCode), Criterion::Pdg(None));
    }

    #[test]
    fn pdg_requirement_modes() {
        let signed = PdgRequirement {
            code: ParticleID::new(211),
            absolute: false,
        };
        let unsigned = PdgRequirement {
            absolute: true,
            ..signed
        };
        assert!(signed.accepts(ParticleID::new(211)));
        assert!(!signed.accepts(ParticleID::new(-211)));
        assert!(unsigned.accepts(ParticleID::new(-211)));
        assert!(unsigned.accepts(ParticleID::new(211)));
        assert!(!unsigned.accepts(ParticleID::new(321)));

        let negative_unsigned = PdgRequirement {
            code: ParticleID::new(-211),
            absolute: true,
        };
        assert!(!negative_unsigned.accepts(ParticleID::new(211)));
        assert!(!negative_unsigned.accepts(ParticleID::new(-211)));
    }

    #[test]
    fn bounds_are_strict() {
        assert!(Side::Min.accepts(0., -1.));
        assert!(!Side::Min.accepts(-1., -1.));
        assert!(Side::Max.accepts(0., 1.));
        assert!(!Side::Max.accepts(1., 1.));
    }
}
