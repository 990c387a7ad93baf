//! This module implements some domain-specific 4-momentum handling logic.

use crate::numeric::Float;
use nalgebra::{SVector, Vector3};
use prefix_num_ops::real::*;

/// 4-momentum dimension
pub const MOMENTUM_DIM: usize = 4;

/// Relativistic 4-momentum (GeV)
pub type Momentum = SVector<Float, MOMENTUM_DIM>;

/// Convenience const for accessing the X coordinate of a 4-vector
pub const X: usize = 0;

/// Convenience const for accessing the Y coordinate of a 4-vector
pub const Y: usize = 1;

/// Convenience const for accessing the Z coordinate of a 4-vector
pub const Z: usize = 2;

/// Convenience const for accessing the E coordinate of a 4-vector
pub const E: usize = 3;

/// Build an on-shell 4-momentum from a 3-momentum and a mass
pub fn on_shell(p: Vector3<Float>, mass: Float) -> Momentum {
    let e = sqrt(p.norm_squared() + mass.powi(2));
    Momentum::new(p[X], p[Y], p[Z], e)
}

/// Get the spatial part of a 4-momentum
pub fn xyz(p: &Momentum) -> Vector3<Float> {
    p.fixed_rows::<3>(X).into_owned()
}

/// Transverse momentum
pub fn pt(p: &Momentum) -> Float {
    sqrt(p[X].powi(2) + p[Y].powi(2))
}

/// Pseudorapidity, with the usual convention of a large finite value along
/// the beam axis
pub fn pseudorapidity(p: &Momentum) -> Float {
    let p_abs = xyz(p).norm();
    let pt = pt(p);
    if pt == 0. {
        // Along the beam axis, or at rest
        return if p[Z] >= 0. { 1e10 } else { -1e10 };
    }
    0.5 * ln((p_abs + p[Z]) / (p_abs - p[Z]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transverse_plane() {
        let p = on_shell(Vector3::new(3., 4., 0.), 0.);
        assert_eq!(pt(&p), 5.);
        assert_eq!(p[E], 5.);
        assert!(abs(pseudorapidity(&p)) < 1e-12);
    }

    #[test]
    fn pseudorapidity_sign_follows_pz() {
        let forward = on_shell(Vector3::new(1., 0., 2.), 0.1396);
        let backward = on_shell(Vector3::new(1., 0., -2.), 0.1396);
        assert!(pseudorapidity(&forward) > 0.);
        assert!(abs(pseudorapidity(&forward) + pseudorapidity(&backward)) < 1e-6);
    }
}
