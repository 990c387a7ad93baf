//! Spatial positions of particle production and decay

use crate::numeric::Float;
use nalgebra::SVector;
use prefix_num_ops::real::*;

/// Vertex dimension
pub const VERTEX_DIM: usize = 3;

/// Position of a production or decay vertex (cm)
pub type Vertex = SVector<Float, VERTEX_DIM>;

/// Convenience const for accessing the X coordinate of a vertex
pub const X: usize = 0;

/// Convenience const for accessing the Y coordinate of a vertex
pub const Y: usize = 1;

/// Convenience const for accessing the Z coordinate of a vertex
pub const Z: usize = 2;

/// Distance of a vertex from the beam axis
pub fn transverse_radius(v: &Vertex) -> Float {
    sqrt(v[X].powi(2) + v[Y].powi(2))
}

/// Euclidean distance between two vertices
pub fn distance(from: &Vertex, to: &Vertex) -> Float {
    (to - from).norm()
}
