//! Scalar and vector primitives for the simulation plane

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 2D vector type for positions, velocities, and accelerations
pub type Vector = glam::DVec2;

/// Euclidean distance of a delta vector given by components.
///
/// Plain sqrt, not `hypot`: coordinates stay well inside the range where
/// the intermediate square could overflow, and sqrt is measurably cheaper.
#[inline]
pub fn distance(dx: Scalar, dy: Scalar) -> Scalar {
    libm::sqrt(dx * dx + dy * dy)
}
