//! Gravity sources and the attraction field they generate

use crate::physics::math::{Scalar, Vector, distance};

/// Lower clamp for the squared distance between a query point and a source
/// center. Any squared distance small enough to hit this clamp is already
/// saturated at the force cap, so the clamp only keeps the division finite;
/// it never changes an observable result.
const SQUARED_DISTANCE_EPSILON: Scalar = 1e-9;

/// An immovable attractor: a fixed center with a radius and a mass.
///
/// The radius doubles as the hit-test extent for removal; in the interactive
/// creation path the mass is numerically equal to the radius, but nothing in
/// the field requires that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityObject {
    pub x: Scalar,
    pub y: Scalar,
    pub radius: Scalar,
    pub mass: Scalar,
}

impl GravityObject {
    pub fn new(x: Scalar, y: Scalar, radius: Scalar, mass: Scalar) -> Self {
        Self { x, y, radius, mass }
    }

    #[inline]
    pub fn position(&self) -> Vector {
        Vector::new(self.x, self.y)
    }
}

/// Maps a point in the plane to the net acceleration imparted there.
///
/// The integration code and the trajectory predictor depend on this trait
/// rather than on `GravityField` directly, so tests can substitute constant
/// or analytic fields.
pub trait AccelerationField {
    fn at(&self, position: Vector) -> Vector;
}

/// The set of live gravity sources plus the force recipe constants.
///
/// Iteration order is stable (insertion order), so force accumulation is
/// deterministic for a given snapshot. The field is `Clone`: the trajectory
/// predictor works on a cloned snapshot and is therefore unaffected by
/// concurrent source edits.
#[derive(Debug, Clone)]
pub struct GravityField {
    sources: Vec<GravityObject>,
    gravitational_constant: Scalar,
    force_cap: Scalar,
}

impl GravityField {
    pub fn new(gravitational_constant: Scalar, force_cap: Scalar) -> Self {
        Self {
            sources: Vec::new(),
            gravitational_constant,
            force_cap,
        }
    }

    pub fn add(&mut self, source: GravityObject) {
        log::debug!(
            "adding gravity source at ({}, {}) radius {} mass {}",
            source.x,
            source.y,
            source.radius,
            source.mass
        );
        self.sources.push(source);
    }

    /// Remove every source matching the predicate. No-op when nothing
    /// matches.
    pub fn remove_where(&mut self, predicate: impl Fn(&GravityObject) -> bool) {
        let before = self.sources.len();
        self.sources.retain(|source| !predicate(source));
        let removed = before - self.sources.len();
        if removed > 0 {
            log::debug!("removed {removed} gravity sources");
        }
    }

    /// Remove every source whose disc covers the given point (the "delete
    /// source under cursor" gesture).
    pub fn remove_near(&mut self, point: Vector) {
        self.remove_where(|source| {
            distance(source.x - point.x, source.y - point.y) < source.radius
        });
    }

    pub fn clear(&mut self) {
        self.sources.clear();
    }

    pub fn sources(&self) -> &[GravityObject] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn gravitational_constant(&self) -> Scalar {
        self.gravitational_constant
    }

    pub fn force_cap(&self) -> Scalar {
        self.force_cap
    }
}

impl AccelerationField for GravityField {
    /// Capped inverse-square attraction summed over all sources.
    ///
    /// Each source contributes a force of `min(force_cap, K * mass / d²)`
    /// pointed from the query position toward the source center; the empty
    /// field yields zero.
    fn at(&self, position: Vector) -> Vector {
        let mut acceleration = Vector::ZERO;

        for source in &self.sources {
            let dx = position.x - source.x;
            let dy = position.y - source.y;

            let squared_distance = (dx * dx + dy * dy).max(SQUARED_DISTANCE_EPSILON);
            let strength = self.gravitational_constant * source.mass;
            let force = (strength / squared_distance).min(self.force_cap);
            let direction = libm::atan2(dy, dx);

            // atan2(dy, dx) points from the source toward the query
            // position, so the attractive contribution is subtracted.
            acceleration.x -= force * libm::cos(direction);
            acceleration.y -= force * libm::sin(direction);
        }

        acceleration
    }
}
