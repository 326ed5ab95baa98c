//! Moving test bodies and their shared integration recipe

use crate::physics::field::AccelerationField;
use crate::physics::history::HistoryBuffer;
use crate::physics::math::{Scalar, Vector};
use crate::utils::color::Color;

/// Opaque handle for a launched particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(u64);

impl ParticleId {
    pub(crate) const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// A point mass moving under the attraction field.
///
/// The acceleration is ephemeral (recomputed from the field every step); the
/// color is opaque to the physics and only carried for the renderer. The
/// history buffer records where the particle has been, newest first.
#[derive(Debug, Clone)]
pub struct Particle {
    id: ParticleId,
    position: Vector,
    velocity: Vector,
    acceleration: Vector,
    color: Color,
    history: HistoryBuffer,
}

impl Particle {
    pub(crate) fn new(
        id: ParticleId,
        position: Vector,
        velocity: Vector,
        color: Color,
        history_capacity: usize,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            acceleration: Vector::ZERO,
            color,
            history: HistoryBuffer::new(history_capacity),
        }
    }

    /// Throwaway particle for trajectory prediction: no identity, no trail.
    pub(crate) fn probe(position: Vector, velocity: Vector) -> Self {
        Self::new(ParticleId::new(0), position, velocity, Color::default(), 0)
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    pub fn acceleration(&self) -> Vector {
        self.acceleration
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Push the current position onto the trail before integrating.
    pub(crate) fn record_history(&mut self) {
        self.history.push_front(self.position);
    }

    /// The single update recipe shared by the live step and the predictor.
    ///
    /// Velocity accumulates the raw acceleration; only the position
    /// increment is scaled by `game_speed`. The asymmetry is the observed
    /// slow-motion knob, not a timestep, and must not be "fixed" to scale
    /// both.
    pub(crate) fn integrate(&mut self, field: &dyn AccelerationField, game_speed: Scalar) {
        self.acceleration = field.at(self.position);
        self.velocity += self.acceleration;
        self.position += self.velocity * game_speed;
    }
}
