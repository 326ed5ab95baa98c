//! Live particle collection and the per-tick simulation step

use crate::config::SimulationConfig;
use crate::physics::field::AccelerationField;
use crate::physics::math::{Scalar, Vector};
use crate::physics::particle::{Particle, ParticleId};
use crate::utils::color::Color;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicU64, Ordering};

struct QueuedLaunch {
    id: ParticleId,
    position: Vector,
    velocity: Vector,
    color: Color,
}

/// Owns the live particles and advances them one step at a time.
///
/// Mutation happens on a single stepping thread via `launch` and `step`;
/// producers on other threads hand launches over through `enqueue`, a
/// mutex-guarded queue drained at the start of the next step, so the live
/// collection itself only ever has one writer.
pub struct ParticleSystem {
    particles: Vec<Particle>,
    queued: Mutex<Vec<QueuedLaunch>>,
    next_id: AtomicU64,
    width: Scalar,
    height: Scalar,
    game_speed: Scalar,
    history_capacity: usize,
}

impl ParticleSystem {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            particles: Vec::new(),
            queued: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            width: config.bounds.canvas_width,
            height: config.bounds.canvas_height,
            game_speed: config.physics.game_speed,
            history_capacity: config.trails.history_capacity,
        }
    }

    fn allocate_id(&self) -> ParticleId {
        ParticleId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Insert a particle immediately. Accepted unconditionally, even outside
    /// the eviction bounds (it will be evicted on the next step).
    pub fn launch(&mut self, position: Vector, velocity: Vector, color: Color) -> ParticleId {
        let id = self.allocate_id();
        log::debug!(
            "launching particle at ({}, {}) with velocity ({}, {})",
            position.x,
            position.y,
            velocity.x,
            velocity.y
        );
        self.particles.push(Particle::new(
            id,
            position,
            velocity,
            color,
            self.history_capacity,
        ));
        id
    }

    /// Queue a launch from another thread; it joins the live set at the
    /// start of the next `step`. The id is assigned immediately.
    pub fn enqueue(&self, position: Vector, velocity: Vector, color: Color) -> ParticleId {
        let id = self.allocate_id();
        self.queued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(QueuedLaunch {
                id,
                position,
                velocity,
                color,
            });
        id
    }

    fn drain_queued(&mut self) {
        let queued = std::mem::take(
            &mut *self.queued.lock().unwrap_or_else(PoisonError::into_inner),
        );
        for launch in queued {
            self.particles.push(Particle::new(
                launch.id,
                launch.position,
                launch.velocity,
                launch.color,
                self.history_capacity,
            ));
        }
    }

    /// Advance every live particle by one tick against the given field,
    /// then evict the ones that left the simulation region.
    pub fn step(&mut self, field: &dyn AccelerationField) {
        self.drain_queued();

        let game_speed = self.game_speed;
        for particle in &mut self.particles {
            particle.record_history();
            particle.integrate(field, game_speed);
        }

        let (width, height) = (self.width, self.height);
        let before = self.particles.len();
        self.particles
            .retain(|particle| !out_of_bounds(particle.position(), width, height));

        let evicted = before - self.particles.len();
        if evicted > 0 {
            log::debug!("evicted {evicted} out-of-bounds particles, {} live", self.particles.len());
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

/// Asymmetric eviction region: twice the canvas on the positive side, one
/// canvas on the negative side. Observed behavior, intentionally preserved.
#[inline]
fn out_of_bounds(position: Vector, width: Scalar, height: Scalar) -> bool {
    position.x > 2.0 * width
        || position.x < -width
        || position.y > 2.0 * height
        || position.y < -height
}
