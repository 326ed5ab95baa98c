//! The simulation context: one value owning the whole engine state
//!
//! Everything the external collaborators touch goes through this type: the
//! scheduler ticks it, the input layer applies commands to it, the renderer
//! reads its snapshots, and drag tasks predict against cloned field
//! snapshots. Owning the state in one passable value (instead of a global
//! model) keeps independent simulations and tests isolated.

use crate::commands::SimulationCommand;
use crate::config::{ColorSourceConfig, SimulationConfig};
use crate::physics::field::{GravityField, GravityObject};
use crate::physics::math::Vector;
use crate::physics::particle::Particle;
use crate::physics::prediction::{PredictedPath, TrajectoryPredictor};
use crate::physics::system::ParticleSystem;
use crate::utils::color::{ColorSource, RandomColorSource, RollColorSource};
use crate::utils::rng::RenderingRng;
use std::sync::Arc;

pub struct Simulation {
    config: SimulationConfig,
    field: GravityField,
    particles: ParticleSystem,
    colors: Box<dyn ColorSource>,
    predictor: Arc<TrajectoryPredictor>,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        let colors = color_source_from_config(&config);
        Self::with_color_source(config, colors)
    }

    /// Construct with an explicit color source (tests inject deterministic
    /// ones; embedders can supply their own palette).
    pub fn with_color_source(config: SimulationConfig, colors: Box<dyn ColorSource>) -> Self {
        let field = GravityField::new(
            config.physics.gravitational_constant,
            config.physics.force_cap,
        );
        let particles = ParticleSystem::new(&config);
        let predictor = Arc::new(TrajectoryPredictor::new(config.physics.game_speed));

        Self {
            config,
            field,
            particles,
            colors,
            predictor,
        }
    }

    /// Dispatch one discrete command from the input layer.
    pub fn apply(&mut self, command: SimulationCommand) {
        match command {
            SimulationCommand::PlaceSource { x, y, radius, mass } => {
                self.field.add(GravityObject::new(x, y, radius, mass));
            }
            SimulationCommand::CreateSourceCandidate { x, y, radius } => {
                if radius > self.config.physics.min_gravity_object_radius {
                    self.field.add(GravityObject::new(x, y, radius, radius));
                } else {
                    log::debug!("dropping sub-threshold source candidate (radius {radius})");
                }
            }
            SimulationCommand::RemoveSourcesNear { x, y } => {
                self.field.remove_near(Vector::new(x, y));
            }
            SimulationCommand::LaunchParticle { x, y, vx, vy } => {
                let color = self.colors.next_color();
                self.particles
                    .launch(Vector::new(x, y), Vector::new(vx, vy), color);
            }
            SimulationCommand::RequestPrediction { x, y, vx, vy } => {
                self.run_prediction(Vector::new(x, y), Vector::new(vx, vy));
            }
            SimulationCommand::ClearParticles => self.particles.clear(),
            SimulationCommand::ClearSources => self.field.clear(),
        }
    }

    /// Advance the live simulation by one tick.
    pub fn step(&mut self) {
        self.particles.step(&self.field);
    }

    /// Immutable copy of the field for a prediction task. Source edits made
    /// after the snapshot cannot affect a prediction computed from it.
    pub fn snapshot_field(&self) -> GravityField {
        self.field.clone()
    }

    /// Map a drag gesture to a launch velocity (the observed drag-to-speed
    /// divisor).
    pub fn drag_velocity(&self, drag_start: Vector, drag_end: Vector) -> Vector {
        (drag_start - drag_end) / self.config.prediction.launch_velocity_scale
    }

    /// Shareable handle for drag tasks that predict off the stepping thread.
    pub fn predictor(&self) -> Arc<TrajectoryPredictor> {
        Arc::clone(&self.predictor)
    }

    /// Predict synchronously with the current field and configured iteration
    /// count, publishing through the predictor's slot.
    pub fn run_prediction(&self, position: Vector, velocity: Vector) -> bool {
        self.predictor.run(
            position,
            velocity,
            &self.field,
            self.config.prediction.iterations,
        )
    }

    pub fn latest_prediction(&self) -> Option<Arc<PredictedPath>> {
        self.predictor.latest()
    }

    pub fn sources(&self) -> &[GravityObject] {
        self.field.sources()
    }

    pub fn particles(&self) -> &[Particle] {
        self.particles.particles()
    }

    pub fn particle_system(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn field(&self) -> &GravityField {
        &self.field
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

fn color_source_from_config(config: &SimulationConfig) -> Box<dyn ColorSource> {
    match config.colors.source {
        ColorSourceConfig::Random => Box::new(RandomColorSource::new(
            RenderingRng::from_optional_seed(config.colors.seed),
        )),
        ColorSourceConfig::Roll { offset_degrees } => {
            Box::new(RollColorSource::new(offset_degrees))
        }
    }
}
