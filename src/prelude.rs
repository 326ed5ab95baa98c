//! Gravitoy prelude module
//!
//! Re-exports the most commonly used types, traits, and functions so
//! embedding applications can get by with a single import.

// External crate re-exports
pub use rand::Rng;

// Internal re-exports - Config
pub use crate::config::{ColorSourceConfig, SimulationConfig};

// Internal re-exports - Commands and context
pub use crate::commands::SimulationCommand;
pub use crate::simulation::Simulation;

// Internal re-exports - Physics
pub use crate::physics::field::{AccelerationField, GravityField, GravityObject};
pub use crate::physics::history::HistoryBuffer;
pub use crate::physics::math::{Scalar, Vector};
pub use crate::physics::particle::{Particle, ParticleId};
pub use crate::physics::prediction::{PredictedPath, PredictionSlot, TrajectoryPredictor};
pub use crate::physics::system::ParticleSystem;

// Internal re-exports - Utilities
pub use crate::utils::color::{Color, ColorSource, RandomColorSource, RollColorSource};
pub use crate::utils::rng::{RenderingRng, SharedRng};
