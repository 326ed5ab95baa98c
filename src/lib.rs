//! Gravitoy library
//!
//! Engine for an interactive 2D gravity sandbox: place attractors, launch
//! test particles with fading trails, and preview launch trajectories. The
//! embedding application owns windowing, drawing, input capture, and frame
//! scheduling; this crate owns the simulation state and every numeric rule.

pub mod commands;
pub mod config;
pub mod physics;
pub mod prelude;
pub mod simulation;
pub mod utils;

// Re-export commonly used items
pub use commands::SimulationCommand;
pub use config::SimulationConfig;
pub use physics::math::{Scalar, Vector};
pub use simulation::Simulation;
