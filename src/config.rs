//! Simulation configuration
//!
//! All numeric knobs of the engine live here, grouped the way the embedding
//! application thinks about them. Values can be built in code, loaded from a
//! TOML file, or taken from one of the presets; historical variants of the
//! sandbox that differed only in tuning are expressed as presets rather than
//! separate code paths.

use crate::physics::math::Scalar;
use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct SimulationConfig {
    pub bounds: BoundsConfig,
    pub physics: PhysicsConfig,
    pub trails: TrailsConfig,
    pub prediction: PredictionConfig,
    pub colors: ColorsConfig,
}

/// Extent of the simulation region. Particles are evicted once they leave
/// the asymmetric envelope derived from these bounds (twice the bound on the
/// positive side, one bound on the negative side).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct BoundsConfig {
    pub canvas_width: Scalar,
    pub canvas_height: Scalar,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1500.0,
            canvas_height: 900.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Multiplier applied to a source's mass before the inverse-square
    /// falloff (K in `force = K * mass / d²`).
    pub gravitational_constant: Scalar,
    /// Upper bound on any single source's acceleration contribution.
    pub force_cap: Scalar,
    /// Scales the position increment only; velocity accumulates raw
    /// acceleration regardless. A display-speed knob, not a timestep.
    pub game_speed: Scalar,
    /// Drag-created sources below this radius are silently discarded.
    pub min_gravity_object_radius: Scalar,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: 1000.0,
            force_cap: 2.0,
            game_speed: 0.25,
            min_gravity_object_radius: 5.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct TrailsConfig {
    /// Number of past positions each particle keeps for its fading trail.
    pub history_capacity: usize,
}

impl Default for TrailsConfig {
    fn default() -> Self {
        Self {
            history_capacity: 20,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PredictionConfig {
    /// Number of integration steps sampled per preview path.
    pub iterations: usize,
    /// Divisor mapping a drag gesture in canvas units to a launch velocity.
    pub launch_velocity_scale: Scalar,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            launch_velocity_scale: 10.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ColorsConfig {
    /// Seed for the rendering RNG; `None` seeds from OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub source: ColorSourceConfig,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            seed: None,
            source: ColorSourceConfig::default(),
        }
    }
}

/// Which identity-color generator newly launched particles draw from.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColorSourceConfig {
    /// Uniformly random hue per launch.
    Random,
    /// Deterministic hue roll advancing by a fixed offset per launch.
    Roll { offset_degrees: f32 },
}

impl Default for ColorSourceConfig {
    fn default() -> Self {
        Self::Roll {
            offset_degrees: 17.0,
        }
    }
}

impl SimulationConfig {
    /// Tuning that trades preview length for responsiveness:
    /// quarter-length prediction, everything else as the default.
    pub fn quick_preview() -> Self {
        Self {
            prediction: PredictionConfig {
                iterations: 250,
                ..PredictionConfig::default()
            },
            ..Self::default()
        }
    }

    /// Load configuration from a file, falling back to defaults if the file
    /// doesn't exist or fails to parse.
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse config file {path}: {e}. Using defaults.");
                    Self::default()
                }
            },
            Err(_) => {
                info!("Config file {path} not found. Using defaults.");
                Self::default()
            }
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_observed_tuning() {
        let config = SimulationConfig::default();

        assert_eq!(config.bounds.canvas_width, 1500.0);
        assert_eq!(config.bounds.canvas_height, 900.0);
        assert_eq!(config.physics.gravitational_constant, 1000.0);
        assert_eq!(config.physics.force_cap, 2.0);
        assert_eq!(config.physics.game_speed, 0.25);
        assert_eq!(config.physics.min_gravity_object_radius, 5.0);
        assert_eq!(config.trails.history_capacity, 20);
        assert_eq!(config.prediction.iterations, 1000);
        assert_eq!(config.prediction.launch_velocity_scale, 10.0);
    }

    #[test]
    fn test_quick_preview_preset_only_changes_iterations() {
        let preset = SimulationConfig::quick_preview();
        let default = SimulationConfig::default();

        assert_eq!(preset.prediction.iterations, 250);
        assert_eq!(preset.physics, default.physics);
        assert_eq!(preset.bounds, default.bounds);
        assert_eq!(preset.trails, default.trails);
        assert_eq!(
            preset.prediction.launch_velocity_scale,
            default.prediction.launch_velocity_scale
        );
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = SimulationConfig::quick_preview();
        config.colors.seed = Some(99);
        config.colors.source = ColorSourceConfig::Random;

        let serialized = toml::to_string_pretty(&config).expect("serializes");
        let deserialized: SimulationConfig = toml::from_str(&serialized).expect("parses");

        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_partial_toml_parses_with_serde_defaults_absent() {
        // A full section must round-trip; unknown files fall back instead.
        let text = r#"
            [bounds]
            canvas_width = 800.0
            canvas_height = 600.0

            [physics]
            gravitational_constant = 500.0
            force_cap = 1.0
            game_speed = 0.5
            min_gravity_object_radius = 2.0

            [trails]
            history_capacity = 5

            [prediction]
            iterations = 100
            launch_velocity_scale = 8.0

            [colors]

            [colors.source]
            mode = "roll"
            offset_degrees = 30.0
        "#;

        let config: SimulationConfig = toml::from_str(text).expect("parses");
        assert_eq!(config.bounds.canvas_width, 800.0);
        assert_eq!(config.trails.history_capacity, 5);
        assert_eq!(
            config.colors.source,
            ColorSourceConfig::Roll {
                offset_degrees: 30.0
            }
        );
        assert_eq!(config.colors.seed, None);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = SimulationConfig::load_or_default("/nonexistent/gravitoy.toml");
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let mut path = std::env::temp_dir();
        path.push(format!("gravitoy-config-{}.toml", std::process::id()));
        let path = path.to_string_lossy().into_owned();

        let mut config = SimulationConfig::default();
        config.physics.game_speed = 0.125;
        config.save(&path).expect("saves");

        let reloaded = SimulationConfig::load_or_default(&path);
        assert_eq!(reloaded, config);

        let _ = std::fs::remove_file(&path);
    }
}
