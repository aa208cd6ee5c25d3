//! Simulation parameters and their declared ranges
//!
//! The parameter record is read once per frame by the simulation. A
//! configuration surface (the viewer's sliders, a JSON file) is expected to
//! hand the core values inside the declared ranges; `clamped` produces such a
//! record from arbitrary input and `validate` reports what is wrong with it.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or checking parameters
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read parameters: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid parameter file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },
}

/// Inclusive numeric range of a parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

pub const ATTRACTION_RANGE: ParamRange = ParamRange::new(0.0, 0.5);
pub const REPULSION_RANGE: ParamRange = ParamRange::new(0.0, 0.5);
pub const MAX_SPEED_RANGE: ParamRange = ParamRange::new(0.0, 20.0);
pub const PARTICLE_SIZE_RANGE: ParamRange = ParamRange::new(2.0, 20.0);
pub const GRAVITY_RANGE: ParamRange = ParamRange::new(0.0, 2.0);
pub const FRICTION_RANGE: ParamRange = ParamRange::new(0.90, 1.0);
pub const STOP_THRESHOLD_RANGE: ParamRange = ParamRange::new(0.01, 0.2);

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationParameters {
    /// Only applied when the particle list is reseeded
    pub particle_count: usize,
    pub attraction_strength: f32,
    pub repulsion_strength: f32,
    /// Per-frame speed cap
    pub max_speed: f32,
    /// Radius shared by every particle
    pub particle_size: f32,
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Velocity multiplier applied each frame
    pub friction: f32,
    /// Speed below which a particle is snapped to rest
    pub stop_threshold: f32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            particle_count: 2000,
            attraction_strength: 0.05,
            repulsion_strength: 0.05,
            max_speed: 10.0,
            particle_size: 4.0,
            gravity: 0.1,
            friction: 0.99,
            stop_threshold: 0.05,
        }
    }
}

impl SimulationParameters {
    fn float_fields(&self) -> [(&'static str, f32, ParamRange); 7] {
        [
            ("attractionStrength", self.attraction_strength, ATTRACTION_RANGE),
            ("repulsionStrength", self.repulsion_strength, REPULSION_RANGE),
            ("maxSpeed", self.max_speed, MAX_SPEED_RANGE),
            ("particleSize", self.particle_size, PARTICLE_SIZE_RANGE),
            ("gravity", self.gravity, GRAVITY_RANGE),
            ("friction", self.friction, FRICTION_RANGE),
            ("stopThreshold", self.stop_threshold, STOP_THRESHOLD_RANGE),
        ]
    }

    /// Check every field against its declared range
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value, range) in self.float_fields() {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
            if !range.contains(value) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }

    /// Copy of these parameters with every field forced into its range
    ///
    /// Non-finite values fall back to the default for that field.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let fix = |value: f32, fallback: f32, range: ParamRange| {
            if value.is_finite() {
                range.clamp(value)
            } else {
                fallback
            }
        };

        Self {
            particle_count: self.particle_count,
            attraction_strength: fix(
                self.attraction_strength,
                defaults.attraction_strength,
                ATTRACTION_RANGE,
            ),
            repulsion_strength: fix(
                self.repulsion_strength,
                defaults.repulsion_strength,
                REPULSION_RANGE,
            ),
            max_speed: fix(self.max_speed, defaults.max_speed, MAX_SPEED_RANGE),
            particle_size: fix(
                self.particle_size,
                defaults.particle_size,
                PARTICLE_SIZE_RANGE,
            ),
            gravity: fix(self.gravity, defaults.gravity, GRAVITY_RANGE),
            friction: fix(self.friction, defaults.friction, FRICTION_RANGE),
            stop_threshold: fix(
                self.stop_threshold,
                defaults.stop_threshold,
                STOP_THRESHOLD_RANGE,
            ),
        }
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}
