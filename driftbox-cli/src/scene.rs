//! Scene file: simulation parameters plus presentation settings

use driftbox_core::{ConfigError, SimulationParameters};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_COLOR: [u8; 3] = [0x4f, 0xc3, 0xf7];

fn default_color() -> [u8; 3] {
    DEFAULT_COLOR
}

/// Everything a scene file can set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(flatten)]
    pub params: SimulationParameters,
    /// Particle color, `[r, g, b]`
    #[serde(default = "default_color")]
    pub color: [u8; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            params: SimulationParameters::default(),
            color: DEFAULT_COLOR,
        }
    }
}

impl SceneConfig {
    /// Load a scene and force its parameters into their declared ranges
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        let mut scene: SceneConfig = serde_json::from_str(&source)?;

        if let Err(e) = scene.params.validate() {
            log::warn!("{}: {}; clamping", path.display(), e);
            scene.params = scene.params.clamped();
        }
        Ok(scene)
    }

    /// Load `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_reads_flat_parameters_and_color() {
        let scene: SceneConfig =
            serde_json::from_str(r#"{ "gravity": 0.5, "color": [255, 0, 128] }"#).unwrap();
        assert_eq!(scene.params.gravity, 0.5);
        assert_eq!(scene.params.friction, SimulationParameters::default().friction);
        assert_eq!(scene.color, [255, 0, 128]);
    }

    #[test]
    fn test_scene_without_color_uses_default() {
        let scene: SceneConfig = serde_json::from_str(r#"{ "particleCount": 10 }"#).unwrap();
        assert_eq!(scene.params.particle_count, 10);
        assert_eq!(scene.color, DEFAULT_COLOR);
    }
}
