use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::TerrainError;

pub const SETTINGS_PATH: &str = "assets/terrain.toml";

#[derive(Clone, Debug, Deserialize, PartialEq, Resource)]
#[serde(default)]
pub struct TerrainSettings {
    /// Quads per grid edge
    pub resolution: i32,
    /// Height-map asset path, relative to the asset folder
    pub heightmap: String,
    pub wireframe: bool,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            resolution: 20,
            heightmap: "heightmap.png".to_string(),
            wireframe: false,
        }
    }
}

impl TerrainSettings {
    pub fn from_toml_str(contents: &str) -> Result<Self, TerrainError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, TerrainError> {
        let path = path.as_ref();

        if !path.exists() {
            info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&contents)?;
        debug!("Loaded {settings:?} from {}", path.display());

        Ok(settings)
    }
}
