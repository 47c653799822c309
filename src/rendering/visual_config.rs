//! Visual configuration loaded from external RON file.
//!
//! Allows tweaking camera feel and colors without recompilation.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::data::{load_ron, DATA_ROOT};
use crate::core::DataLoadError;

/// Visual configuration loaded from assets/data/rendering/visual_config.ron.
#[derive(Resource, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    // Camera
    /// Higher follows the player more tightly
    pub camera_smooth_speed: f32,
    /// Offset from the player in world units
    pub camera_offset: (f32, f32),
    /// Keep the view inside the level
    pub camera_use_bounds: bool,
    /// Orthographic scale (below 1.0 zooms in)
    pub camera_zoom: f32,
    // Atmosphere
    pub clear_color: (f32, f32, f32),
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            camera_smooth_speed: 5.0,
            camera_offset: (0.0, 0.0),
            camera_use_bounds: true,
            camera_zoom: 0.75,
            // Deep sea blue
            clear_color: (0.02, 0.05, 0.1),
        }
    }
}

impl VisualConfig {
    pub const PATH: &'static str = "rendering/visual_config.ron";

    /// Load visual config from RON file.
    pub fn load() -> Self {
        let path = format!("{}/{}", DATA_ROOT, Self::PATH);
        match load_ron::<VisualConfig>(&path) {
            Ok(config) => {
                info!("Loaded visual config from {}", path);
                config
            }
            Err(DataLoadError::FileNotFound(_)) => {
                warn!("Could not read {}. Using defaults.", path);
                Self::default()
            }
            Err(e) => {
                error!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn clear_color(&self) -> Color {
        let (r, g, b) = self.clear_color;
        Color::srgb(r, g, b)
    }
}

/// System to load visual config and apply the background color.
pub fn load_visual_config(mut config: ResMut<VisualConfig>, mut clear_color: ResMut<ClearColor>) {
    *config = VisualConfig::load();
    clear_color.0 = config.clear_color();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::parse_ron;
    use std::path::Path;

    #[test]
    fn missing_fields_use_defaults() {
        let config: VisualConfig = parse_ron(
            Path::new("visual_config.ron"),
            "(camera_smooth_speed: 8.0, clear_color: (0.0, 0.0, 0.0))",
        )
        .unwrap();

        assert_eq!(config.camera_smooth_speed, 8.0);
        assert!(config.camera_use_bounds);
        assert_eq!(config.clear_color(), Color::srgb(0.0, 0.0, 0.0));
    }
}
