//! Rendering plugin - camera and background.

use bevy::prelude::*;

use super::camera;
use super::visual_config::{load_visual_config, VisualConfig};
use crate::core::AppState;

/// Rendering plugin - visual config and the follow camera.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VisualConfig>()
            .init_resource::<ClearColor>()
            .add_systems(OnEnter(AppState::Loading), load_visual_config);

        camera::setup_camera_systems(app);
    }
}
