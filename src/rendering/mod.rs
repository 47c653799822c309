//! Rendering module - camera follow and visual settings.

mod camera;
mod plugin;
pub mod visual_config;

pub use camera::{clamp_to_bounds, smooth_follow, MainCamera};
pub use plugin::RenderingPlugin;
pub use visual_config::VisualConfig;
