//! World module - levels, tiles, and the post office.

pub mod data;
mod plugin;
mod post_office;
mod spawning;

pub use data::{
    LevelBounds, LevelDefinition, LevelRegistry, TileKind, PIXELS_PER_UNIT,
};
pub use plugin::WorldPlugin;
pub use post_office::{PostOffice, PostOfficePrompt};
pub use spawning::LevelEntity;
