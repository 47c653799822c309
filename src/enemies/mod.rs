//! Enemies module - enemy entities, AI, and spawning.

mod ai;
mod components;
pub mod data;
mod plugin;
mod spawning;

pub use ai::chase_speed;
pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry};
pub use plugin::EnemyPlugin;
pub use spawning::spawn_enemy;
