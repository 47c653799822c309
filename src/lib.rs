//! Abyssal Mail - a top-down underwater postal delivery game in Bevy.
//!
//! The player swims between NPCs, picks up delivery missions at the post
//! office and hands parcels over before the sea creatures catch up.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: App and game states, global events, config and data loading
//! - **Items**: Item definitions, the player's bag
//! - **Missions**: Mission log, accepting and completing deliveries
//! - **Player**: Movement, facing, interaction focus
//! - **Combat**: Health, damage and death
//! - **Enemies**: Chase AI and contact attacks
//! - **NPCs**: Dialogue bubbles, mission offers and deliveries
//! - **World**: Grid levels and the post office
//! - **Rendering**: Follow camera and visual config
//! - **UI**: HUD, mission board, pause and game over screens, toasts

pub mod combat;
pub mod core;
pub mod enemies;
pub mod items;
pub mod missions;
pub mod npcs;
pub mod player;
pub mod rendering;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
///
/// Physics and audio plugins are left to the binary so tests can build
/// headless apps from the sub-plugins.
pub struct AbyssalMailPlugin;

impl Plugin for AbyssalMailPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Data and bookkeeping
            .add_plugins(items::ItemsPlugin)
            .add_plugins(missions::MissionsPlugin)

            // Actors
            .add_plugins(player::PlayerPlugin)
            .add_plugins(combat::CombatPlugin)
            .add_plugins(enemies::EnemyPlugin)
            .add_plugins(npcs::NpcPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // Rendering systems
            .add_plugins(rendering::RenderingPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
