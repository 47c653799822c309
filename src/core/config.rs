//! Gameplay tuning loaded from an external RON file.
//!
//! Allows tweaking timings and limits without recompilation.

use bevy::prelude::*;
use serde::Deserialize;

use super::data::{load_ron, DATA_ROOT};
use super::error::DataLoadError;

/// Gameplay configuration loaded from assets/data/config/game.ron.
#[derive(Resource, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Inventory
    pub max_inventory_slots: usize,
    // Player
    pub player_move_speed: f32,
    pub player_max_health: f32,
    /// Radius in which interactables can be focused
    pub interaction_range: f32,
    // NPCs
    /// Seconds an NPC ignores repeated interactions
    pub interaction_debounce: f32,
    pub dialogue_duration: f32,
    /// Bubble hides when the player is farther than this
    pub dialogue_hide_distance: f32,
    // Post office
    pub post_office_cooldown: f32,
    // UI
    pub notification_duration: f32,
    /// Level file (without extension) under assets/data/levels
    pub starting_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_inventory_slots: 10,
            player_move_speed: 5.0,
            player_max_health: 100.0,
            interaction_range: 2.0,
            interaction_debounce: 0.5,
            dialogue_duration: 3.0,
            dialogue_hide_distance: 5.0,
            post_office_cooldown: 1.0,
            notification_duration: 3.0,
            starting_level: "harbor".to_string(),
        }
    }
}

impl GameConfig {
    pub const PATH: &'static str = "config/game.ron";

    /// Load the config file, falling back to defaults.
    pub fn load() -> Self {
        let path = format!("{}/{}", DATA_ROOT, Self::PATH);
        match load_ron::<GameConfig>(&path) {
            Ok(config) => {
                info!("Loaded game config from {}", path);
                config
            }
            Err(DataLoadError::FileNotFound(_)) => {
                warn!("Could not find {}. Using defaults.", path);
                Self::default()
            }
            Err(e) => {
                error!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }
}

/// System to load the game config while in the loading state.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    *config = GameConfig::load();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::parse_ron;
    use std::path::Path;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: GameConfig = parse_ron(
            Path::new("game.ron"),
            "(max_inventory_slots: 4, dialogue_duration: 1.5)",
        )
        .unwrap();
        assert_eq!(config.max_inventory_slots, 4);
        assert_eq!(config.dialogue_duration, 1.5);
        assert_eq!(config.interaction_range, 2.0);
        assert_eq!(config.starting_level, "harbor");
    }
}
