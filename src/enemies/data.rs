//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::components::EnemyStats;
use crate::core::data::{load_ron_dir, DATA_ROOT};

fn default_radius() -> f32 {
    0.4
}

fn default_color() -> (f32, f32, f32) {
    (0.55, 0.2, 0.35)
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub damage: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub detection_range: f32,
    pub stopping_distance: f32,
    pub attack_cooldown: f32,
    /// Collider radius in world units
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_color")]
    pub color: (f32, f32, f32),
}

impl EnemyDefinition {
    /// Convert to EnemyStats component.
    pub fn to_stats(&self) -> EnemyStats {
        EnemyStats {
            damage: self.damage,
            speed_min: self.speed_min,
            speed_max: self.speed_max,
            detection_range: self.detection_range,
            stopping_distance: self.stopping_distance,
            attack_cooldown: self.attack_cooldown,
        }
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new(DATA_ROOT).join("enemies");

    for (enemy_type, definition) in load_ron_dir::<EnemyDefinition>(&enemies_dir) {
        info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
        registry.definitions.insert(enemy_type, definition);
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}
