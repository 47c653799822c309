//! Combat plugin - damage application and death handling.

use bevy::prelude::*;

use super::systems;

/// Combat plugin - handles all damage and death systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_combat_systems(app);
    }
}
