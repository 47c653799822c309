//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::data::{load_enemy_definitions, EnemyRegistry};
use crate::combat::CombatSet;
use crate::core::AppState;

/// Enemy plugin - handles enemy definitions and AI.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRegistry>()
            .add_systems(OnEnter(AppState::Loading), load_enemy_definitions)
            .add_systems(
                Update,
                (
                    ai::tick_attack_cooldowns,
                    ai::ai_attack_on_contact,
                    ai::ai_chase,
                )
                    .chain()
                    .before(CombatSet::Damage)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
