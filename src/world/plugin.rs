//! World plugin - level loading, building and teardown.

use bevy::prelude::*;

use crate::core::{gameplay_active, AppState, GameConfig};
use crate::enemies::EnemyRegistry;
use crate::npcs::NpcRegistry;

use super::data::{load_level_definitions, LevelBounds, LevelRegistry};
use super::post_office::{handle_post_office_interactions, track_post_office_visitors};
use super::spawning::{build_level, LevelEntity};

/// World plugin - handles level loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelRegistry>()
            .init_resource::<LevelBounds>()
            .add_systems(OnEnter(AppState::Loading), load_level_definitions)
            .add_systems(OnEnter(AppState::InGame), setup_level)
            .add_systems(OnExit(AppState::InGame), cleanup_level)
            .add_systems(
                Update,
                (
                    track_post_office_visitors,
                    handle_post_office_interactions.run_if(gameplay_active),
                )
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

/// Set up the level from data.
pub fn setup_level(
    mut commands: Commands,
    config: Res<GameConfig>,
    levels: Res<LevelRegistry>,
    npcs: Res<NpcRegistry>,
    enemies: Res<EnemyRegistry>,
    mut bounds: ResMut<LevelBounds>,
) {
    let Some(level) = levels.get(&config.starting_level) else {
        error!("Level '{}' not found in registry!", config.starting_level);
        return;
    };

    info!("Building level: {}", level.name);
    build_level(&mut commands, level, &config, &npcs, &enemies);
    bounds.0 = Rect::from_corners(Vec2::ZERO, level.size_pixels());
}

/// Clean up level entities when leaving InGame state.
fn cleanup_level(mut commands: Commands, level_query: Query<Entity, With<LevelEntity>>) {
    let mut count = 0;
    for entity in level_query.iter() {
        commands.entity(entity).despawn_recursive();
        count += 1;
    }
    debug!("Despawned {} level entities", count);
}
