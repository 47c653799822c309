//! Entity spawning functions for level construction.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::data::{LevelDefinition, TileKind, PIXELS_PER_UNIT};
use super::post_office::spawn_post_office;
use crate::core::GameConfig;
use crate::enemies::{spawn_enemy, EnemyRegistry};
use crate::npcs::{spawn_npc, NpcRegistry};
use crate::player::spawn_player;

/// Marker for everything that belongs to the current level.
#[derive(Component)]
pub struct LevelEntity;

/// Spawn floor and wall tiles. Solid tiles get a fixed collider.
pub fn spawn_tiles(commands: &mut Commands, level: &LevelDefinition) {
    let tile_pixels = level.tile_size * PIXELS_PER_UNIT;
    let mut solid = 0;

    for (y, row) in level.tiles.iter().enumerate() {
        for (x, tile) in row.iter().enumerate() {
            if tile.kind == TileKind::Void {
                continue;
            }

            let position = level.grid_to_pixels(x as i32, y as i32);
            let (r, g, b) = tile.color;
            let mut entity = commands.spawn((
                Sprite::from_color(Color::srgb(r, g, b), Vec2::splat(tile_pixels)),
                Transform::from_translation(position.extend(0.0)),
                LevelEntity,
            ));

            if tile.kind.is_solid() {
                entity.insert((
                    RigidBody::Fixed,
                    Collider::cuboid(tile_pixels * 0.5, tile_pixels * 0.5),
                ));
                solid += 1;
            }
        }
    }

    debug!("Spawned {}x{} tiles ({} solid)", level.width, level.height, solid);
}

/// Spawn the level's NPCs. Unknown NPC ids are skipped with a warning.
pub fn spawn_level_npcs(commands: &mut Commands, level: &LevelDefinition, npcs: &NpcRegistry) {
    for placement in &level.npcs {
        let Some(definition) = npcs.get(&placement.npc) else {
            warn!("Unknown NPC in level {}: {}", level.name, placement.npc);
            continue;
        };
        let position = level.grid_to_pixels(placement.at.0, placement.at.1);
        let npc = spawn_npc(commands, definition, position);
        commands.entity(npc).insert(LevelEntity);
    }
}

/// Spawn the level's enemies.
pub fn spawn_level_enemies(
    commands: &mut Commands,
    level: &LevelDefinition,
    enemies: &EnemyRegistry,
) {
    for placement in &level.enemies {
        let Some(definition) = enemies.get(&placement.enemy) else {
            warn!("Unknown enemy type in level {}: {}", level.name, placement.enemy);
            continue;
        };
        let position = level.grid_to_pixels(placement.at.0, placement.at.1);
        let enemy = spawn_enemy(commands, &placement.enemy, definition, position);
        commands.entity(enemy).insert(LevelEntity);
    }
}

/// Build the whole level and put the player in it.
pub fn build_level(
    commands: &mut Commands,
    level: &LevelDefinition,
    config: &GameConfig,
    npcs: &NpcRegistry,
    enemies: &EnemyRegistry,
) {
    spawn_tiles(commands, level);

    if let Some((x, y)) = level.post_office {
        let office = spawn_post_office(commands, level.grid_to_pixels(x, y));
        commands.entity(office).insert(LevelEntity);
    }

    spawn_level_npcs(commands, level, npcs);
    spawn_level_enemies(commands, level, enemies);

    let (x, y) = level.player_start;
    let player = spawn_player(commands, level.grid_to_pixels(x, y), config);
    commands.entity(player).insert(LevelEntity);
}
