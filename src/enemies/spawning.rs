//! Enemy spawning from level placements.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{AiState, Enemy, EnemyType};
use super::data::EnemyDefinition;
use crate::world::PIXELS_PER_UNIT;

/// Spawn one enemy at a position in pixels.
pub fn spawn_enemy(
    commands: &mut Commands,
    enemy_type: &str,
    definition: &EnemyDefinition,
    position: Vec2,
) -> Entity {
    let radius = definition.radius * PIXELS_PER_UNIT;
    let (r, g, b) = definition.color;

    let entity = commands
        .spawn((
            Enemy,
            EnemyType(enemy_type.to_string()),
            AiState::default(),
            definition.to_stats(),
            Sprite::from_color(Color::srgb(r, g, b), Vec2::splat(radius * 2.0)),
            Transform::from_translation(position.extend(1.5)),
            RigidBody::Dynamic,
            Collider::ball(radius),
            Velocity::zero(),
            GravityScale(0.0),
            LockedAxes::ROTATION_LOCKED,
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id();

    info!("Spawned {} at {:?}", definition.name, position);
    entity
}
