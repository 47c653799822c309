//! Enemy AI behavior systems.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{AiState, AttackCooldown, Enemy, EnemyStats};
use crate::combat::Dead;
use crate::core::{DamageEvent, GameFlow};
use crate::player::Player;
use crate::world::PIXELS_PER_UNIT;

/// Chase speed for a player `distance` units away, or `None` when the enemy
/// should stand still (out of range or close enough already).
///
/// Speed ramps linearly from `speed_min` at the edge of the detection range
/// to `speed_max` on top of the player.
pub fn chase_speed(distance: f32, stats: &EnemyStats) -> Option<f32> {
    if distance > stats.detection_range || distance <= stats.stopping_distance {
        return None;
    }
    let t = (1.0 - distance / stats.detection_range).clamp(0.0, 1.0);
    Some(stats.speed_min + (stats.speed_max - stats.speed_min) * t)
}

/// Chase the player while in detection range.
pub fn ai_chase(
    flow: Res<GameFlow>,
    player_query: Query<(&Transform, Has<Dead>), (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<
        (&Transform, &EnemyStats, &mut AiState, &mut Velocity),
        (With<Enemy>, Without<Player>, Without<AttackCooldown>),
    >,
) {
    let Ok((player_transform, player_dead)) = player_query.get_single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();
    let active = flow.current().allows_movement();

    for (enemy_transform, stats, mut ai_state, mut velocity) in enemy_query.iter_mut() {
        if player_dead || *ai_state == AiState::Stopped {
            if *ai_state != AiState::Stopped {
                debug!("Player dead, enemy stops");
                *ai_state = AiState::Stopped;
            }
            velocity.linvel = Vec2::ZERO;
            continue;
        }

        if !active {
            velocity.linvel = Vec2::ZERO;
            continue;
        }

        let offset = player_pos - enemy_transform.translation.truncate();
        let distance = offset.length() / PIXELS_PER_UNIT;

        match chase_speed(distance, stats) {
            Some(speed) => {
                *ai_state = AiState::Chasing;
                velocity.linvel = offset.normalize_or_zero() * speed * PIXELS_PER_UNIT;
            }
            None => {
                *ai_state = AiState::Idle;
                velocity.linvel = Vec2::ZERO;
            }
        }
    }
}

/// Hit the player on contact, then hold still for the cooldown.
pub fn ai_attack_on_contact(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    player_query: Query<Has<Dead>, With<Player>>,
    mut enemy_query: Query<
        (&EnemyStats, &mut AiState, &mut Velocity, Has<AttackCooldown>),
        With<Enemy>,
    >,
    mut damage_events: EventWriter<DamageEvent>,
) {
    for event in collisions.read() {
        let CollisionEvent::Started(a, b, _) = event else {
            continue;
        };

        let (enemy, player) = if enemy_query.contains(*a) && player_query.contains(*b) {
            (*a, *b)
        } else if enemy_query.contains(*b) && player_query.contains(*a) {
            (*b, *a)
        } else {
            continue;
        };

        if player_query.get(player).unwrap_or(true) {
            continue;
        }

        let Ok((stats, mut ai_state, mut velocity, cooling_down)) = enemy_query.get_mut(enemy)
        else {
            continue;
        };
        if cooling_down || *ai_state == AiState::Stopped {
            continue;
        }

        damage_events.send(DamageEvent {
            target: player,
            source: enemy,
            amount: stats.damage,
        });
        debug!("{:?} hit the player for {}", enemy, stats.damage);

        *ai_state = AiState::Recovering;
        velocity.linvel = Vec2::ZERO;
        commands
            .entity(enemy)
            .insert(AttackCooldown::new(stats.attack_cooldown));
    }
}

/// Let recovering enemies move again once their cooldown expires.
pub fn tick_attack_cooldowns(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut AttackCooldown, &mut AiState, &mut Velocity)>,
) {
    for (entity, mut cooldown, mut ai_state, mut velocity) in query.iter_mut() {
        // Stand still for the whole cooldown, even if pushed
        velocity.linvel = Vec2::ZERO;

        if cooldown.0.tick(time.delta()).finished() {
            commands.entity(entity).remove::<AttackCooldown>();
            if *ai_state == AiState::Recovering {
                *ai_state = AiState::Idle;
            }
        }
    }
}
