//! Combat systems - damage and death handling.

use bevy::prelude::*;

use super::components::*;
use crate::core::AppState;
use crate::player::Player;

/// System set ordering for combat.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Damage,
    Death,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.configure_sets(
        Update,
        (CombatSet::Damage, CombatSet::Death)
            .chain()
            .run_if(in_state(AppState::InGame)),
    )
    .add_systems(Update, apply_damage.in_set(CombatSet::Damage))
    .add_systems(Update, check_deaths.in_set(CombatSet::Death));
}

/// Apply damage to entities.
pub fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<(&mut Health, Has<Dead>)>,
    mut death_events: EventWriter<DeathEvent>,
) {
    // Track entities that died this frame to avoid duplicate death events
    let mut died_this_frame = bevy::utils::HashSet::new();

    for event in damage_events.read() {
        if died_this_frame.contains(&event.target) {
            continue;
        }

        let Ok((mut health, dead)) = health_query.get_mut(event.target) else {
            continue;
        };

        // Skip if already dead (from previous frames)
        if dead {
            continue;
        }

        let taken = health.take_damage(event.amount);
        debug!(
            "{:?} took {} damage ({}/{})",
            event.target, taken, health.current, health.maximum
        );

        if health.is_dead() {
            died_this_frame.insert(event.target);
            commands.entity(event.target).insert(Dead);
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: Some(event.source),
            });
        }
    }
}

/// React to deaths. The player dying ends the session.
pub fn check_deaths(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    player_query: Query<Entity, With<Player>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for event in death_events.read() {
        if player_query.get(event.entity).is_ok() {
            info!("Player died! Transitioning to Game Over...");
            next_state.set(AppState::GameOver);
        } else {
            commands.entity(event.entity).despawn_recursive();
        }
    }
}
