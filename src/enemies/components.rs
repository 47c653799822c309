//! Enemy-related components.

use bevy::prelude::*;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches RON file name).
#[derive(Component, Clone, Debug)]
pub struct EnemyType(pub String);

/// AI state machine for enemy behavior.
#[derive(Component, Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum AiState {
    /// Player out of range (or inside stopping distance).
    #[default]
    Idle,
    /// Moving toward the player.
    Chasing,
    /// Holding still after a hit until the cooldown runs out.
    Recovering,
    /// The player is dead; nothing left to do.
    Stopped,
}

/// Enemy stats loaded from RON data files. Distances are in world units.
#[derive(Component, Clone, Debug)]
pub struct EnemyStats {
    pub damage: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub detection_range: f32,
    pub stopping_distance: f32,
    pub attack_cooldown: f32,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            damage: 34.0,
            speed_min: 2.0,
            speed_max: 6.0,
            detection_range: 10.0,
            stopping_distance: 0.5,
            attack_cooldown: 3.0,
        }
    }
}

/// Present while an enemy recovers from an attack.
#[derive(Component)]
pub struct AttackCooldown(pub Timer);

impl AttackCooldown {
    pub fn new(seconds: f32) -> Self {
        Self(Timer::from_seconds(seconds, TimerMode::Once))
    }
}
