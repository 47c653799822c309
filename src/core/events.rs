//! Global events used for cross-system communication.
//!
//! Events keep the domains decoupled: enemies send `DamageEvent`s without
//! knowing about the HUD, NPCs send `NotifyEvent`s without knowing how
//! toasts are drawn.

use bevy::prelude::*;

/// Sent when an entity takes damage.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    pub amount: f32,
}

/// Sent when an entity's health reaches 0.
#[derive(Event, Debug, Clone, Copy)]
pub struct DeathEvent {
    pub entity: Entity,
    pub killed_by: Option<Entity>,
}

/// Sent when the player presses the interact key on a focused interactable.
#[derive(Event, Debug, Clone, Copy)]
pub struct InteractEvent {
    /// The interactable entity
    pub target: Entity,
    /// The player entity
    pub player: Entity,
}

/// Short on-screen message for the player.
#[derive(Event, Debug, Clone)]
pub struct NotifyEvent {
    pub message: String,
}

impl NotifyEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
