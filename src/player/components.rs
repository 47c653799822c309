//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Movement input and the direction the player last moved in.
#[derive(Component, Debug)]
pub struct MovementState {
    /// Normalised input this frame (zero when idle)
    pub input: Vec2,
    /// Last non-zero input, used to keep facing while standing still
    pub last_direction: Vec2,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            input: Vec2::ZERO,
            // Facing right by default
            last_direction: Vec2::X,
        }
    }
}

impl MovementState {
    pub fn is_moving(&self) -> bool {
        self.input.length() > MOVE_THRESHOLD
    }
}

/// Input magnitude below which the player counts as standing still.
pub const MOVE_THRESHOLD: f32 = 0.1;
