//! Player plugin - movement, facing and interaction.

use bevy::prelude::*;

use super::{interaction, movement};

/// Player plugin - handles player movement and interaction input.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        movement::setup_movement_systems(app);
        interaction::setup_interaction_systems(app);
    }
}
