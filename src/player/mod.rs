//! Player module - player entity, movement, and interaction.

mod components;
mod interaction;
mod movement;
mod plugin;

pub use components::*;
pub use interaction::{nearest_within, Interactable, InteractionFocus, InteractionLock};
pub use movement::{facing_for, spawn_player, Facing, PlayerSprite};
pub use plugin::PlayerPlugin;
