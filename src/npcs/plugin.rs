//! NPC plugin - definitions, conversations and delivery feedback.

use bevy::prelude::*;

use super::components::DeliveryCompleted;
use super::data::{load_npc_definitions, NpcRegistry};
use super::interaction::{handle_npc_interactions, hide_dialogue, play_delivery_sound};
use crate::core::{gameplay_active, AppState};
use crate::missions::data::load_mission_definitions;

pub struct NpcPlugin;

impl Plugin for NpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NpcRegistry>()
            .add_event::<DeliveryCompleted>()
            .add_systems(
                OnEnter(AppState::Loading),
                load_npc_definitions.after(load_mission_definitions),
            )
            .add_systems(
                Update,
                (
                    handle_npc_interactions.run_if(gameplay_active),
                    hide_dialogue,
                    play_delivery_sound,
                )
                    .chain()
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
