//! Items plugin - item registry loading and inventory lifecycle.

use bevy::prelude::*;

use super::data::{load_item_definitions, ItemRegistry};
use super::inventory::Inventory;
use crate::core::{AppState, GameConfig};

/// Items plugin - loads item definitions and gives each session a fresh bag.
pub struct ItemsPlugin;

impl Plugin for ItemsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ItemRegistry>()
            .init_resource::<Inventory>()
            .add_systems(OnEnter(AppState::Loading), load_item_definitions)
            .add_systems(OnEnter(AppState::InGame), reset_inventory);
    }
}

/// Empty the inventory at the start of a session.
pub fn reset_inventory(mut inventory: ResMut<Inventory>, config: Res<GameConfig>) {
    *inventory = Inventory::new(config.max_inventory_slots);
}
