//! Core plugin that sets up states, events, config and the loading flow.

use bevy::prelude::*;

use super::config::{load_game_config, GameConfig};
use super::control::GameStateControl;
use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - The `AppState` lifecycle and the `GameFlow` resource
/// - Global events (damage, death, interaction, notifications)
/// - Game config loading
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // States
            .init_state::<AppState>()
            .init_resource::<GameFlow>()
            .init_resource::<GameConfig>()

            // Global events
            .add_event::<GameStateChanged>()
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<InteractEvent>()
            .add_event::<NotifyEvent>()

            // Data loaders of other plugins also run on entering Loading
            .add_systems(
                OnEnter(AppState::Loading),
                (load_game_config, finish_loading).chain(),
            )

            // Every session starts out exploring with time running
            .add_systems(OnEnter(AppState::InGame), start_exploring);
    }
}

/// Leave the loading state once every OnEnter(Loading) loader has run.
fn finish_loading(mut next_state: ResMut<NextState<AppState>>) {
    next_state.set(AppState::InGame);
}

fn start_exploring(mut control: GameStateControl) {
    control.set(GameState::Exploring);
}
