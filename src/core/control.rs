//! The single entry point for changing the in-game state.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::states::{GameFlow, GameState, GameStateChanged};

/// System parameter bundling everything a state change touches.
///
/// Setting a state freezes virtual time for `Paused`, unfreezes it for any
/// other state, and sends exactly one `GameStateChanged`.
#[derive(SystemParam)]
pub struct GameStateControl<'w> {
    flow: ResMut<'w, GameFlow>,
    time: ResMut<'w, Time<Virtual>>,
    changes: EventWriter<'w, GameStateChanged>,
}

impl GameStateControl<'_> {
    pub fn current(&self) -> GameState {
        self.flow.current()
    }

    pub fn set(&mut self, next: GameState) {
        let change = self.flow.transition(next);

        if next.freezes_time() {
            self.time.pause();
        } else {
            self.time.unpause();
        }

        self.changes.send(change);
        info!("Game state: {:?} -> {:?}", change.previous, change.current);
    }
}
