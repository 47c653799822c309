//! Game state definitions that control the overall flow of the game.
//!
//! Two layers are tracked. `AppState` is the Bevy scene lifecycle (loading,
//! playing, game over) and decides which plugins' systems are alive.
//! `GameState` is the in-game mode the player is in; it is held by the
//! `GameFlow` resource and changed only through `GameStateControl` so that
//! every change applies the pause side effect and notifies listeners.

use bevy::prelude::*;

/// Scene lifecycle states.
///
/// - Start in `Loading` to read data files
/// - Move to `InGame` as soon as the registries are filled
/// - `GameOver` when the player dies; retrying re-enters `InGame`
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Reading data files into registries
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Player has died
    GameOver,
}

/// In-game mode of the player.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Normal gameplay - movement, interaction, enemies active
    #[default]
    Exploring,
    /// An NPC dialogue bubble is showing
    InDialogue,
    /// The mission menu is open
    InMenu,
    /// Pause menu is open and simulation time is frozen
    Paused,
}

impl GameState {
    /// Whether the player may walk around in this state.
    pub fn allows_movement(self) -> bool {
        matches!(self, GameState::Exploring | GameState::InDialogue)
    }

    /// Whether simulation time runs in this state.
    pub fn freezes_time(self) -> bool {
        self == GameState::Paused
    }

    /// State to switch to when a menu key is pressed, if any.
    pub fn after_key(self, key: MenuKey) -> Option<GameState> {
        match key {
            MenuKey::Missions => match self {
                GameState::Paused => None,
                GameState::InMenu => Some(GameState::Exploring),
                _ => Some(GameState::InMenu),
            },
            MenuKey::Pause => match self {
                GameState::Paused => Some(GameState::Exploring),
                _ => Some(GameState::Paused),
            },
        }
    }
}

/// Keys that open or close a menu.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MenuKey {
    /// M or Tab
    Missions,
    /// Escape
    Pause,
}

/// Holder of the current `GameState`.
#[derive(Resource, Debug, Default)]
pub struct GameFlow {
    current: GameState,
}

impl GameFlow {
    pub fn current(&self) -> GameState {
        self.current
    }

    pub fn is(&self, state: GameState) -> bool {
        self.current == state
    }

    /// Record a transition. Re-entering the current state is still a
    /// transition and yields a notification.
    pub fn transition(&mut self, next: GameState) -> GameStateChanged {
        let previous = std::mem::replace(&mut self.current, next);
        GameStateChanged {
            previous,
            current: next,
        }
    }
}

/// Sent once for every call that sets the game state.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStateChanged {
    pub previous: GameState,
    pub current: GameState,
}

/// Run condition: the game is in the given state.
pub fn in_game_state(state: GameState) -> impl FnMut(Res<GameFlow>) -> bool + Clone {
    move |flow: Res<GameFlow>| flow.is(state)
}

/// Run condition: the world is live (not in a menu or paused).
pub fn gameplay_active(flow: Res<GameFlow>) -> bool {
    flow.current().allows_movement()
}
