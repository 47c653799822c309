//! Core game module - states, events, config and fundamental systems.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
mod control;
pub mod data;
mod error;
mod events;
mod plugin;
mod states;

pub use config::{load_game_config, GameConfig};
pub use control::GameStateControl;
pub use error::DataLoadError;
pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
