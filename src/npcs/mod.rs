//! NPCs module - townsfolk, their dialogue and mission hand-ins.

mod components;
pub mod data;
mod dialogue;
mod interaction;
mod plugin;

pub use components::*;
pub use data::{NpcDefinition, NpcRegistry};
pub use dialogue::{fallback_line, DialogueCursor, DialogueLines, LineSelection, NpcPhase};
pub use plugin::NpcPlugin;
