//! Items module - item definitions and the player inventory.

pub mod data;
mod inventory;
mod plugin;

pub use data::{ItemDefinition, ItemId, ItemRegistry, ItemType};
pub use inventory::{Inventory, InventoryError, InventorySlot};
pub use plugin::ItemsPlugin;
