//! Item definitions loaded from assets/data/items.ron.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

use crate::core::data::{load_ron, DATA_ROOT};

/// Identifier of an item definition (matches the `id` field in items.ron).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Broad category of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ItemType {
    /// Letters, messages
    Document,
    Package,
    /// Collectable resources
    Resource,
    /// Special mission items
    KeyItem,
    Consumable,
}

/// Immutable item definition.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: ItemType,
    #[serde(default)]
    pub quest_item: bool,
    #[serde(default = "default_value")]
    pub value: u32,
}

fn default_value() -> u32 {
    10
}

/// Resource holding all loaded item definitions.
#[derive(Resource, Default)]
pub struct ItemRegistry {
    pub definitions: HashMap<ItemId, ItemDefinition>,
}

impl ItemRegistry {
    pub const PATH: &'static str = "items.ron";

    pub fn from_definitions(definitions: impl IntoIterator<Item = ItemDefinition>) -> Self {
        Self {
            definitions: definitions
                .into_iter()
                .map(|def| (def.id.clone(), def))
                .collect(),
        }
    }

    pub fn get(&self, id: &ItemId) -> Option<&ItemDefinition> {
        self.definitions.get(id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.definitions.contains_key(id)
    }

    /// Display name of an item, falling back to its id.
    pub fn name_of<'a>(&'a self, id: &'a ItemId) -> &'a str {
        self.get(id).map_or(id.as_str(), |def| def.name.as_str())
    }
}

/// Load all item definitions.
pub fn load_item_definitions(mut registry: ResMut<ItemRegistry>) {
    let path = format!("{}/{}", DATA_ROOT, ItemRegistry::PATH);

    match load_ron::<Vec<ItemDefinition>>(&path) {
        Ok(definitions) => {
            *registry = ItemRegistry::from_definitions(definitions);
            info!("Loaded {} item definitions", registry.definitions.len());
        }
        Err(e) => {
            error!("Failed to load item definitions: {}", e);
        }
    }
}
