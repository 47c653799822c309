//! NPC definitions loaded from assets/data/npcs/.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::dialogue::{DialogueLines, LineSelection};
use crate::core::data::{load_ron_dir, DATA_ROOT};
use crate::core::DataLoadError;
use crate::missions::MissionCatalog;

fn default_color() -> (f32, f32, f32) {
    (0.3, 0.6, 0.7)
}

/// NPC definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct NpcDefinition {
    /// Display name, also what missions target
    pub name: String,
    /// Offers its mission when it is available
    #[serde(default)]
    pub gives_mission: bool,
    #[serde(default)]
    pub selection: LineSelection,
    #[serde(default = "default_color")]
    pub color: (f32, f32, f32),
    #[serde(default)]
    pub lines: DialogueLines,
}

/// Resource holding all loaded NPC definitions, keyed by file stem.
#[derive(Resource, Default)]
pub struct NpcRegistry {
    pub definitions: HashMap<String, NpcDefinition>,
}

impl NpcRegistry {
    pub fn get(&self, id: &str) -> Option<&NpcDefinition> {
        self.definitions.get(id)
    }

    /// Missions delivered to NPCs nobody defined.
    pub fn validate(&self, missions: &MissionCatalog) -> Vec<DataLoadError> {
        missions
            .definitions
            .iter()
            .filter(|mission| {
                !self
                    .definitions
                    .values()
                    .any(|npc| npc.name == mission.target_npc)
            })
            .map(|mission| DataLoadError::UnknownReference {
                owner: format!("Mission '{}'", mission.id),
                kind: "npc",
                id: mission.target_npc.clone(),
            })
            .collect()
    }
}

/// Load NPC definitions, then check mission targets against them.
pub fn load_npc_definitions(mut registry: ResMut<NpcRegistry>, missions: Res<MissionCatalog>) {
    registry.definitions.clear();

    let npcs_dir = Path::new(DATA_ROOT).join("npcs");
    for (id, definition) in load_ron_dir::<NpcDefinition>(&npcs_dir) {
        debug!("Loaded NPC definition: {} ({})", definition.name, id);
        registry.definitions.insert(id, definition);
    }
    info!("Loaded {} NPC definitions", registry.definitions.len());

    for problem in registry.validate(&missions) {
        warn!("{}", problem);
    }
}
