//! Mission definitions loaded from assets/data/missions.ron.

use bevy::prelude::*;
use serde::Deserialize;
use std::fmt;

use crate::core::data::{load_ron, DATA_ROOT};
use crate::core::DataLoadError;
use crate::items::{ItemId, ItemRegistry};

/// Identifier of a mission definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct MissionId(pub String);

impl MissionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum MissionType {
    Delivery,
    Collection,
    Exploration,
}

/// Where a mission is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum MissionStatus {
    #[default]
    Available,
    InProgress,
    Completed,
    /// Authored as failed; never offered.
    Failed,
}

/// What completing a mission pays out.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reward {
    #[serde(default = "default_money")]
    pub money: u32,
    #[serde(default)]
    pub items: Vec<ItemId>,
}

impl Default for Reward {
    fn default() -> Self {
        Self {
            money: default_money(),
            items: Vec::new(),
        }
    }
}

fn default_money() -> u32 {
    50
}

/// Static mission definition.
#[derive(Debug, Clone, Deserialize)]
pub struct MissionDefinition {
    pub id: MissionId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: MissionType,
    /// Item handed over when the mission is accepted and taken on delivery
    #[serde(default)]
    pub required_item: Option<ItemId>,
    /// Name of the NPC the mission is delivered to
    pub target_npc: String,
    #[serde(default)]
    pub reward: Reward,
    /// Status at the start of a session
    #[serde(default)]
    pub status: MissionStatus,
    /// Offered again once completed
    #[serde(default)]
    pub repeatable: bool,
}

/// Resource holding the loaded mission definitions in file order.
#[derive(Resource, Default)]
pub struct MissionCatalog {
    pub definitions: Vec<MissionDefinition>,
}

impl MissionCatalog {
    pub const PATH: &'static str = "missions.ron";

    /// Check that every item a mission names exists.
    pub fn validate(&self, items: &ItemRegistry) -> Vec<DataLoadError> {
        let mut problems = Vec::new();

        for mission in &self.definitions {
            let referenced = mission
                .required_item
                .iter()
                .chain(mission.reward.items.iter());

            for item in referenced {
                if !items.contains(item) {
                    problems.push(DataLoadError::UnknownReference {
                        owner: format!("Mission '{}'", mission.id),
                        kind: "item",
                        id: item.to_string(),
                    });
                }
            }
        }

        problems
    }
}

/// Load all mission definitions. Runs after item definitions so references
/// can be checked.
pub fn load_mission_definitions(mut catalog: ResMut<MissionCatalog>, items: Res<ItemRegistry>) {
    let path = format!("{}/{}", DATA_ROOT, MissionCatalog::PATH);

    match load_ron::<Vec<MissionDefinition>>(&path) {
        Ok(definitions) => {
            catalog.definitions = definitions;
            info!("Loaded {} mission definitions", catalog.definitions.len());
        }
        Err(e) => {
            error!("Failed to load mission definitions: {}", e);
            return;
        }
    }

    for problem in catalog.validate(&items) {
        warn!("{}", problem);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::parse_ron;
    use crate::items::{ItemDefinition, ItemType};
    use std::path::Path;

    const MISSIONS: &str = r#"[
        (
            id: "letter_for_marta",
            name: "A Letter for Marta",
            kind: Delivery,
            required_item: Some("sealed_letter"),
            target_npc: "Marta",
            reward: (money: 75, items: ["lantern_oil"]),
        ),
        (
            id: "survey",
            name: "Survey the Docks",
            kind: Exploration,
            target_npc: "Harbormaster",
        ),
    ]"#;

    #[test]
    fn parses_missions_with_defaults() {
        let missions: Vec<MissionDefinition> =
            parse_ron(Path::new("missions.ron"), MISSIONS).unwrap();

        assert_eq!(missions.len(), 2);
        assert_eq!(missions[0].reward.money, 75);
        assert_eq!(missions[1].reward, Reward::default());
        assert_eq!(missions[1].status, MissionStatus::Available);
        assert_eq!(missions[1].required_item, None);
    }

    #[test]
    fn validation_reports_unknown_items() {
        let catalog = MissionCatalog {
            definitions: parse_ron(Path::new("missions.ron"), MISSIONS).unwrap(),
        };
        let items = ItemRegistry::from_definitions([ItemDefinition {
            id: ItemId::new("sealed_letter"),
            name: "Sealed Letter".into(),
            description: String::new(),
            kind: ItemType::Document,
            quest_item: true,
            value: 10,
        }]);

        let problems = catalog.validate(&items);

        assert_eq!(problems.len(), 1);
        assert!(matches!(
            &problems[0],
            DataLoadError::UnknownReference { id, .. } if id == "lantern_oil"
        ));
    }
}
