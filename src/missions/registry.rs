//! Mission lifecycle: available, active and completed sets.
//!
//! `MissionLog` owns the per-session status of every mission and enforces
//! the lifecycle rules. It knows nothing about Bevy scheduling; systems reach
//! it through `MissionDesk`, which adds notifications.

use bevy::prelude::*;
use std::collections::HashMap;
use thiserror::Error;

use super::data::{MissionDefinition, MissionId, MissionStatus};
use crate::items::{Inventory, InventoryError, ItemId};

/// Most missions the player may carry at once.
pub const MAX_ACTIVE_MISSIONS: usize = 3;

/// Why a mission operation was refused. State is unchanged on error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissionError {
    #[error("unknown mission '{0}'")]
    Unknown(MissionId),

    #[error("mission '{0}' is already active")]
    AlreadyActive(MissionId),

    #[error("mission '{0}' is not available")]
    NotAvailable(MissionId),

    #[error("mission '{0}' is not active")]
    NotActive(MissionId),

    #[error("cannot carry more than {limit} missions")]
    ActiveLimitReached { limit: usize },

    #[error("cannot take the item for mission '{mission}': {source}")]
    RequiredItemRejected {
        mission: MissionId,
        #[source]
        source: InventoryError,
    },
}

/// A mission definition together with its current status.
#[derive(Debug, Clone)]
pub struct Mission {
    pub definition: MissionDefinition,
    pub status: MissionStatus,
}

impl Mission {
    pub fn id(&self) -> &MissionId {
        &self.definition.id
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

/// Money and mission count earned so far this session.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct PlayerProgress {
    pub total_earnings: u32,
    pub completed_missions: u32,
}

/// What a completed mission paid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub mission: MissionId,
    pub money: u32,
    pub items_granted: Vec<ItemId>,
    /// Reward items that did not fit in the inventory
    pub items_dropped: Vec<ItemId>,
}

/// Per-session mission state.
#[derive(Resource, Debug, Default)]
pub struct MissionLog {
    missions: HashMap<MissionId, Mission>,
    /// Definition order, used for stable lookups by NPC name
    order: Vec<MissionId>,
    available: Vec<MissionId>,
    active: Vec<MissionId>,
    completed: Vec<MissionId>,
}

impl MissionLog {
    /// Build a log from definitions, placing each by its authored status.
    ///
    /// Missions authored as in progress beyond the active limit start out
    /// available instead. Failed missions are kept but never offered.
    pub fn from_definitions<'a>(definitions: impl IntoIterator<Item = &'a MissionDefinition>) -> Self {
        let mut log = Self::default();

        for definition in definitions {
            let id = definition.id.clone();
            if log.missions.contains_key(&id) {
                warn!("Duplicate mission id '{}', keeping the first", id);
                continue;
            }

            let status = match definition.status {
                MissionStatus::InProgress if log.active.len() >= MAX_ACTIVE_MISSIONS => {
                    warn!("Mission '{}' exceeds the active limit, offering it instead", id);
                    MissionStatus::Available
                }
                status => status,
            };

            match status {
                MissionStatus::Available => log.available.push(id.clone()),
                MissionStatus::InProgress => log.active.push(id.clone()),
                MissionStatus::Completed => log.completed.push(id.clone()),
                MissionStatus::Failed => {}
            }

            log.order.push(id.clone());
            log.missions.insert(
                id,
                Mission {
                    definition: definition.clone(),
                    status,
                },
            );
        }

        log
    }

    pub fn get(&self, id: &MissionId) -> Option<&Mission> {
        self.missions.get(id)
    }

    pub fn status(&self, id: &MissionId) -> Option<MissionStatus> {
        self.get(id).map(|mission| mission.status)
    }

    /// First mission (in definition order) delivered to the named NPC.
    pub fn mission_for_npc(&self, npc_name: &str) -> Option<&Mission> {
        self.order
            .iter()
            .filter_map(|id| self.missions.get(id))
            .find(|mission| mission.definition.target_npc == npc_name)
    }

    pub fn available(&self) -> impl Iterator<Item = &Mission> {
        self.available.iter().filter_map(|id| self.missions.get(id))
    }

    pub fn active(&self) -> impl Iterator<Item = &Mission> {
        self.active.iter().filter_map(|id| self.missions.get(id))
    }

    pub fn completed(&self) -> impl Iterator<Item = &Mission> {
        self.completed.iter().filter_map(|id| self.missions.get(id))
    }

    pub fn first_available(&self) -> Option<&Mission> {
        self.available().next()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, id: &MissionId) -> bool {
        self.active.contains(id)
    }

    pub fn is_completed(&self, id: &MissionId) -> bool {
        self.completed.contains(id)
    }

    /// Whether `accept` would succeed, ignoring inventory space.
    pub fn can_accept(&self, id: &MissionId) -> bool {
        self.available.contains(id) && self.active.len() < MAX_ACTIVE_MISSIONS
    }

    /// Move a mission from available to active.
    ///
    /// If the mission needs an item the player does not carry, it is handed
    /// over now; when the inventory cannot take it the accept is refused.
    pub fn accept(
        &mut self,
        id: &MissionId,
        inventory: &mut Inventory,
    ) -> Result<&Mission, MissionError> {
        let mission = self
            .missions
            .get(id)
            .ok_or_else(|| MissionError::Unknown(id.clone()))?;

        if self.active.contains(id) {
            return Err(MissionError::AlreadyActive(id.clone()));
        }
        if !self.available.contains(id) {
            return Err(MissionError::NotAvailable(id.clone()));
        }
        if self.active.len() >= MAX_ACTIVE_MISSIONS {
            return Err(MissionError::ActiveLimitReached {
                limit: MAX_ACTIVE_MISSIONS,
            });
        }

        if let Some(item) = &mission.definition.required_item {
            if !inventory.has(item, 1) {
                inventory
                    .add(item, 1)
                    .map_err(|source| MissionError::RequiredItemRejected {
                        mission: id.clone(),
                        source,
                    })?;
            }
        }

        self.available.retain(|other| other != id);
        self.active.push(id.clone());

        let mission = self
            .missions
            .get_mut(id)
            .ok_or_else(|| MissionError::Unknown(id.clone()))?;
        mission.status = MissionStatus::InProgress;
        Ok(mission)
    }

    /// Move a mission from active to completed and pay out its reward.
    pub fn complete(
        &mut self,
        id: &MissionId,
        inventory: &mut Inventory,
        progress: &mut PlayerProgress,
    ) -> Result<Completion, MissionError> {
        if !self.missions.contains_key(id) {
            return Err(MissionError::Unknown(id.clone()));
        }
        if !self.active.contains(id) {
            return Err(MissionError::NotActive(id.clone()));
        }

        self.active.retain(|other| other != id);
        self.completed.push(id.clone());

        let mission = self
            .missions
            .get_mut(id)
            .ok_or_else(|| MissionError::Unknown(id.clone()))?;
        mission.status = MissionStatus::Completed;

        let reward = &mission.definition.reward;
        progress.total_earnings += reward.money;
        progress.completed_missions += 1;

        let mut items_granted = Vec::new();
        let mut items_dropped = Vec::new();
        for item in &reward.items {
            match inventory.add(item, 1) {
                Ok(()) => items_granted.push(item.clone()),
                Err(e) => {
                    warn!("Reward '{}' for mission '{}' lost: {}", item, id, e);
                    items_dropped.push(item.clone());
                }
            }
        }

        Ok(Completion {
            mission: id.clone(),
            money: reward.money,
            items_granted,
            items_dropped,
        })
    }

    /// Give up an active mission, returning it to the available set and
    /// taking back its required item.
    pub fn abandon(&mut self, id: &MissionId, inventory: &mut Inventory) -> Result<(), MissionError> {
        let mission = self
            .missions
            .get_mut(id)
            .ok_or_else(|| MissionError::Unknown(id.clone()))?;

        if !self.active.contains(id) {
            return Err(MissionError::NotActive(id.clone()));
        }

        if let Some(item) = &mission.definition.required_item {
            // The player may already have lost it; nothing to take back then.
            let _ = inventory.remove(item, 1);
        }

        mission.status = MissionStatus::Available;
        self.active.retain(|other| other != id);
        self.available.push(id.clone());
        Ok(())
    }

    /// Offer a mission again. Completed missions become repeatable; active
    /// ones are refused.
    pub fn make_available(&mut self, id: &MissionId) -> Result<(), MissionError> {
        let mission = self
            .missions
            .get_mut(id)
            .ok_or_else(|| MissionError::Unknown(id.clone()))?;

        if self.active.contains(id) {
            return Err(MissionError::AlreadyActive(id.clone()));
        }
        if self.available.contains(id) {
            return Ok(());
        }

        mission.status = MissionStatus::Available;
        self.completed.retain(|other| other != id);
        self.available.push(id.clone());
        Ok(())
    }
}
