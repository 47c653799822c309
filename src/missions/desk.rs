//! System parameter through which gameplay systems touch missions.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::data::{MissionId, MissionStatus};
use super::registry::{Completion, Mission, MissionError, MissionLog, PlayerProgress};
use crate::items::{Inventory, ItemRegistry};

/// Sent after a mission moves from available to active.
#[derive(Event, Debug, Clone)]
pub struct MissionAccepted {
    pub mission: MissionId,
    pub name: String,
}

/// Sent after a mission moves from active to completed.
#[derive(Event, Debug, Clone)]
pub struct MissionCompleted {
    pub name: String,
    pub completion: Completion,
}

/// Sent after an active mission is given up and goes back on the board.
#[derive(Event, Debug, Clone)]
pub struct MissionAbandoned {
    pub mission: MissionId,
    pub name: String,
}

/// Sent after a finished mission is offered again.
#[derive(Event, Debug, Clone)]
pub struct MissionReopened {
    pub mission: MissionId,
    pub name: String,
}

/// Mission log, inventory and progress plus the events they fire.
///
/// Systems change missions only through here so listeners are always told.
#[derive(SystemParam)]
pub struct MissionDesk<'w> {
    log: ResMut<'w, MissionLog>,
    inventory: ResMut<'w, Inventory>,
    progress: ResMut<'w, PlayerProgress>,
    items: Res<'w, ItemRegistry>,
    accepted: EventWriter<'w, MissionAccepted>,
    completed: EventWriter<'w, MissionCompleted>,
    abandoned: EventWriter<'w, MissionAbandoned>,
    reopened: EventWriter<'w, MissionReopened>,
}

impl MissionDesk<'_> {
    pub fn log(&self) -> &MissionLog {
        &self.log
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    fn name_of(&self, id: &MissionId) -> String {
        self.log
            .get(id)
            .map_or_else(|| id.to_string(), |m| m.name().to_string())
    }

    pub fn accept(&mut self, id: &MissionId) -> Result<(), MissionError> {
        let mission = self.log.accept(id, &mut self.inventory)?;
        let name = mission.name().to_string();

        info!("Mission accepted: {}", name);
        self.accepted.send(MissionAccepted {
            mission: id.clone(),
            name,
        });
        Ok(())
    }

    pub fn complete(&mut self, id: &MissionId) -> Result<Completion, MissionError> {
        let completion = self
            .log
            .complete(id, &mut self.inventory, &mut self.progress)?;
        let name = self.name_of(id);

        info!("Mission completed: {} (+{} coins)", name, completion.money);
        self.completed.send(MissionCompleted {
            name,
            completion: completion.clone(),
        });

        let repeatable = self
            .log
            .get(id)
            .is_some_and(|mission| mission.definition.repeatable);
        if repeatable {
            self.reopen(id)?;
        }
        Ok(completion)
    }

    /// Complete a delivery: hand over its item and finish the mission.
    ///
    /// The item leaves the bag before rewards arrive so it frees its slot.
    pub fn deliver(&mut self, id: &MissionId) -> Result<Completion, MissionError> {
        let required = self
            .log
            .get(id)
            .filter(|mission| self.log.is_active(mission.id()))
            .and_then(|mission| mission.definition.required_item.clone());

        let handed_over = match required {
            Some(item) => match self.inventory.remove(&item, 1) {
                Ok(()) => Some(item),
                Err(e) => {
                    warn!("Delivering '{}' without its item: {}", id, e);
                    None
                }
            },
            None => None,
        };

        match self.complete(id) {
            Ok(completion) => {
                if let Some(item) = &handed_over {
                    info!("Handed over {}", self.items.name_of(item));
                }
                Ok(completion)
            }
            Err(e) => {
                if let Some(item) = &handed_over {
                    if let Err(restore) = self.inventory.add(item, 1) {
                        warn!("Could not give back {}: {}", item, restore);
                    }
                }
                Err(e)
            }
        }
    }

    /// Give up an active mission. Its required item is taken back.
    pub fn abandon(&mut self, id: &MissionId) -> Result<(), MissionError> {
        self.log.abandon(id, &mut self.inventory)?;
        let name = self.name_of(id);

        info!("Mission abandoned: {}", name);
        self.abandoned.send(MissionAbandoned {
            mission: id.clone(),
            name,
        });
        Ok(())
    }

    /// Put a finished mission back on the board.
    pub fn reopen(&mut self, id: &MissionId) -> Result<(), MissionError> {
        if self.log.status(id) == Some(MissionStatus::Available) {
            return Ok(());
        }
        self.log.make_available(id)?;
        let name = self.name_of(id);

        info!("Mission offered again: {}", name);
        self.reopened.send(MissionReopened {
            mission: id.clone(),
            name,
        });
        Ok(())
    }

    /// The mission targeted at the given NPC, if any.
    pub fn mission_for_npc(&self, npc_name: &str) -> Option<&Mission> {
        self.log.mission_for_npc(npc_name)
    }
}
