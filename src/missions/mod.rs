//! Missions module - delivery quests and player progress.

pub mod data;
mod desk;
mod plugin;
mod registry;

pub use data::{MissionCatalog, MissionDefinition, MissionId, MissionStatus, MissionType, Reward};
pub use desk::{
    MissionAbandoned, MissionAccepted, MissionCompleted, MissionDesk, MissionReopened,
};
pub use plugin::MissionsPlugin;
pub use registry::{
    Completion, Mission, MissionError, MissionLog, PlayerProgress, MAX_ACTIVE_MISSIONS,
};
