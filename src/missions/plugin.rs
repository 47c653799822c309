//! Missions plugin - mission loading, session reset and status reporting.

use bevy::prelude::*;

use super::data::{load_mission_definitions, MissionCatalog};
use super::desk::{MissionAbandoned, MissionAccepted, MissionCompleted, MissionReopened};
use super::registry::{MissionLog, PlayerProgress, MAX_ACTIVE_MISSIONS};
use crate::core::{AppState, NotifyEvent};
use crate::items::data::load_item_definitions;
use crate::items::Inventory;

/// Missions plugin - owns the mission log and its notifications.
pub struct MissionsPlugin;

impl Plugin for MissionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MissionCatalog>()
            .init_resource::<MissionLog>()
            .init_resource::<PlayerProgress>()
            .add_event::<MissionAccepted>()
            .add_event::<MissionCompleted>()
            .add_event::<MissionAbandoned>()
            .add_event::<MissionReopened>()
            .add_systems(
                OnEnter(AppState::Loading),
                load_mission_definitions.after(load_item_definitions),
            )
            .add_systems(OnEnter(AppState::InGame), start_mission_session)
            .add_systems(
                Update,
                (announce_mission_changes, print_game_status)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

/// Rebuild the mission log from the catalog for a new session.
pub fn start_mission_session(
    catalog: Res<MissionCatalog>,
    mut log: ResMut<MissionLog>,
    mut progress: ResMut<PlayerProgress>,
) {
    *log = MissionLog::from_definitions(&catalog.definitions);
    *progress = PlayerProgress::default();
    info!("Missions available: {}", log.available().count());
}

/// Turn mission events into player-facing notifications.
fn announce_mission_changes(
    mut accepted: EventReader<MissionAccepted>,
    mut completed: EventReader<MissionCompleted>,
    mut abandoned: EventReader<MissionAbandoned>,
    mut reopened: EventReader<MissionReopened>,
    mut notify: EventWriter<NotifyEvent>,
) {
    for event in accepted.read() {
        notify.send(NotifyEvent::new(format!("Mission accepted: {}", event.name)));
    }

    for event in completed.read() {
        notify.send(NotifyEvent::new(format!(
            "Mission complete: {} (+${})",
            event.name, event.completion.money
        )));
        if !event.completion.items_dropped.is_empty() {
            notify.send(NotifyEvent::new("Bag full - some rewards were lost"));
        }
    }

    for event in abandoned.read() {
        notify.send(NotifyEvent::new(format!("Mission abandoned: {}", event.name)));
    }

    for event in reopened.read() {
        notify.send(NotifyEvent::new(format!("New mission on the board: {}", event.name)));
    }
}

/// F3 dumps the session status to the log.
fn print_game_status(
    keyboard: Res<ButtonInput<KeyCode>>,
    log: Res<MissionLog>,
    progress: Res<PlayerProgress>,
    inventory: Res<Inventory>,
) {
    if !keyboard.just_pressed(KeyCode::F3) {
        return;
    }

    info!("Money: {}", progress.total_earnings);
    info!("Missions completed: {}", progress.completed_missions);
    info!("Active missions: {}/{}", log.active_count(), MAX_ACTIVE_MISSIONS);
    info!("Available missions: {}", log.available().count());
    info!("Items in bag: {}/{}", inventory.len(), inventory.capacity());
}
