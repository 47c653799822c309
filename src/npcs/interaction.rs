//! Talking to NPCs: offers, deliveries and the speech bubble lifecycle.

use bevy::prelude::*;
use bevy::utils::HashSet;
use bevy_kira_audio::{Audio, AudioControl};

use super::components::*;
use super::dialogue::{fallback_line, DialogueCursor, NpcPhase};
use crate::core::{GameConfig, GameState, GameStateControl, InteractEvent, NotifyEvent};
use crate::missions::MissionDesk;
use crate::player::{InteractionLock, Player};
use crate::world::PIXELS_PER_UNIT;

/// Sound played when a delivery is handed in.
pub const DELIVERY_SOUND: &str = "sounds/delivery.ogg";

/// React to the player interacting with an NPC.
#[allow(clippy::too_many_arguments)]
pub fn handle_npc_interactions(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut interactions: EventReader<InteractEvent>,
    mut npcs: Query<
        (
            &Npc,
            &NpcDialogue,
            &mut DialogueCursor,
            &mut AssignedMission,
            &NpcBubble,
        ),
        Without<InteractionLock>,
    >,
    mut bubbles: Query<(&mut Text2d, &mut Visibility), With<DialogueBubble>>,
    mut desk: MissionDesk,
    mut control: GameStateControl,
    mut deliveries: EventWriter<DeliveryCompleted>,
    mut notify: EventWriter<NotifyEvent>,
) {
    let mut rng = rand::thread_rng();
    // The lock lands with the commands; guard same-frame repeats here
    let mut handled = HashSet::new();

    for event in interactions.read() {
        if !handled.insert(event.target) {
            continue;
        }
        let Ok((npc, dialogue, mut cursor, mut assigned, bubble)) = npcs.get_mut(event.target)
        else {
            continue;
        };

        commands
            .entity(event.target)
            .insert(InteractionLock::new(config.interaction_debounce));

        if assigned.0.is_none() {
            assigned.0 = desk.mission_for_npc(&npc.name).map(|m| m.id().clone());
            if let Some(id) = &assigned.0 {
                debug!("{} is waiting on mission '{}'", npc.name, id);
            }
        }

        let mission = assigned.0.as_ref().and_then(|id| desk.log().get(id));
        let mut phase = NpcPhase::resolve(mission, desk.inventory(), npc.gives_mission);

        if let Some(id) = assigned.0.clone() {
            match phase {
                NpcPhase::Offer => {
                    if let Err(e) = desk.accept(&id) {
                        warn!("{} could not hand out '{}': {}", npc.name, id, e);
                        notify.send(NotifyEvent::new(e.to_string()));
                        phase = NpcPhase::Greeting;
                    }
                }
                NpcPhase::ReadyToDeliver => match desk.deliver(&id) {
                    Ok(_) => {
                        deliveries.send(DeliveryCompleted {
                            npc: event.target,
                            mission: id,
                        });
                    }
                    Err(e) => {
                        warn!("Delivery to {} failed: {}", npc.name, e);
                        phase = NpcPhase::AwaitingDelivery;
                    }
                },
                _ => {}
            }
        }

        let line = cursor
            .pick(&dialogue.lines, phase, dialogue.selection, &mut rng)
            .map(str::to_string)
            .unwrap_or_else(|| fallback_line(&npc.name));
        info!("{}: {}", npc.name, line);

        if let Ok((mut text, mut visibility)) = bubbles.get_mut(bubble.0) {
            text.0 = line;
            *visibility = Visibility::Visible;
        }
        commands
            .entity(event.target)
            .insert(DialogueHideTimer::new(config.dialogue_duration));

        control.set(GameState::InDialogue);
    }
}

/// Hide bubbles that timed out or whose listener walked away. The last
/// one closing ends the dialogue.
pub fn hide_dialogue(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    players: Query<&Transform, With<Player>>,
    mut speakers: Query<(Entity, &Transform, &NpcBubble, &mut DialogueHideTimer), Without<Player>>,
    mut bubbles: Query<&mut Visibility, With<DialogueBubble>>,
    mut control: GameStateControl,
) {
    let player_pos = players.get_single().ok().map(|t| t.translation.truncate());
    let mut still_open = 0;
    let mut closed = 0;

    for (entity, transform, bubble, mut timer) in speakers.iter_mut() {
        let expired = timer.0.tick(time.delta()).finished();
        let walked_away = player_pos.is_some_and(|pos| {
            pos.distance(transform.translation.truncate()) / PIXELS_PER_UNIT
                > config.dialogue_hide_distance
        });

        if !expired && !walked_away {
            still_open += 1;
            continue;
        }

        if let Ok(mut visibility) = bubbles.get_mut(bubble.0) {
            *visibility = Visibility::Hidden;
        }
        commands.entity(entity).remove::<DialogueHideTimer>();
        closed += 1;
    }

    if closed > 0 && still_open == 0 && control.current() == GameState::InDialogue {
        control.set(GameState::Exploring);
    }
}

pub fn play_delivery_sound(
    mut deliveries: EventReader<DeliveryCompleted>,
    audio: Res<Audio>,
    asset_server: Res<AssetServer>,
) {
    for delivery in deliveries.read() {
        debug!("Delivery sound for '{}'", delivery.mission);
        audio.play(asset_server.load(DELIVERY_SOUND));
    }
}
