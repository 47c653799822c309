//! In-game HUD - health, missions, money and bag readouts.

use bevy::prelude::*;

use crate::combat::Health;
use crate::core::{AppState, GameFlow, GameStateChanged};
use crate::items::Inventory;
use crate::missions::{MissionLog, PlayerProgress, MAX_ACTIVE_MISSIONS};
use crate::player::{Interactable, InteractionFocus, Player};

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Which readout a HUD text shows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudText {
    Health,
    Missions,
    Money,
    Bag,
    /// What pressing E would do
    Prompt,
}

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(AppState::InGame), spawn_hud)
        .add_systems(OnExit(AppState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (toggle_hud, update_hud_texts, update_interaction_prompt)
                .run_if(in_state(AppState::InGame)),
        );
}

pub fn health_text(health: &Health) -> String {
    format!("Health: {:.0}/{:.0}", health.current, health.maximum)
}

pub fn missions_text(active: usize) -> String {
    format!("Missions: {}/{}", active, MAX_ACTIVE_MISSIONS)
}

pub fn money_text(money: u32) -> String {
    format!("Money: ${}", money)
}

pub fn bag_text(inventory: &Inventory) -> String {
    format!("Bag: {}/{}", inventory.len(), inventory.capacity())
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // Readouts (top-left corner)
    commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Start,
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                top: Val::Px(12.0),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.05, 0.1, 0.6)),
            HudRoot,
        ))
        .with_children(|parent| {
            for readout in [HudText::Health, HudText::Missions, HudText::Money, HudText::Bag] {
                parent.spawn((
                    Text::new(""),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.85, 0.9, 0.95)),
                    readout,
                ));
            }
        });

    // Interaction prompt (bottom centre)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                bottom: Val::Px(40.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.9, 0.5)),
                HudText::Prompt,
            ));
        });
}

/// HUD is only shown while exploring or talking.
fn toggle_hud(
    mut changes: EventReader<GameStateChanged>,
    mut roots: Query<&mut Visibility, With<HudRoot>>,
) {
    let Some(change) = changes.read().last() else {
        return;
    };

    let visibility = if change.current.allows_movement() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut root in roots.iter_mut() {
        *root = visibility;
    }
}

/// Refresh readouts whose source changed.
fn update_hud_texts(
    log: Res<MissionLog>,
    progress: Res<PlayerProgress>,
    inventory: Res<Inventory>,
    player_query: Query<Ref<Health>, With<Player>>,
    mut texts: Query<(&mut Text, Ref<HudText>)>,
) {
    let health = player_query.get_single().ok();

    for (mut text, readout) in texts.iter_mut() {
        let fresh = readout.is_added();
        let value = match *readout {
            HudText::Health => match &health {
                Some(health) if fresh || health.is_changed() => health_text(health),
                _ => continue,
            },
            HudText::Missions if fresh || log.is_changed() => missions_text(log.active_count()),
            HudText::Money if fresh || progress.is_changed() => {
                money_text(progress.total_earnings)
            }
            HudText::Bag if fresh || inventory.is_changed() => bag_text(&inventory),
            _ => continue,
        };
        text.0 = value;
    }
}

fn update_interaction_prompt(
    flow: Res<GameFlow>,
    players: Query<&InteractionFocus, With<Player>>,
    interactables: Query<&Interactable>,
    mut texts: Query<(&mut Text, &HudText)>,
) {
    let prompt = players
        .get_single()
        .ok()
        .and_then(|focus| focus.0)
        .filter(|_| flow.current().allows_movement())
        .and_then(|target| interactables.get(target).ok())
        .map(|interactable| format!("[E] {}", interactable.prompt))
        .unwrap_or_default();

    for (mut text, readout) in texts.iter_mut() {
        if *readout == HudText::Prompt && text.0 != prompt {
            text.0 = prompt.clone();
        }
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemId;

    #[test]
    fn readouts_match_hud_format() {
        let mut health = Health::new(100.0);
        health.take_damage(34.0);
        assert_eq!(health_text(&health), "Health: 66/100");

        assert_eq!(missions_text(2), "Missions: 2/3");
        assert_eq!(money_text(125), "Money: $125");

        let mut inventory = Inventory::new(10);
        inventory.add(&ItemId::new("letter"), 3).unwrap();
        inventory.add(&ItemId::new("parcel"), 1).unwrap();
        assert_eq!(bag_text(&inventory), "Bag: 2/10");
    }
}
