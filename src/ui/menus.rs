//! Mission board and pause menu, rebuilt whenever the game state changes.

use bevy::prelude::*;

use crate::core::{
    AppState, GameState, GameStateChanged, GameStateControl, MenuKey, NotifyEvent,
};
use crate::missions::{MissionDesk, MissionId, MissionLog};

/// Marker for menu panel roots.
#[derive(Component)]
pub struct MenuPanel;

/// Mission board and pause menu buttons.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub enum MenuButton {
    AcceptMission(MissionId),
    AbandonMission(MissionId),
    CloseMissions,
    Resume,
    Quit,
}

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);

/// Setup menu systems.
pub fn setup_menu_systems(app: &mut App) {
    app.add_systems(OnExit(AppState::InGame), cleanup_menu_panels)
        .add_systems(Update, button_feedback)
        .add_systems(
            Update,
            (read_menu_keys, sync_menu_panels, menu_button_actions)
                .chain()
                .run_if(in_state(AppState::InGame)),
        );
}

/// Menu key pressed this frame. Escape wins over M/Tab.
pub fn menu_key_pressed(keyboard: &ButtonInput<KeyCode>) -> Option<MenuKey> {
    if keyboard.just_pressed(KeyCode::Escape) {
        Some(MenuKey::Pause)
    } else if keyboard.any_just_pressed([KeyCode::KeyM, KeyCode::Tab]) {
        Some(MenuKey::Missions)
    } else {
        None
    }
}

fn read_menu_keys(keyboard: Res<ButtonInput<KeyCode>>, mut control: GameStateControl) {
    let Some(key) = menu_key_pressed(&keyboard) else {
        return;
    };

    if let Some(next) = control.current().after_key(key) {
        control.set(next);
    }
}

/// What the mission board shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionOffer {
    pub title: String,
    pub description: String,
    pub reward: Option<String>,
    pub mission: Option<MissionId>,
    /// Active missions the player may give up
    pub in_progress: Vec<(MissionId, String)>,
}

impl MissionOffer {
    /// The board always offers the first available mission.
    pub fn from_log(log: &MissionLog) -> Self {
        let in_progress = log
            .active()
            .map(|mission| (mission.id().clone(), mission.name().to_string()))
            .collect();

        match log.first_available() {
            Some(mission) => Self {
                title: mission.name().to_string(),
                description: mission.definition.description.clone(),
                reward: Some(format!("Reward: ${}", mission.definition.reward.money)),
                mission: Some(mission.id().clone()),
                in_progress,
            },
            None => Self {
                title: "No missions available".to_string(),
                description: "Come back later for new missions".to_string(),
                reward: None,
                mission: None,
                in_progress,
            },
        }
    }
}

/// Replace the open panel with the one for the new state.
fn sync_menu_panels(
    mut commands: Commands,
    mut changes: EventReader<GameStateChanged>,
    panels: Query<Entity, With<MenuPanel>>,
    log: Res<MissionLog>,
) {
    let Some(change) = changes.read().last() else {
        return;
    };

    for entity in panels.iter() {
        commands.entity(entity).despawn_recursive();
    }

    match change.current {
        GameState::InMenu => spawn_mission_panel(&mut commands, &MissionOffer::from_log(&log)),
        GameState::Paused => spawn_pause_panel(&mut commands),
        GameState::Exploring | GameState::InDialogue => {}
    }
}

/// Root overlay shared by every menu.
pub fn overlay_node() -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

/// Menu title text.
pub fn spawn_menu_title(parent: &mut ChildBuilder, text: &str, color: Color) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: 48.0,
            ..default()
        },
        TextColor(color),
        Node {
            margin: UiRect::bottom(Val::Px(30.0)),
            ..default()
        },
    ));
}

fn spawn_mission_panel(commands: &mut Commands, offer: &MissionOffer) {
    commands
        .spawn((
            overlay_node(),
            BackgroundColor(Color::srgba(0.0, 0.02, 0.06, 0.75)),
            MenuPanel,
        ))
        .with_children(|parent| {
            spawn_menu_title(parent, &offer.title, Color::srgb(0.8, 0.85, 0.7));

            parent.spawn((
                Text::new(offer.description.clone()),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.75, 0.8)),
                Node {
                    max_width: Val::Px(480.0),
                    margin: UiRect::bottom(Val::Px(16.0)),
                    ..default()
                },
            ));

            if let Some(reward) = &offer.reward {
                parent.spawn((
                    Text::new(reward.clone()),
                    TextFont {
                        font_size: 22.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.95, 0.8, 0.3)),
                    Node {
                        margin: UiRect::bottom(Val::Px(30.0)),
                        ..default()
                    },
                ));
            }

            if let Some(id) = &offer.mission {
                spawn_menu_button(parent, "Accept", MenuButton::AcceptMission(id.clone()));
            }
            for (id, name) in &offer.in_progress {
                spawn_menu_button(
                    parent,
                    &format!("Abandon {}", name),
                    MenuButton::AbandonMission(id.clone()),
                );
            }
            spawn_menu_button(parent, "Close", MenuButton::CloseMissions);
        });
}

fn spawn_pause_panel(commands: &mut Commands) {
    // Semi-transparent overlay
    commands
        .spawn((
            overlay_node(),
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            MenuPanel,
        ))
        .with_children(|parent| {
            spawn_menu_title(parent, "PAUSED", Color::srgb(0.8, 0.8, 0.85));
            spawn_menu_button(parent, "Resume", MenuButton::Resume);
            spawn_menu_button(parent, "Quit", MenuButton::Quit);
        });
}

/// Helper to spawn a menu button tagged with its action.
pub fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, action: impl Component) {
    parent
        .spawn((
            Button,
            Node {
                min_width: Val::Px(200.0),
                padding: UiRect::horizontal(Val::Px(16.0)),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            action,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

/// Hover and press colors for every menu button.
#[allow(clippy::type_complexity)]
fn button_feedback(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
) {
    for (interaction, mut bg_color) in buttons.iter_mut() {
        *bg_color = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVERED,
            Interaction::None => BUTTON_IDLE,
        }
        .into();
    }
}

/// Handle mission board and pause menu buttons.
fn menu_button_actions(
    buttons: Query<(&Interaction, &MenuButton), Changed<Interaction>>,
    mut desk: MissionDesk,
    mut control: GameStateControl,
    mut notify: EventWriter<NotifyEvent>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }

        match button {
            MenuButton::AcceptMission(id) => match desk.accept(id) {
                Ok(()) => control.set(GameState::Exploring),
                Err(e) => {
                    warn!("Could not accept '{}': {}", id, e);
                    notify.send(NotifyEvent::new(e.to_string()));
                }
            },
            MenuButton::AbandonMission(id) => {
                if let Err(e) = desk.abandon(id) {
                    warn!("Could not abandon '{}': {}", id, e);
                }
                control.set(GameState::Exploring);
            }
            MenuButton::CloseMissions | MenuButton::Resume => {
                control.set(GameState::Exploring);
            }
            MenuButton::Quit => {
                // Leave time running for whatever shuts down after us
                control.set(GameState::Exploring);
                exit.send(AppExit::Success);
            }
        }
    }
}

/// Clean up menu panels.
fn cleanup_menu_panels(mut commands: Commands, query: Query<Entity, With<MenuPanel>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameFlow;
    use crate::items::{Inventory, ItemId, ItemRegistry};
    use crate::missions::{
        MissionAbandoned, MissionAccepted, MissionCompleted, MissionDefinition, MissionReopened,
        MissionType, PlayerProgress, Reward,
    };

    fn mission(id: &str, money: u32) -> MissionDefinition {
        MissionDefinition {
            id: MissionId::new(id),
            name: format!("Deliver {}", id),
            description: "Take it to the lighthouse".into(),
            kind: MissionType::Delivery,
            required_item: None,
            target_npc: "Keeper".into(),
            reward: Reward {
                money,
                items: Vec::new(),
            },
            status: Default::default(),
            repeatable: false,
        }
    }

    fn menu_app(log: MissionLog) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<GameFlow>()
            .init_resource::<Inventory>()
            .init_resource::<PlayerProgress>()
            .init_resource::<ItemRegistry>()
            .insert_resource(log)
            .add_event::<GameStateChanged>()
            .add_event::<MissionAccepted>()
            .add_event::<MissionCompleted>()
            .add_event::<MissionAbandoned>()
            .add_event::<MissionReopened>()
            .add_event::<NotifyEvent>()
            .add_event::<AppExit>()
            .add_systems(Update, (sync_menu_panels, menu_button_actions).chain());
        app
    }

    fn panel_count(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<(), With<MenuPanel>>()
            .iter(app.world())
            .count()
    }

    fn change_to(app: &mut App, previous: GameState, current: GameState) {
        app.world_mut()
            .send_event(GameStateChanged { previous, current });
        app.update();
    }

    #[test]
    fn escape_takes_priority_over_mission_keys() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::Tab);
        assert_eq!(menu_key_pressed(&keyboard), Some(MenuKey::Missions));

        keyboard.press(KeyCode::Escape);
        assert_eq!(menu_key_pressed(&keyboard), Some(MenuKey::Pause));

        keyboard.clear();
        assert_eq!(menu_key_pressed(&keyboard), None);
    }

    #[test]
    fn board_offers_first_available_mission() {
        let log = MissionLog::from_definitions(&[mission("parcel", 40), mission("letter", 75)]);
        let offer = MissionOffer::from_log(&log);

        assert_eq!(offer.title, "Deliver parcel");
        assert_eq!(offer.reward.as_deref(), Some("Reward: $40"));
        assert_eq!(offer.mission, Some(MissionId::new("parcel")));
    }

    #[test]
    fn empty_board_says_come_back_later() {
        let offer = MissionOffer::from_log(&MissionLog::default());

        assert_eq!(offer.title, "No missions available");
        assert_eq!(offer.description, "Come back later for new missions");
        assert!(offer.reward.is_none());
        assert!(offer.mission.is_none());
    }

    #[test]
    fn panels_follow_the_game_state() {
        let mut app = menu_app(MissionLog::default());

        change_to(&mut app, GameState::Exploring, GameState::InMenu);
        assert_eq!(panel_count(&mut app), 1);

        change_to(&mut app, GameState::InMenu, GameState::Paused);
        assert_eq!(panel_count(&mut app), 1);

        change_to(&mut app, GameState::Paused, GameState::Exploring);
        assert_eq!(panel_count(&mut app), 0);
    }

    #[test]
    fn accept_button_takes_the_mission_and_closes_the_board() {
        let mut app = menu_app(MissionLog::from_definitions(&[mission("parcel", 40)]));
        app.world_mut().resource_mut::<GameFlow>().transition(GameState::InMenu);
        app.world_mut().spawn((
            Interaction::Pressed,
            MenuButton::AcceptMission(MissionId::new("parcel")),
        ));

        app.update();

        let world = app.world();
        assert!(world.resource::<MissionLog>().is_active(&MissionId::new("parcel")));
        assert!(world.resource::<GameFlow>().is(GameState::Exploring));
        assert_eq!(world.resource::<Events<MissionAccepted>>().len(), 1);
    }

    #[test]
    fn board_lists_missions_in_progress() {
        let mut log = MissionLog::from_definitions(&[mission("parcel", 40), mission("letter", 75)]);
        log.accept(&MissionId::new("parcel"), &mut Inventory::new(4)).unwrap();

        let offer = MissionOffer::from_log(&log);

        assert_eq!(offer.mission, Some(MissionId::new("letter")));
        assert_eq!(
            offer.in_progress,
            vec![(MissionId::new("parcel"), "Deliver parcel".to_string())]
        );
    }

    #[test]
    fn abandon_button_returns_the_mission_and_its_item() {
        let mut parcel = mission("parcel", 40);
        parcel.required_item = Some(ItemId::new("parcel"));
        let mut log = MissionLog::from_definitions(&[parcel]);
        let mut inventory = Inventory::new(4);
        log.accept(&MissionId::new("parcel"), &mut inventory).unwrap();

        let mut app = menu_app(log);
        app.insert_resource(inventory);
        app.world_mut().resource_mut::<GameFlow>().transition(GameState::InMenu);
        app.world_mut().spawn((
            Interaction::Pressed,
            MenuButton::AbandonMission(MissionId::new("parcel")),
        ));

        app.update();

        let world = app.world();
        let log = world.resource::<MissionLog>();
        assert!(!log.is_active(&MissionId::new("parcel")));
        assert_eq!(
            log.first_available().map(|m| m.id().clone()),
            Some(MissionId::new("parcel"))
        );
        assert!(world.resource::<Inventory>().is_empty());
        assert!(world.resource::<GameFlow>().is(GameState::Exploring));
        assert_eq!(world.resource::<Events<MissionAbandoned>>().len(), 1);
    }
}
