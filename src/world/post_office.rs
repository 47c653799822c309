//! The post office: a trigger area that opens the mission board.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::{GameConfig, GameState, GameStateControl, InteractEvent};
use crate::player::{Interactable, InteractionLock, Player};

/// Post office building. Only usable while the player stands inside it.
#[derive(Component, Debug)]
pub struct PostOffice {
    pub name: String,
    pub player_in_range: bool,
}

/// "Press E" hint shown while the player is in the trigger.
#[derive(Component)]
pub struct PostOfficePrompt;

const OFFICE_SIZE: Vec2 = Vec2::new(72.0, 56.0);

/// Spawn the post office at a position in pixels.
pub fn spawn_post_office(commands: &mut Commands, position: Vec2) -> Entity {
    let name = "Abyssal Post Office".to_string();

    commands
        .spawn((
            PostOffice {
                name: name.clone(),
                player_in_range: false,
            },
            Interactable::new("Open mission board"),
            Sprite::from_color(Color::srgb(0.75, 0.45, 0.2), OFFICE_SIZE),
            Transform::from_translation(position.extend(0.5)),
            RigidBody::Fixed,
            Collider::cuboid(OFFICE_SIZE.x * 0.5, OFFICE_SIZE.y * 0.5),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text2d::new(name),
                TextFont {
                    font_size: 11.0,
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
            parent.spawn((
                PostOfficePrompt,
                Text2d::new("Press E to see missions"),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.9, 0.5)),
                Transform::from_xyz(0.0, OFFICE_SIZE.y * 0.5 + 14.0, 5.0),
                Visibility::Hidden,
            ));
        })
        .id()
}

/// Follow the player entering and leaving the trigger area.
pub fn track_post_office_visitors(
    mut collisions: EventReader<CollisionEvent>,
    players: Query<(), With<Player>>,
    mut offices: Query<(&mut PostOffice, &Children)>,
    mut prompts: Query<&mut Visibility, With<PostOfficePrompt>>,
) {
    for event in collisions.read() {
        let (a, b, entered) = match event {
            CollisionEvent::Started(a, b, _) => (*a, *b, true),
            CollisionEvent::Stopped(a, b, _) => (*a, *b, false),
        };

        let office = if players.contains(a) {
            b
        } else if players.contains(b) {
            a
        } else {
            continue;
        };

        let Ok((mut post_office, children)) = offices.get_mut(office) else {
            continue;
        };
        post_office.player_in_range = entered;
        debug!(
            "Player {} {}",
            if entered { "near" } else { "left" },
            post_office.name
        );

        for &child in children.iter() {
            if let Ok(mut visibility) = prompts.get_mut(child) {
                *visibility = if entered {
                    Visibility::Visible
                } else {
                    Visibility::Hidden
                };
            }
        }
    }
}

/// Interacting inside the post office opens the mission menu.
pub fn handle_post_office_interactions(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut interactions: EventReader<InteractEvent>,
    offices: Query<&PostOffice, Without<InteractionLock>>,
    mut control: GameStateControl,
) {
    for event in interactions.read() {
        let Ok(office) = offices.get(event.target) else {
            continue;
        };
        if !office.player_in_range {
            debug!("Too far from {} to use it", office.name);
            continue;
        }

        info!("Opening mission board at {}", office.name);
        commands
            .entity(event.target)
            .insert(InteractionLock::new(config.post_office_cooldown));
        control.set(GameState::InMenu);
        // One menu is enough
        break;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameFlow, GameStateChanged};
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

    fn office_app(in_range: bool) -> (App, Entity, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<GameFlow>()
            .init_resource::<GameConfig>()
            .add_event::<InteractEvent>()
            .add_event::<GameStateChanged>()
            .add_systems(Update, handle_post_office_interactions);

        let player = app.world_mut().spawn(Player).id();
        let office = app
            .world_mut()
            .spawn(PostOffice {
                name: "Test Office".into(),
                player_in_range: in_range,
            })
            .id();
        (app, player, office)
    }

    #[test]
    fn opens_mission_menu_and_starts_cooldown() {
        let (mut app, player, office) = office_app(true);

        app.world_mut().send_event(InteractEvent {
            target: office,
            player,
        });
        app.update();

        assert!(app.world().resource::<GameFlow>().is(GameState::InMenu));
        assert!(app.world().get::<InteractionLock>(office).is_some());
    }

    #[test]
    fn ignored_when_player_is_outside() {
        let (mut app, player, office) = office_app(false);

        app.world_mut().send_event(InteractEvent {
            target: office,
            player,
        });
        app.update();

        assert!(app.world().resource::<GameFlow>().is(GameState::Exploring));
        assert!(app.world().get::<InteractionLock>(office).is_none());
    }

    #[test]
    fn trigger_shows_and_hides_prompt() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<CollisionEvent>()
            .add_systems(Update, track_post_office_visitors);

        let player = app.world_mut().spawn(Player).id();
        let prompt = app
            .world_mut()
            .spawn((PostOfficePrompt, Visibility::Hidden))
            .id();
        let office = app
            .world_mut()
            .spawn(PostOffice {
                name: "Test Office".into(),
                player_in_range: false,
            })
            .add_child(prompt)
            .id();

        app.world_mut().send_event(CollisionEvent::Started(
            office,
            player,
            CollisionEventFlags::SENSOR,
        ));
        app.update();
        assert!(app.world().get::<PostOffice>(office).is_some_and(|o| o.player_in_range));
        assert_eq!(app.world().get::<Visibility>(prompt), Some(&Visibility::Visible));

        app.world_mut().send_event(CollisionEvent::Stopped(
            player,
            office,
            CollisionEventFlags::SENSOR,
        ));
        app.update();
        assert!(app.world().get::<PostOffice>(office).is_some_and(|o| !o.player_in_range));
        assert_eq!(app.world().get::<Visibility>(prompt), Some(&Visibility::Hidden));
    }
}
