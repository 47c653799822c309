//! Picking the interactable in reach and sending interactions.

use bevy::prelude::*;

use super::components::Player;
use crate::combat::Dead;
use crate::core::{gameplay_active, AppState, GameConfig, InteractEvent};
use crate::world::PIXELS_PER_UNIT;

/// Something the player can interact with (NPC, post office, ...).
#[derive(Component, Debug, Clone)]
pub struct Interactable {
    /// Shown in the HUD while this is the focus
    pub prompt: String,
}

impl Interactable {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Temporarily refuses interaction. Removed once the timer finishes.
#[derive(Component, Debug)]
pub struct InteractionLock(pub Timer);

impl InteractionLock {
    pub fn new(seconds: f32) -> Self {
        Self(Timer::from_seconds(seconds, TimerMode::Once))
    }
}

/// The interactable currently in reach, if any.
#[derive(Component, Debug, Default)]
pub struct InteractionFocus(pub Option<Entity>);

pub fn setup_interaction_systems(app: &mut App) {
    app.add_systems(
        Update,
        (
            release_interaction_locks,
            update_interaction_focus,
            send_interactions.run_if(gameplay_active),
        )
            .chain()
            .run_if(in_state(AppState::InGame)),
    );
}

/// Closest candidate no farther than `range` from `origin`.
pub fn nearest_within(
    origin: Vec2,
    range: f32,
    candidates: impl IntoIterator<Item = (Entity, Vec2)>,
) -> Option<Entity> {
    candidates
        .into_iter()
        .map(|(entity, position)| (entity, origin.distance(position)))
        .filter(|(_, distance)| *distance <= range)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}

fn release_interaction_locks(
    mut commands: Commands,
    time: Res<Time>,
    mut locks: Query<(Entity, &mut InteractionLock)>,
) {
    for (entity, mut lock) in locks.iter_mut() {
        if lock.0.tick(time.delta()).finished() {
            commands.entity(entity).remove::<InteractionLock>();
        }
    }
}

/// Track the nearest unlocked interactable in range.
pub fn update_interaction_focus(
    config: Res<GameConfig>,
    mut players: Query<(&Transform, &mut InteractionFocus), With<Player>>,
    interactables: Query<(Entity, &GlobalTransform), (With<Interactable>, Without<InteractionLock>)>,
) {
    for (transform, mut focus) in players.iter_mut() {
        let origin = transform.translation.truncate() / PIXELS_PER_UNIT;
        let nearest = nearest_within(
            origin,
            config.interaction_range,
            interactables
                .iter()
                .map(|(entity, global)| (entity, global.translation().truncate() / PIXELS_PER_UNIT)),
        );

        if focus.0 != nearest {
            focus.0 = nearest;
        }
    }
}

/// E or F interacts with the focused entity.
fn send_interactions(
    keyboard: Res<ButtonInput<KeyCode>>,
    players: Query<(Entity, &InteractionFocus), (With<Player>, Without<Dead>)>,
    mut interact_events: EventWriter<InteractEvent>,
) {
    if !keyboard.any_just_pressed([KeyCode::KeyE, KeyCode::KeyF]) {
        return;
    }

    for (player, focus) in players.iter() {
        if let Some(target) = focus.0 {
            debug!("Interacting with {:?}", target);
            interact_events.send(InteractEvent { target, player });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_closest_candidate_in_range() {
        let mut world = World::new();
        let near = world.spawn_empty().id();
        let far = world.spawn_empty().id();
        let out_of_range = world.spawn_empty().id();

        let picked = nearest_within(
            Vec2::ZERO,
            2.0,
            [
                (far, Vec2::new(1.8, 0.0)),
                (out_of_range, Vec2::new(0.0, 2.5)),
                (near, Vec2::new(-1.0, 0.5)),
            ],
        );

        assert_eq!(picked, Some(near));
    }

    #[test]
    fn nothing_in_range_gives_no_focus() {
        let mut world = World::new();
        let far = world.spawn_empty().id();
        assert_eq!(nearest_within(Vec2::ZERO, 2.0, [(far, Vec2::new(3.0, 3.0))]), None);
    }

    #[test]
    fn range_is_inclusive() {
        let mut world = World::new();
        let edge = world.spawn_empty().id();
        assert_eq!(nearest_within(Vec2::ZERO, 2.0, [(edge, Vec2::new(0.0, 2.0))]), Some(edge));
    }

    #[test]
    fn locked_interactables_are_skipped() {
        let mut world = World::new();
        world.insert_resource(GameConfig::default());

        let player = world
            .spawn((Player, Transform::default(), InteractionFocus::default()))
            .id();
        world.spawn((
            Interactable::new("Talk"),
            InteractionLock::new(0.5),
            GlobalTransform::from_xyz(10.0, 0.0, 0.0),
        ));
        let open = world
            .spawn((
                Interactable::new("Talk"),
                GlobalTransform::from_xyz(40.0, 0.0, 0.0),
            ))
            .id();

        let system = world.register_system(update_interaction_focus);
        world.run_system(system).unwrap();

        assert_eq!(world.get::<InteractionFocus>(player).and_then(|f| f.0), Some(open));
    }
}
