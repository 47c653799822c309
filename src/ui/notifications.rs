//! Toast notifications stacked in the top-right corner.

use bevy::prelude::*;

use crate::core::{GameConfig, NotifyEvent};

/// Column holding the toasts.
#[derive(Component)]
pub struct ToastStack;

/// A single toast. Removed when its timer runs out.
#[derive(Component, Debug)]
pub struct Toast(pub Timer);

pub fn setup_notification_systems(app: &mut App) {
    app.add_systems(Startup, spawn_toast_stack)
        .add_systems(Update, (show_notifications, expire_toasts).chain());
}

fn spawn_toast_stack(mut commands: Commands) {
    commands.spawn((
        Node {
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::End,
            position_type: PositionType::Absolute,
            right: Val::Px(16.0),
            top: Val::Px(12.0),
            row_gap: Val::Px(6.0),
            ..default()
        },
        ToastStack,
    ));
}

fn show_notifications(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut events: EventReader<NotifyEvent>,
    stacks: Query<Entity, With<ToastStack>>,
) {
    let Ok(stack) = stacks.get_single() else {
        return;
    };

    for event in events.read() {
        debug!("Notification: {}", event.message);
        let toast = commands
            .spawn((
                Toast(Timer::from_seconds(
                    config.notification_duration,
                    TimerMode::Once,
                )),
                Text::new(event.message.clone()),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.9, 0.75)),
                BackgroundColor(Color::srgba(0.0, 0.05, 0.1, 0.7)),
                Node {
                    padding: UiRect::axes(Val::Px(10.0), Val::Px(4.0)),
                    ..default()
                },
            ))
            .id();
        commands.entity(stack).add_child(toast);
    }
}

/// Toasts run on real time so they still fade while paused.
fn expire_toasts(
    mut commands: Commands,
    time: Res<Time<Real>>,
    mut toasts: Query<(Entity, &mut Toast)>,
) {
    for (entity, mut toast) in toasts.iter_mut() {
        if toast.0.tick(time.delta()).finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_event_spawns_a_toast_in_the_stack() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<GameConfig>()
            .add_event::<NotifyEvent>();
        setup_notification_systems(&mut app);
        app.update();

        app.world_mut()
            .send_event(NotifyEvent::new("Mission accepted: Sealed Letter"));
        app.update();

        let world = app.world_mut();
        let toasts: Vec<(String, Entity)> = world
            .query::<(&Text, &Parent)>()
            .iter(world)
            .map(|(text, parent)| (text.0.clone(), parent.get()))
            .collect();
        let stack = world
            .query_filtered::<Entity, With<ToastStack>>()
            .single(world);

        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].0, "Mission accepted: Sealed Letter");
        assert_eq!(toasts[0].1, stack);
    }
}
