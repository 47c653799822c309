//! Game over screen.

use bevy::prelude::*;

use super::menus::{overlay_node, spawn_menu_button, spawn_menu_title};
use crate::core::AppState;
use crate::missions::PlayerProgress;

/// Marker for game over UI entities.
#[derive(Component)]
struct GameOverUi;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum GameOverButton {
    Retry,
    Quit,
}

pub fn setup_game_over_systems(app: &mut App) {
    app.add_systems(OnEnter(AppState::GameOver), setup_game_over)
        .add_systems(Update, game_over_input.run_if(in_state(AppState::GameOver)))
        .add_systems(OnExit(AppState::GameOver), cleanup_game_over);
}

/// Set up the game over screen.
fn setup_game_over(mut commands: Commands, progress: Res<PlayerProgress>) {
    // Dark overlay
    commands
        .spawn((
            overlay_node(),
            BackgroundColor(Color::srgba(0.0, 0.02, 0.08, 0.9)),
            GameOverUi,
        ))
        .with_children(|parent| {
            spawn_menu_title(parent, "LOST AT SEA", Color::srgb(0.8, 0.25, 0.25));

            parent.spawn((
                Text::new(format!(
                    "Deliveries: {}   Earned: ${}",
                    progress.completed_missions, progress.total_earnings
                )),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.75)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            spawn_menu_button(parent, "Retry", GameOverButton::Retry);
            spawn_menu_button(parent, "Quit", GameOverButton::Quit);
        });
}

/// Handle game over button interactions.
fn game_over_input(
    buttons: Query<(&Interaction, &GameOverButton), Changed<Interaction>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }

        match button {
            GameOverButton::Retry => {
                info!("Retrying");
                next_state.set(AppState::InGame);
            }
            GameOverButton::Quit => {
                exit.send(AppExit::Success);
            }
        }
    }
}

/// Clean up game over entities.
fn cleanup_game_over(mut commands: Commands, query: Query<Entity, With<GameOverUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn game_over_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<AppState>()
            .add_event::<AppExit>()
            .add_systems(Update, game_over_input);
        app
    }

    #[test]
    fn retry_restarts_the_game() {
        let mut app = game_over_app();
        app.world_mut().spawn((Interaction::Pressed, GameOverButton::Retry));

        app.update();
        app.update();

        assert_eq!(
            app.world().resource::<State<AppState>>().get(),
            &AppState::InGame
        );
        assert_eq!(app.world().resource::<Events<AppExit>>().len(), 0);
    }

    #[test]
    fn quit_exits_without_restarting() {
        let mut app = game_over_app();
        app.world_mut().spawn((Interaction::Pressed, GameOverButton::Quit));

        app.update();

        assert_eq!(app.world().resource::<Events<AppExit>>().len(), 1);
        assert_eq!(
            app.world().resource::<State<AppState>>().get(),
            &AppState::Loading
        );
    }
}
