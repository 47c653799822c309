//! Top-down player movement and eight-direction facing.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use super::interaction::InteractionFocus;
use crate::combat::{Dead, Health};
use crate::core::{AppState, GameConfig, GameFlow};
use crate::world::PIXELS_PER_UNIT;

/// Child entity carrying the player's sprite (rotated for facing).
#[derive(Component)]
pub struct PlayerSprite;

/// Side length of the player sprite in pixels.
const PLAYER_SIZE: f32 = 26.0;

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.add_systems(
        Update,
        (read_movement_input, apply_player_velocity, update_player_facing)
            .chain()
            .run_if(in_state(AppState::InGame)),
    );
}

/// Build a normalised direction from WASD / arrow keys.
pub fn direction_from_keys(keyboard: &ButtonInput<KeyCode>) -> Vec2 {
    let mut direction = Vec2::ZERO;

    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        direction.y += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        direction.y -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        direction.x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        direction.x += 1.0;
    }

    // Normalize to prevent faster diagonal movement
    if direction.length() > 1.0 {
        direction = direction.normalize();
    }
    direction
}

/// Sample input. Menus, pause and death all read as standing still.
pub fn read_movement_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    flow: Res<GameFlow>,
    mut query: Query<(&mut MovementState, Has<Dead>), With<Player>>,
) {
    for (mut state, dead) in query.iter_mut() {
        state.input = if flow.current().allows_movement() && !dead {
            direction_from_keys(&keyboard)
        } else {
            Vec2::ZERO
        };

        if state.is_moving() {
            state.last_direction = state.input;
        }
    }
}

/// Drive the rigid body from the sampled input.
pub fn apply_player_velocity(
    config: Res<GameConfig>,
    mut query: Query<(&MovementState, &mut Velocity), With<Player>>,
) {
    for (state, mut velocity) in query.iter_mut() {
        velocity.linvel = if state.is_moving() {
            state.input * config.player_move_speed * PIXELS_PER_UNIT
        } else {
            Vec2::ZERO
        };
    }
}

/// Sprite orientation for a movement direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facing {
    pub angle_degrees: f32,
    pub flip_x: bool,
}

/// Snap a direction to one of eight fixed facings.
///
/// Horizontal directions flip the sprite instead of rotating it; vertical
/// ones rotate by ±90°. Diagonals (both axes above 0.3) rotate by ±45° or
/// ±135° and never flip.
pub fn facing_for(direction: Vec2) -> Facing {
    let abs_x = direction.x.abs();
    let abs_y = direction.y.abs();

    if abs_x > 0.3 && abs_y > 0.3 {
        let angle_degrees = match (direction.x > 0.0, direction.y > 0.0) {
            (true, true) => 45.0,
            (false, true) => 135.0,
            (true, false) => -45.0,
            (false, false) => -135.0,
        };
        return Facing {
            angle_degrees,
            flip_x: false,
        };
    }

    if abs_x > abs_y {
        Facing {
            angle_degrees: 0.0,
            flip_x: direction.x < 0.0,
        }
    } else if direction.y > 0.0 {
        Facing {
            angle_degrees: 90.0,
            flip_x: false,
        }
    } else {
        Facing {
            angle_degrees: -90.0,
            flip_x: false,
        }
    }
}

/// Rotate / flip the player sprite to match the movement direction.
pub fn update_player_facing(
    players: Query<(&MovementState, &Children), With<Player>>,
    mut sprites: Query<(&mut Transform, &mut Sprite), With<PlayerSprite>>,
) {
    for (state, children) in players.iter() {
        let direction = if state.is_moving() {
            state.input
        } else {
            state.last_direction
        };
        let facing = facing_for(direction);

        for &child in children.iter() {
            if let Ok((mut transform, mut sprite)) = sprites.get_mut(child) {
                transform.rotation = Quat::from_rotation_z(facing.angle_degrees.to_radians());
                sprite.flip_x = facing.flip_x;
            }
        }
    }
}

/// Spawn the player entity at a world position (in pixels).
pub fn spawn_player(commands: &mut Commands, position: Vec2, config: &GameConfig) -> Entity {
    let player = commands
        .spawn((
            Player,
            MovementState::default(),
            InteractionFocus::default(),
            Health::new(config.player_max_health),
            Transform::from_translation(position.extend(2.0)),
            Visibility::default(),
            // Rapier physics components
            RigidBody::Dynamic,
            Collider::cuboid(PLAYER_SIZE * 0.5, PLAYER_SIZE * 0.5),
            Velocity::zero(),
            GravityScale(0.0),
            LockedAxes::ROTATION_LOCKED,
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id();

    commands.entity(player).with_children(|parent| {
        parent.spawn((
            PlayerSprite,
            Sprite::from_color(Color::srgb(0.85, 0.78, 0.55), Vec2::splat(PLAYER_SIZE)),
            Transform::default(),
        ));
    });

    player
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_input_is_normalised() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::ArrowRight);

        let direction = direction_from_keys(&keyboard);

        assert!((direction.length() - 1.0).abs() < 1e-5);
        assert!(direction.x > 0.0 && direction.y > 0.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyA);
        keyboard.press(KeyCode::KeyD);
        assert_eq!(direction_from_keys(&keyboard), Vec2::ZERO);
    }

    #[test]
    fn horizontal_directions_flip_instead_of_rotating() {
        assert_eq!(
            facing_for(Vec2::X),
            Facing {
                angle_degrees: 0.0,
                flip_x: false
            }
        );
        assert_eq!(
            facing_for(Vec2::NEG_X),
            Facing {
                angle_degrees: 0.0,
                flip_x: true
            }
        );
    }

    #[test]
    fn vertical_and_diagonal_directions_rotate() {
        assert_eq!(facing_for(Vec2::Y).angle_degrees, 90.0);
        assert_eq!(facing_for(Vec2::NEG_Y).angle_degrees, -90.0);

        let up_left = facing_for(Vec2::new(-1.0, 1.0).normalize());
        assert_eq!(up_left.angle_degrees, 135.0);
        assert!(!up_left.flip_x);

        assert_eq!(facing_for(Vec2::new(0.7, -0.7)).angle_degrees, -45.0);
        assert_eq!(facing_for(Vec2::new(-0.7, -0.7)).angle_degrees, -135.0);
    }

    #[test]
    fn mostly_horizontal_direction_is_not_diagonal() {
        let facing = facing_for(Vec2::new(-0.95, 0.2));
        assert_eq!(facing.angle_degrees, 0.0);
        assert!(facing.flip_x);
    }
}
