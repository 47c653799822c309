//! 2D camera that trails the player and stays inside the level.

use bevy::prelude::*;
use bevy::transform::TransformSystem;
use bevy_rapier2d::plugin::PhysicsSet;

use super::visual_config::VisualConfig;
use crate::player::Player;
use crate::world::{LevelBounds, PIXELS_PER_UNIT};

/// Marker for the main game camera.
#[derive(Component)]
pub struct MainCamera;

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}

/// Frame-rate independent approach of `current` towards `target`.
pub fn smooth_follow(current: Vec2, target: Vec2, smooth_speed: f32, dt: f32) -> Vec2 {
    let t = 1.0 - (-smooth_speed * dt).exp();
    current.lerp(target, t.clamp(0.0, 1.0))
}

/// Clamp a camera centre so a view of `half_view` stays within `bounds`.
/// Axes where the level is smaller than the view are centred.
pub fn clamp_to_bounds(position: Vec2, bounds: Rect, half_view: Vec2) -> Vec2 {
    let min = bounds.min + half_view;
    let max = bounds.max - half_view;
    let center = bounds.center();

    Vec2::new(
        if min.x > max.x {
            center.x
        } else {
            position.x.clamp(min.x, max.x)
        },
        if min.y > max.y {
            center.y
        } else {
            position.y.clamp(min.y, max.y)
        },
    )
}

/// Follow the player; snaps on the frame the player appears.
pub fn follow_player(
    time: Res<Time>,
    config: Res<VisualConfig>,
    bounds: Res<LevelBounds>,
    players: Query<Ref<Transform>, (With<Player>, Without<MainCamera>)>,
    mut cameras: Query<(&mut Transform, &mut OrthographicProjection), With<MainCamera>>,
) {
    let Ok(player) = players.get_single() else {
        return;
    };
    let Ok((mut camera, mut projection)) = cameras.get_single_mut() else {
        return;
    };

    if projection.scale != config.camera_zoom {
        projection.scale = config.camera_zoom;
    }

    let offset = Vec2::new(config.camera_offset.0, config.camera_offset.1) * PIXELS_PER_UNIT;
    let mut target = player.translation.truncate() + offset;
    if config.camera_use_bounds && bounds.0.width() > 0.0 {
        target = clamp_to_bounds(target, bounds.0, projection.area.half_size());
    }

    let next = if player.is_added() {
        target
    } else {
        smooth_follow(
            camera.translation.truncate(),
            target,
            config.camera_smooth_speed,
            time.delta_secs(),
        )
    };
    camera.translation = next.extend(camera.translation.z);
}

pub fn setup_camera_systems(app: &mut App) {
    app.add_systems(Startup, spawn_camera).add_systems(
        PostUpdate,
        follow_player
            .after(PhysicsSet::Writeback)
            .before(TransformSystem::TransformPropagate),
    );
}
