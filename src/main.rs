//! Abyssal Mail - Entry Point
//!
//! A top-down underwater delivery game.
//!
//! Controls:
//! - WASD / Arrows: Swim
//! - E / F: Talk, use the post office
//! - M / Tab: Mission board
//! - Escape: Pause/Unpause
//! - F3: Print status to the log

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin;
use bevy_rapier2d::prelude::*;

use abyssal_mail::world::PIXELS_PER_UNIT;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Abyssal Mail".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
            PIXELS_PER_UNIT,
        ))

        // Audio
        .add_plugins(AudioPlugin)

        // Our game plugin
        .add_plugins(abyssal_mail::AbyssalMailPlugin)

        .run();
}
