//! UI plugin - HUD, menus, game over screen and notifications.

use bevy::prelude::*;

use super::{game_over, hud, menus, notifications};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);
        menus::setup_menu_systems(app);
        game_over::setup_game_over_systems(app);
        notifications::setup_notification_systems(app);
    }
}
