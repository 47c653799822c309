//! UI module - HUD, mission board, pause and game over screens, toasts.

mod game_over;
mod hud;
mod menus;
mod notifications;
mod plugin;

pub use hud::{HudRoot, HudText};
pub use menus::{menu_key_pressed, MenuButton, MenuPanel, MissionOffer};
pub use notifications::{Toast, ToastStack};
pub use plugin::UiPlugin;
