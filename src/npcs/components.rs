//! NPC components and spawning.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::data::NpcDefinition;
use super::dialogue::{DialogueCursor, DialogueLines, LineSelection};
use crate::missions::MissionId;
use crate::player::Interactable;

/// An NPC the player can talk to.
#[derive(Component, Debug)]
pub struct Npc {
    pub name: String,
    pub gives_mission: bool,
}

#[derive(Component, Debug)]
pub struct NpcDialogue {
    pub lines: DialogueLines,
    pub selection: LineSelection,
}

/// Mission targeted at this NPC. Looked up on first interaction and kept.
#[derive(Component, Debug, Default)]
pub struct AssignedMission(pub Option<MissionId>);

/// The speech bubble text belonging to an NPC.
#[derive(Component, Debug)]
pub struct NpcBubble(pub Entity);

/// Marker for speech bubble text entities.
#[derive(Component)]
pub struct DialogueBubble;

/// Hides the bubble when it runs out. Re-inserting restarts it.
#[derive(Component, Debug)]
pub struct DialogueHideTimer(pub Timer);

impl DialogueHideTimer {
    pub fn new(seconds: f32) -> Self {
        Self(Timer::from_seconds(seconds, TimerMode::Once))
    }
}

/// Sent when a delivery is handed in to an NPC.
#[derive(Event, Debug, Clone)]
pub struct DeliveryCompleted {
    pub npc: Entity,
    pub mission: MissionId,
}

const NPC_SIZE: f32 = 26.0;

/// Spawn an NPC with its (hidden) speech bubble at a position in pixels.
pub fn spawn_npc(commands: &mut Commands, definition: &NpcDefinition, position: Vec2) -> Entity {
    let (r, g, b) = definition.color;

    let bubble = commands
        .spawn((
            DialogueBubble,
            Text2d::new(""),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            TextColor(Color::srgb(0.95, 0.95, 0.85)),
            Transform::from_xyz(0.0, NPC_SIZE * 1.2, 5.0),
            Visibility::Hidden,
        ))
        .id();

    let label = commands
        .spawn((
            Text2d::new(definition.name.clone()),
            TextFont {
                font_size: 10.0,
                ..default()
            },
            TextColor(Color::srgba(0.8, 0.85, 0.9, 0.8)),
            Transform::from_xyz(0.0, -NPC_SIZE * 0.9, 5.0),
        ))
        .id();

    commands
        .spawn((
            Npc {
                name: definition.name.clone(),
                gives_mission: definition.gives_mission,
            },
            NpcDialogue {
                lines: definition.lines.clone(),
                selection: definition.selection,
            },
            DialogueCursor::default(),
            AssignedMission::default(),
            NpcBubble(bubble),
            Interactable::new(format!("Talk to {}", definition.name)),
            Sprite::from_color(Color::srgb(r, g, b), Vec2::splat(NPC_SIZE)),
            Transform::from_translation(position.extend(1.0)),
            RigidBody::Fixed,
            Collider::cuboid(NPC_SIZE * 0.5, NPC_SIZE * 0.5),
        ))
        .add_children(&[bubble, label])
        .id()
}
