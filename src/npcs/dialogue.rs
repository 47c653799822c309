//! What an NPC says, decided from the state of its mission.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::items::Inventory;
use crate::missions::{Mission, MissionStatus};

/// How an NPC picks among the lines of one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LineSelection {
    #[default]
    Random,
    /// Rotate through the lines in order
    Sequential,
}

/// Authored lines per phase.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DialogueLines {
    pub greeting: Vec<String>,
    pub offer: Vec<String>,
    pub delivery: Vec<String>,
    pub completion: Vec<String>,
    pub idle: Vec<String>,
}

impl DialogueLines {
    pub fn for_phase(&self, phase: NpcPhase) -> &[String] {
        match phase {
            NpcPhase::Greeting => &self.greeting,
            NpcPhase::Offer => &self.offer,
            NpcPhase::AwaitingDelivery => &self.delivery,
            NpcPhase::ReadyToDeliver => &self.completion,
            NpcPhase::Idle => &self.idle,
        }
    }
}

/// Where an NPC's mission stands from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpcPhase {
    /// No mission, or one this NPC does not hand out
    Greeting,
    /// Mission available and this NPC gives it
    Offer,
    /// Mission active but the player lacks the item
    AwaitingDelivery,
    /// Mission active and the player can hand it in
    ReadyToDeliver,
    /// Mission already done
    Idle,
}

impl NpcPhase {
    const COUNT: usize = 5;

    fn index(self) -> usize {
        self as usize
    }

    pub fn resolve(mission: Option<&Mission>, inventory: &Inventory, gives_mission: bool) -> Self {
        let Some(mission) = mission else {
            return NpcPhase::Greeting;
        };

        match mission.status {
            MissionStatus::Available if gives_mission => NpcPhase::Offer,
            MissionStatus::Available | MissionStatus::Failed => NpcPhase::Greeting,
            MissionStatus::InProgress => {
                // Missions without an item are handed in just by showing up
                let holds_item = mission
                    .definition
                    .required_item
                    .as_ref()
                    .map_or(true, |item| inventory.has(item, 1));
                if holds_item {
                    NpcPhase::ReadyToDeliver
                } else {
                    NpcPhase::AwaitingDelivery
                }
            }
            MissionStatus::Completed => NpcPhase::Idle,
        }
    }
}

/// Per-NPC position in each phase's line rotation.
#[derive(Component, Debug, Default)]
pub struct DialogueCursor {
    next: [usize; NpcPhase::COUNT],
}

impl DialogueCursor {
    /// Pick the next line for a phase. `None` when nothing is authored.
    pub fn pick<'a>(
        &mut self,
        lines: &'a DialogueLines,
        phase: NpcPhase,
        selection: LineSelection,
        rng: &mut impl Rng,
    ) -> Option<&'a str> {
        let options = lines.for_phase(phase);
        if options.is_empty() {
            return None;
        }

        match selection {
            LineSelection::Random => options.choose(rng).map(String::as_str),
            LineSelection::Sequential => {
                let slot = &mut self.next[phase.index()];
                let line = &options[*slot % options.len()];
                *slot = (*slot + 1) % options.len();
                Some(line)
            }
        }
    }
}

/// Said when a phase has no lines.
pub fn fallback_line(npc_name: &str) -> String {
    format!("{} looks at you curiously...", npc_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemId;
    use crate::missions::{MissionDefinition, MissionId, MissionType, Reward};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mission(status: MissionStatus, item: Option<&str>) -> Mission {
        Mission {
            definition: MissionDefinition {
                id: MissionId::new("letter"),
                name: "Sealed Letter".into(),
                description: String::new(),
                kind: MissionType::Delivery,
                required_item: item.map(ItemId::new),
                target_npc: "Keeper".into(),
                reward: Reward::default(),
                status: MissionStatus::Available,
                repeatable: false,
            },
            status,
        }
    }

    #[test]
    fn phase_follows_mission_status() {
        let empty = Inventory::new(4);

        assert_eq!(NpcPhase::resolve(None, &empty, true), NpcPhase::Greeting);

        let available = mission(MissionStatus::Available, Some("letter"));
        assert_eq!(NpcPhase::resolve(Some(&available), &empty, true), NpcPhase::Offer);
        assert_eq!(NpcPhase::resolve(Some(&available), &empty, false), NpcPhase::Greeting);

        let done = mission(MissionStatus::Completed, Some("letter"));
        assert_eq!(NpcPhase::resolve(Some(&done), &empty, true), NpcPhase::Idle);

        let failed = mission(MissionStatus::Failed, None);
        assert_eq!(NpcPhase::resolve(Some(&failed), &empty, true), NpcPhase::Greeting);
    }

    #[test]
    fn active_mission_needs_the_item_in_the_bag() {
        let active = mission(MissionStatus::InProgress, Some("letter"));
        let mut inventory = Inventory::new(4);

        assert_eq!(
            NpcPhase::resolve(Some(&active), &inventory, false),
            NpcPhase::AwaitingDelivery
        );

        inventory.add(&ItemId::new("letter"), 1).unwrap();
        assert_eq!(
            NpcPhase::resolve(Some(&active), &inventory, false),
            NpcPhase::ReadyToDeliver
        );

        let no_item = mission(MissionStatus::InProgress, None);
        assert_eq!(
            NpcPhase::resolve(Some(&no_item), &Inventory::new(4), false),
            NpcPhase::ReadyToDeliver
        );
    }

    #[test]
    fn sequential_lines_rotate_per_phase() {
        let lines = DialogueLines {
            greeting: vec!["one".into(), "two".into()],
            idle: vec!["rest".into()],
            ..default()
        };
        let mut cursor = DialogueCursor::default();
        let mut rng = StdRng::seed_from_u64(7);
        let sequential = LineSelection::Sequential;

        let picks = [
            NpcPhase::Greeting,
            NpcPhase::Idle,
            NpcPhase::Greeting,
            NpcPhase::Greeting,
            NpcPhase::Offer,
        ]
        .map(|phase| cursor.pick(&lines, phase, sequential, &mut rng).map(str::to_string));

        assert_eq!(
            picks,
            [
                Some("one".to_string()),
                Some("rest".to_string()),
                Some("two".to_string()),
                Some("one".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn random_lines_come_from_the_phase() {
        let lines = DialogueLines {
            delivery: vec!["where is it?".into(), "still waiting".into()],
            ..default()
        };
        let mut cursor = DialogueCursor::default();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..10 {
            let line = cursor
                .pick(&lines, NpcPhase::AwaitingDelivery, LineSelection::Random, &mut rng)
                .unwrap();
            assert!(lines.delivery.iter().any(|l| l == line));
        }
    }

    #[test]
    fn fallback_names_the_npc() {
        assert_eq!(fallback_line("Mara"), "Mara looks at you curiously...");
    }
}
