//! Level data structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::core::data::{load_ron_dir, DATA_ROOT};
use crate::core::DataLoadError;

/// World units to pixels. Physics runs in pixels, gameplay tuning in units.
pub const PIXELS_PER_UNIT: f32 = 32.0;

// === Palette Types ===

/// The kind of map tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TileKind {
    Floor,
    Wall,
    Water,
    Void,
}

impl TileKind {
    /// Whether this tile kind blocks movement.
    pub fn is_solid(&self) -> bool {
        matches!(self, TileKind::Wall | TileKind::Water)
    }
}

fn default_tile_color() -> (f32, f32, f32) {
    (0.2, 0.25, 0.3)
}

/// Definition of a tile in the palette.
#[derive(Debug, Clone, Deserialize)]
pub struct TileDef {
    pub kind: TileKind,
    #[serde(default = "default_tile_color")]
    pub color: (f32, f32, f32),
}

// === Placements ===

/// An NPC placed on the grid, referencing `npcs/<npc>.ron`.
#[derive(Debug, Clone, Deserialize)]
pub struct NpcPlacement {
    pub npc: String,
    pub at: (i32, i32),
}

/// An enemy placed on the grid, referencing `enemies/<enemy>.ron`.
#[derive(Debug, Clone, Deserialize)]
pub struct EnemyPlacement {
    pub enemy: String,
    pub at: (i32, i32),
}

// === Level Definition ===

fn default_tile_size() -> f32 {
    1.0
}

/// Raw level definition as read from RON.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinitionRaw {
    pub name: String,
    /// Tile edge length in world units
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    pub player_start: (i32, i32),
    #[serde(default)]
    pub post_office: Option<(i32, i32)>,
    pub palette: HashMap<char, TileDef>,
    /// Rows top to bottom
    pub grid: Vec<String>,
    #[serde(default)]
    pub npcs: Vec<NpcPlacement>,
    #[serde(default)]
    pub enemies: Vec<EnemyPlacement>,
}

/// A resolved tile at a grid position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTile {
    pub kind: TileKind,
    pub color: (f32, f32, f32),
}

impl Default for ResolvedTile {
    fn default() -> Self {
        Self {
            kind: TileKind::Void,
            color: default_tile_color(),
        }
    }
}

/// Processed level definition with resolved tiles.
#[derive(Debug, Clone)]
pub struct LevelDefinition {
    pub name: String,
    pub tile_size: f32,
    pub player_start: (i32, i32),
    pub post_office: Option<(i32, i32)>,
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Vec<ResolvedTile>>,
    pub npcs: Vec<NpcPlacement>,
    pub enemies: Vec<EnemyPlacement>,
}

impl LevelDefinition {
    /// Resolve the grid against the palette. Spaces are void.
    pub fn from_raw(raw: LevelDefinitionRaw) -> Result<Self, DataLoadError> {
        let height = raw.grid.len();
        let width = raw
            .grid
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0);

        let mut tiles = Vec::with_capacity(height);
        for row in &raw.grid {
            let mut resolved = Vec::with_capacity(width);
            for symbol in row.chars() {
                if symbol == ' ' {
                    resolved.push(ResolvedTile::default());
                    continue;
                }
                let Some(def) = raw.palette.get(&symbol) else {
                    return Err(DataLoadError::UnknownReference {
                        owner: raw.name.clone(),
                        kind: "tile",
                        id: symbol.to_string(),
                    });
                };
                resolved.push(ResolvedTile {
                    kind: def.kind,
                    color: def.color,
                });
            }
            resolved.resize(width, ResolvedTile::default());
            tiles.push(resolved);
        }

        Ok(Self {
            name: raw.name,
            tile_size: raw.tile_size,
            player_start: raw.player_start,
            post_office: raw.post_office,
            width,
            height,
            tiles,
            npcs: raw.npcs,
            enemies: raw.enemies,
        })
    }

    /// Tile at grid position. Void if out of bounds.
    pub fn tile(&self, x: i32, y: i32) -> ResolvedTile {
        if x < 0 || y < 0 {
            return ResolvedTile::default();
        }
        self.tiles
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or_default()
    }

    /// Convert grid coordinates (row 0 at the top) to the tile centre in
    /// world units.
    pub fn grid_to_world(&self, x: i32, y: i32) -> Vec2 {
        let flipped = self.height as i32 - 1 - y;
        Vec2::new(
            x as f32 * self.tile_size + self.tile_size / 2.0,
            flipped as f32 * self.tile_size + self.tile_size / 2.0,
        )
    }

    /// Grid coordinates to pixels.
    pub fn grid_to_pixels(&self, x: i32, y: i32) -> Vec2 {
        self.grid_to_world(x, y) * PIXELS_PER_UNIT
    }

    /// Level extent in pixels, from the origin.
    pub fn size_pixels(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.tile_size * PIXELS_PER_UNIT
    }
}

/// Resource storing all loaded level definitions.
#[derive(Resource, Default)]
pub struct LevelRegistry {
    pub levels: HashMap<String, LevelDefinition>,
}

impl LevelRegistry {
    /// Get a level by name.
    pub fn get(&self, name: &str) -> Option<&LevelDefinition> {
        self.levels.get(name)
    }
}

/// Bounds of the level currently built, in pixels.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct LevelBounds(pub Rect);

/// Load all level definitions from assets/data/levels/.
pub fn load_level_definitions(mut registry: ResMut<LevelRegistry>) {
    registry.levels.clear();

    let levels_path = Path::new(DATA_ROOT).join("levels");
    for (name, raw) in load_ron_dir::<LevelDefinitionRaw>(&levels_path) {
        match LevelDefinition::from_raw(raw) {
            Ok(level) => {
                info!("Loaded level: {} ({}x{})", name, level.width, level.height);
                registry.levels.insert(name, level);
            }
            Err(e) => error!("Failed to process level '{}': {}", name, e),
        }
    }

    info!("Loaded {} level(s)", registry.levels.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::parse_ron;

    const LEVEL: &str = r#####"(
        name: "Test Dock",
        player_start: (1, 1),
        post_office: Some((2, 1)),
        palette: {
            '#': (kind: Wall, color: (0.1, 0.1, 0.1)),
            '.': (kind: Floor),
            '~': (kind: Water),
        },
        grid: [
            "####",
            "#..~",
            "###",
        ],
        npcs: [(npc: "keeper", at: (2, 1))],
    )"#####;

    fn level() -> LevelDefinition {
        let raw: LevelDefinitionRaw =
            parse_ron(Path::new("levels/test.ron"), LEVEL).expect("level parses");
        LevelDefinition::from_raw(raw).expect("palette resolves")
    }

    #[test]
    fn resolves_grid_and_pads_short_rows() {
        let level = level();

        assert_eq!((level.width, level.height), (4, 3));
        assert_eq!(level.tile(0, 0).kind, TileKind::Wall);
        assert_eq!(level.tile(1, 1).kind, TileKind::Floor);
        assert!(level.tile(3, 1).kind.is_solid());
        assert_eq!(level.tile(3, 2).kind, TileKind::Void);
        assert_eq!(level.tile(-1, 7).kind, TileKind::Void);
        assert_eq!(level.npcs[0].npc, "keeper");
        assert!(level.enemies.is_empty());
    }

    #[test]
    fn top_row_maps_to_highest_y() {
        let level = level();

        assert_eq!(level.grid_to_world(0, 0), Vec2::new(0.5, 2.5));
        assert_eq!(level.grid_to_world(3, 2), Vec2::new(3.5, 0.5));
        assert_eq!(level.grid_to_pixels(0, 2), Vec2::splat(0.5 * PIXELS_PER_UNIT));
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let raw = LevelDefinitionRaw {
            name: "broken".into(),
            tile_size: 1.0,
            player_start: (0, 0),
            post_office: None,
            palette: HashMap::new(),
            grid: vec!["x".into()],
            npcs: Vec::new(),
            enemies: Vec::new(),
        };

        let err = LevelDefinition::from_raw(raw).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::UnknownReference { kind: "tile", .. }
        ));
    }
}
