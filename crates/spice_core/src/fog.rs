//! Fog of war.
//!
//! A flat row-major grid of per-tile visibility. Tiles only ever move
//! forward through Hidden -> Shroud -> Visible; a tile that has been seen
//! can fall back to Shroud when vision leaves but never to Hidden.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;
use crate::query::Filter;
use crate::settings::Settings;
use crate::store::{ComponentKind, Store};

/// Per-tile visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Visibility {
    /// Never seen.
    #[default]
    Hidden,
    /// Seen before, not currently in vision range.
    Shroud,
    /// Currently within a vision source's radius.
    Visible,
}

/// Tile grid of visibility states covering the whole map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FogOfWar {
    width: usize,
    height: usize,
    tile_size: i32,
    vision_radius: i32,
    tiles: Vec<Visibility>,
}

impl FogOfWar {
    /// Create a fully hidden grid sized to the map.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        let width = (settings.map_width / settings.tile_size) as usize;
        let height = (settings.map_height / settings.tile_size) as usize;
        Self {
            width,
            height,
            tile_size: settings.tile_size,
            vision_radius: settings.vision_radius,
            tiles: vec![Visibility::Hidden; width * height],
        }
    }

    /// Grid width in tiles.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in tiles.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Visibility of a tile; out-of-bounds reads as Hidden.
    #[must_use]
    pub fn visibility(&self, tx: i32, ty: i32) -> Visibility {
        if tx < 0 || ty < 0 || tx as usize >= self.width || ty as usize >= self.height {
            return Visibility::Hidden;
        }
        self.tiles[ty as usize * self.width + tx as usize]
    }

    /// Visibility of the tile containing a world point.
    #[must_use]
    pub fn visibility_at_world(&self, world: Vec2) -> Visibility {
        let tx = (world.x / f64::from(self.tile_size)).floor() as i32;
        let ty = (world.y / f64::from(self.tile_size)).floor() as i32;
        self.visibility(tx, ty)
    }

    /// Recompute visibility from current entity positions.
    ///
    /// Demotes every Visible tile to Shroud, then promotes tiles within
    /// the vision radius of any unit or building back to Visible. Hidden
    /// tiles a source covers become Visible directly.
    pub fn update(&mut self, store: &Store) {
        for tile in &mut self.tiles {
            if *tile == Visibility::Visible {
                *tile = Visibility::Shroud;
            }
        }

        let sources = Filter::has(ComponentKind::Position).and(
            Filter::has(ComponentKind::Unit)
                .or(Filter::has(ComponentKind::Refinery))
                .or(Filter::has(ComponentKind::Barracks)),
        );
        sources.for_each(store, |id| {
            if let Some(pos) = store.position(id).map(|p| p.value) {
                self.reveal_around(pos);
            }
        });
    }

    fn reveal_around(&mut self, world: Vec2) {
        let cx = (world.x / f64::from(self.tile_size)).floor() as i32;
        let cy = (world.y / f64::from(self.tile_size)).floor() as i32;
        let r = self.vision_radius;

        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let tx = cx + dx;
                let ty = cy + dy;
                if tx < 0 || ty < 0 || tx as usize >= self.width || ty as usize >= self.height {
                    continue;
                }
                self.tiles[ty as usize * self.width + tx as usize] = Visibility::Visible;
            }
        }
    }
}
