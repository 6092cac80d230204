//! Game-wide configuration constants.
//!
//! Everything here is fixed at startup; there is no runtime
//! reconfiguration surface.

use serde::{Deserialize, Serialize};

/// Fixed simulation timestep in seconds (60 ticks per second).
pub const TICK_DT: f64 = 1.0 / 60.0;

/// Startup configuration for a game world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Viewport width in pixels.
    pub screen_width: i32,
    /// Viewport height in pixels.
    pub screen_height: i32,
    /// Map width in pixels.
    pub map_width: i32,
    /// Map height in pixels.
    pub map_height: i32,
    /// Fog-of-war tile size in pixels.
    pub tile_size: i32,
    /// Vision radius in fog tiles.
    pub vision_radius: i32,
    /// Unit movement speed in px per second.
    pub unit_speed: f64,
    /// Distance at which a move target counts as reached, in px.
    pub arrival_radius: f64,
    /// Distance at which a harvester may start extracting, in px.
    pub harvest_radius: f64,
    /// Distance at which a harvester may start unloading, in px.
    pub unload_radius: f64,
    /// Spice units extracted per tick while harvesting.
    pub harvest_rate: i32,
    /// Spice units a harvester can carry.
    pub harvester_capacity: i32,
    /// Starting money for the player.
    pub starting_money: i32,
    /// Camera pan speed in px per tick.
    pub scroll_speed: f64,
    /// Edge-hover margin that triggers camera panning, in px.
    pub scroll_margin: i32,
    /// Minimum cursor displacement for a drag selection, in px.
    pub drag_threshold: i32,
}

impl Settings {
    /// Standard settings: map is twice the screen in each dimension.
    #[must_use]
    pub fn new(screen_width: i32, screen_height: i32) -> Self {
        Self {
            screen_width,
            screen_height,
            map_width: screen_width * 2,
            map_height: screen_height * 2,
            tile_size: 16,
            vision_radius: 16,
            unit_speed: 240.0,
            arrival_radius: 5.0,
            harvest_radius: 32.0,
            unload_radius: 64.0,
            harvest_rate: 1,
            harvester_capacity: 100,
            starting_money: 1000,
            scroll_speed: 5.0,
            scroll_margin: 20,
            drag_threshold: 5,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_is_twice_screen() {
        let s = Settings::new(800, 600);
        assert_eq!(s.map_width, 1600);
        assert_eq!(s.map_height, 1200);
    }
}
