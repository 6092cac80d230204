//! Camera and minimap viewport math.
//!
//! The camera is a world-space viewport origin. Screen coordinates map to
//! world coordinates by adding the camera offset. Panning comes from
//! edge-hover and held directional keys, both clamped so the viewport
//! never leaves the map.

use serde::{Deserialize, Serialize};

use crate::input::InputFrame;
use crate::math::Vec2;
use crate::settings::Settings;

/// Screen-space pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Whether a screen point falls inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= f64::from(self.x)
            && point.x < f64::from(self.x + self.w)
            && point.y >= f64::from(self.y)
            && point.y < f64::from(self.y + self.h)
    }
}

/// Minimap panel: a fixed screen rectangle showing the whole map.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Minimap {
    /// Screen rectangle the minimap occupies.
    pub rect: Rect,
}

impl Minimap {
    /// Standard placement: 150x100 panel in the top-right corner.
    #[must_use]
    pub fn standard(settings: &Settings) -> Self {
        Self {
            rect: Rect::new(settings.screen_width - 160, 10, 150, 100),
        }
    }

    /// Map a screen point inside the minimap to the world point it depicts.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2, settings: &Settings) -> Vec2 {
        let fx = (screen.x - f64::from(self.rect.x)) / f64::from(self.rect.w);
        let fy = (screen.y - f64::from(self.rect.y)) / f64::from(self.rect.h);
        Vec2::new(
            fx * f64::from(settings.map_width),
            fy * f64::from(settings.map_height),
        )
    }
}

/// World-space viewport origin.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Camera {
    /// Top-left corner of the viewport in world coordinates.
    pub offset: Vec2,
}

impl Camera {
    /// Convert a screen-space point to world space.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.offset
    }

    /// Convert a world-space point to screen space.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset
    }

    /// Pan per input and clamp to map bounds.
    ///
    /// Edge-hover panning is suppressed while the cursor is over the
    /// minimap, so browsing the minimap does not drag the viewport around.
    pub fn update(&mut self, input: &InputFrame, settings: &Settings, minimap: &Minimap) {
        let speed = settings.scroll_speed;
        let margin = f64::from(settings.scroll_margin);
        let mut delta = Vec2::ZERO;

        if !minimap.rect.contains(input.cursor) {
            if input.cursor.x < margin {
                delta.x -= speed;
            } else if input.cursor.x > f64::from(settings.screen_width) - margin {
                delta.x += speed;
            }
            if input.cursor.y < margin {
                delta.y -= speed;
            } else if input.cursor.y > f64::from(settings.screen_height) - margin {
                delta.y += speed;
            }
        }

        if input.pan_left {
            delta.x -= speed;
        }
        if input.pan_right {
            delta.x += speed;
        }
        if input.pan_up {
            delta.y -= speed;
        }
        if input.pan_down {
            delta.y += speed;
        }

        self.offset = self.offset + delta;
        self.clamp(settings);
    }

    /// Center the viewport on a world point, clamped to map bounds.
    pub fn center_on(&mut self, world: Vec2, settings: &Settings) {
        self.offset = Vec2::new(
            world.x - f64::from(settings.screen_width) / 2.0,
            world.y - f64::from(settings.screen_height) / 2.0,
        );
        self.clamp(settings);
    }

    fn clamp(&mut self, settings: &Settings) {
        let max = Vec2::new(
            f64::from(settings.map_width - settings.screen_width).max(0.0),
            f64::from(settings.map_height - settings.screen_height).max(0.0),
        );
        self.offset = self.offset.clamp(Vec2::ZERO, max);
    }
}
