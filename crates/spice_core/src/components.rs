//! Component definitions.
//!
//! Components are pure data with no behavior beyond small constructors
//! and predicates. All game entities are composed of these components.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;
use crate::store::EntityId;

/// Position component in world space (top-left anchor of the footprint).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// World position.
    pub value: Vec2,
}

impl Position {
    /// Create a new position at the given coordinates.
    #[must_use]
    pub const fn new(value: Vec2) -> Self {
        Self { value }
    }
}

/// Velocity component, world units per second.
///
/// Zero velocity means "not moving / arrived". The renderer reads it for
/// sprite facing, the simulation for position integration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    /// Velocity vector (px per second).
    pub value: Vec2,
}

impl Velocity {
    /// Zero velocity (stationary).
    pub const ZERO: Self = Self { value: Vec2::ZERO };

    /// Check if the entity is stationary.
    #[must_use]
    pub fn is_stationary(&self) -> bool {
        self.value.x == 0.0 && self.value.y == 0.0
    }
}

/// Desired destination for steering.
///
/// `None` means no active target. An in-band sentinel like `(0,0)` would
/// make a genuine move order to the map origin indistinguishable from
/// idling, so the absence of a target is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MoveTarget {
    /// Destination point, if any.
    pub point: Option<Vec2>,
}

impl MoveTarget {
    /// A target aimed at the given point.
    #[must_use]
    pub const fn at(point: Vec2) -> Self {
        Self { point: Some(point) }
    }

    /// Clear the target (arrival or cancellation).
    pub fn clear(&mut self) {
        self.point = None;
    }
}

/// Pixel footprint of an entity's sprite.
///
/// Owned by the render collaborator conceptually; the core reads it for
/// collision radii, click hit-testing, and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Footprint {
    /// Create a new footprint.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Collision radius: half the footprint width.
    #[must_use]
    pub fn radius(&self) -> f64 {
        f64::from(self.width) / 2.0
    }

    /// Whether a world point falls inside the bounding box anchored at `pos`.
    #[must_use]
    pub fn contains(&self, pos: Vec2, point: Vec2) -> bool {
        point.x >= pos.x
            && point.x < pos.x + f64::from(self.width)
            && point.y >= pos.y
            && point.y < pos.y + f64::from(self.height)
    }
}

/// Type classification for units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Fast three-wheeled scout.
    Trike,
    /// Four-wheeled combat vehicle.
    Quad,
    /// Spice harvester; the only kind that runs the economy state machine.
    Harvester,
}

/// Unit component classifying behavior eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// The kind of unit.
    pub kind: UnitKind,
}

/// Component for entities the player can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selectable {
    /// Whether the entity is currently selected.
    pub selected: bool,
}

/// Health component for units.
///
/// No system currently deals damage; the component is carried for
/// interface compatibility (health bars) and is always full in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Current health points.
    pub current: u32,
    /// Maximum health points.
    pub max: u32,
}

impl Health {
    /// Create new health component at full health.
    #[must_use]
    pub const fn new(max: u32) -> Self {
        Self { current: max, max }
    }
}

/// State of a harvester unit's economy cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HarvesterState {
    /// Waiting for orders, or routing after a completed cycle.
    #[default]
    Idle,
    /// Traveling to the targeted spice field.
    MovingToSpice,
    /// Extracting spice, one unit per tick.
    Harvesting,
    /// Traveling to the targeted refinery.
    MovingToRefinery,
    /// Transferring carried spice to the player's money.
    Unloading,
}

/// Instance data for the harvester economy state machine.
///
/// `target_spice` and `target_refinery` are weak references: they name an
/// entity without owning it and must pass `Store::contains` before every
/// dereference, because spice fields are destroyed independently on
/// depletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvesterData {
    /// Current state of the cycle.
    pub state: HarvesterState,
    /// Spice field being worked, if any.
    pub target_spice: Option<EntityId>,
    /// Refinery being returned to, if any.
    pub target_refinery: Option<EntityId>,
    /// Spice units currently on board.
    pub carried: i32,
    /// Maximum spice units the harvester can carry.
    pub capacity: i32,
}

impl HarvesterData {
    /// Create an idle harvester with the given capacity.
    #[must_use]
    pub const fn new(capacity: i32) -> Self {
        Self {
            state: HarvesterState::Idle,
            target_spice: None,
            target_refinery: None,
            carried: 0,
            capacity,
        }
    }

    /// Check if the hold is full.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.carried >= self.capacity
    }
}

/// Remaining extractable resource on a spice-field entity.
///
/// The entity is despawned when this reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpiceAmount {
    /// Remaining spice units.
    pub amount: i32,
}

/// Marker component for refinery buildings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Refinery;

/// Marker component for barracks buildings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Barracks;

/// Building type classification for the construction catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    /// Accepts harvester deliveries; trains harvesters.
    Refinery,
    /// Trains combat units.
    Barracks,
}
