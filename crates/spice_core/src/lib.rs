//! # Spice Core
//!
//! Simulation core for a desert RTS: harvester economy, fog of war,
//! unit movement and selection.
//!
//! This crate contains **only** simulation logic:
//! - No rendering
//! - No device IO (input arrives as decoded [`input::InputFrame`]s)
//! - No ambient randomness (one seeded RNG owned by the world)
//!
//! The renderer and input layer live in separate crates and talk to the
//! core through entity positions, footprints, the fog grid, and per-tick
//! input frames.
//!
//! ## Crate Structure
//!
//! - [`store`] - entity/component storage
//! - [`query`] - declarative entity filters
//! - [`components`] - component definitions
//! - [`world`] - world state and the tick pipeline
//! - [`movement`], [`collision`], [`harvester`], [`fog`] - simulation systems
//! - [`input`], [`production`], [`camera`] - selection, build workflow, viewport
//! - [`factory`] - entity spawn helpers

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod camera;
pub mod collision;
pub mod components;
pub mod error;
pub mod factory;
pub mod fog;
pub mod harvester;
pub mod input;
pub mod math;
pub mod movement;
pub mod production;
pub mod query;
pub mod settings;
pub mod store;
pub mod world;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::camera::{Camera, Minimap, Rect};
    pub use crate::components::*;
    pub use crate::error::{GameError, Result};
    pub use crate::fog::{FogOfWar, Visibility};
    pub use crate::input::{Drag, InputFrame};
    pub use crate::math::Vec2;
    pub use crate::production::{BuildInfo, Catalog, Placement, Player, UnitInfo};
    pub use crate::query::Filter;
    pub use crate::settings::{Settings, TICK_DT};
    pub use crate::store::{ComponentKind, EntityId, Store};
    pub use crate::world::{TickEvents, World};
}
