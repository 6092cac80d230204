//! Entity factories.
//!
//! Each spawner composes the component set for one archetype. Footprints
//! and health values are the canonical sprite sizes and hit points per
//! archetype.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::components::{
    BuildingKind, Footprint, HarvesterData, Health, MoveTarget, Position, Selectable,
    SpiceAmount, Unit, UnitKind, Velocity,
};
use crate::math::Vec2;
use crate::settings::Settings;
use crate::store::{EntityId, Store};

fn spawn_unit_base(store: &mut Store, pos: Vec2, kind: UnitKind, footprint: Footprint, hp: u32) -> EntityId {
    let id = store.spawn();
    store.set_position(id, Position::new(pos));
    store.set_velocity(id, Velocity::ZERO);
    store.set_move_target(id, MoveTarget::default());
    store.set_footprint(id, footprint);
    store.set_unit(id, Unit { kind });
    store.set_selectable(id, Selectable::default());
    store.set_health(id, Health::new(hp));
    id
}

/// Spawn a harvester: 16x16, 100 hp, empty hold.
pub fn spawn_harvester(store: &mut Store, pos: Vec2, settings: &Settings) -> EntityId {
    let id = spawn_unit_base(store, pos, UnitKind::Harvester, Footprint::new(16, 16), 100);
    store.set_harvester(id, HarvesterData::new(settings.harvester_capacity));
    id
}

/// Spawn a trike: 24x24, 50 hp.
pub fn spawn_trike(store: &mut Store, pos: Vec2) -> EntityId {
    spawn_unit_base(store, pos, UnitKind::Trike, Footprint::new(24, 24), 50)
}

/// Spawn a quad: 16x16, 80 hp.
pub fn spawn_quad(store: &mut Store, pos: Vec2) -> EntityId {
    spawn_unit_base(store, pos, UnitKind::Quad, Footprint::new(16, 16), 80)
}

/// Spawn a unit by kind.
pub fn spawn_unit(store: &mut Store, kind: UnitKind, pos: Vec2, settings: &Settings) -> EntityId {
    match kind {
        UnitKind::Trike => spawn_trike(store, pos),
        UnitKind::Quad => spawn_quad(store, pos),
        UnitKind::Harvester => spawn_harvester(store, pos, settings),
    }
}

/// Spawn a spice field with a fixed amount.
pub fn spawn_spice_field(store: &mut Store, pos: Vec2, amount: i32) -> EntityId {
    let id = store.spawn();
    store.set_position(id, Position::new(pos));
    store.set_footprint(id, Footprint::new(64, 64));
    store.set_spice(id, SpiceAmount { amount });
    id
}

/// Spawn a spice field with a seeded random amount in 1000..3000.
pub fn spawn_spice_field_random(store: &mut Store, pos: Vec2, rng: &mut ChaCha8Rng) -> EntityId {
    let amount = 1000 + rng.gen_range(0..2000);
    spawn_spice_field(store, pos, amount)
}

fn spawn_building_base(store: &mut Store, pos: Vec2) -> EntityId {
    let id = store.spawn();
    store.set_position(id, Position::new(pos));
    store.set_footprint(id, Footprint::new(64, 64));
    store.set_selectable(id, Selectable::default());
    id
}

/// Spawn a refinery: 64x64, accepts harvester deliveries.
pub fn spawn_refinery(store: &mut Store, pos: Vec2) -> EntityId {
    let id = spawn_building_base(store, pos);
    store.set_refinery(id);
    id
}

/// Spawn a barracks: 64x64, trains combat units.
pub fn spawn_barracks(store: &mut Store, pos: Vec2) -> EntityId {
    let id = spawn_building_base(store, pos);
    store.set_barracks(id);
    id
}

/// Spawn a building by kind.
pub fn spawn_building(store: &mut Store, kind: BuildingKind, pos: Vec2) -> EntityId {
    match kind {
        BuildingKind::Refinery => spawn_refinery(store, pos),
        BuildingKind::Barracks => spawn_barracks(store, pos),
    }
}
