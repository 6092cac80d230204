//! Scripted starting scenario.

use spice_core::factory;
use spice_core::math::Vec2;
use spice_core::store::EntityId;
use spice_core::world::World;

/// Entity handles for the standard scenario, for scripting input.
#[derive(Debug, Clone)]
pub struct StandardScenario {
    /// The player's refinery.
    pub refinery: EntityId,
    /// The player's barracks.
    pub barracks: EntityId,
    /// Starting harvester.
    pub harvester: EntityId,
    /// Starting combat units.
    pub escorts: Vec<EntityId>,
    /// Spice fields, nearest first.
    pub spice_fields: Vec<EntityId>,
}

/// Populate a fresh world with the standard skirmish setup: a small base
/// in the north-west, a harvester with escorts, and three spice fields of
/// seeded random size further out.
pub fn setup_standard(world: &mut World) -> StandardScenario {
    let refinery = factory::spawn_refinery(&mut world.store, Vec2::new(100.0, 100.0));
    let barracks = factory::spawn_barracks(&mut world.store, Vec2::new(100.0, 220.0));

    let harvester =
        factory::spawn_harvester(&mut world.store, Vec2::new(220.0, 140.0), &world.settings);
    let escorts = vec![
        factory::spawn_trike(&mut world.store, Vec2::new(260.0, 100.0)),
        factory::spawn_trike(&mut world.store, Vec2::new(260.0, 180.0)),
        factory::spawn_quad(&mut world.store, Vec2::new(300.0, 140.0)),
    ];

    let spice_positions = [
        Vec2::new(500.0, 400.0),
        Vec2::new(900.0, 300.0),
        Vec2::new(700.0, 800.0),
    ];
    let mut spice_fields = Vec::new();
    for pos in spice_positions {
        spice_fields.push(world.spawn_spice_field_random(pos));
    }

    tracing::info!(
        entities = world.store.len(),
        "standard scenario ready"
    );

    StandardScenario {
        refinery,
        barracks,
        harvester,
        escorts,
        spice_fields,
    }
}
