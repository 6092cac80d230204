//! World state and the per-tick system pipeline.
//!
//! [`World`] owns the entity store and every singleton resource. One call
//! to [`World::tick`] advances the simulation by a fixed 1/60 s step,
//! running the systems in a strict order: input decode and selection,
//! minimap commands, build input, camera, movement, collision, harvester
//! economy, fog. Mutations made by a system are visible to every system
//! after it in the same tick.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::camera::{Camera, Minimap};
use crate::fog::FogOfWar;
use crate::input::{Drag, InputFrame};
use crate::production::{Catalog, Placement, Player};
use crate::settings::Settings;
use crate::store::{EntityId, Store};
use crate::{collision, harvester, input, movement, production};

/// What happened during one tick, for consumers that care (UI, tests,
/// the headless runner).
#[derive(Debug, Clone, Serialize)]
pub struct TickEvents {
    /// Tick number these events belong to.
    pub tick: u64,
    /// Harvester unloads: (harvester, amount paid out).
    pub spice_unloaded: Vec<(EntityId, i32)>,
    /// Spice fields destroyed by depletion.
    pub spice_depleted: Vec<EntityId>,
    /// Buildings placed through the build workflow.
    pub buildings_placed: Vec<EntityId>,
    /// Units trained from a selected building.
    pub units_trained: Vec<EntityId>,
}

impl TickEvents {
    /// Empty event set for a tick.
    #[must_use]
    pub fn new(tick: u64) -> Self {
        Self {
            tick,
            spice_unloaded: Vec::new(),
            spice_depleted: Vec::new(),
            buildings_placed: Vec::new(),
            units_trained: Vec::new(),
        }
    }
}

/// The complete simulation state.
#[derive(Debug)]
pub struct World {
    /// Entity/component store.
    pub store: Store,
    /// Startup configuration.
    pub settings: Settings,
    /// Player economy.
    pub player: Player,
    /// Viewport camera.
    pub camera: Camera,
    /// Minimap panel rectangle.
    pub minimap: Minimap,
    /// Fog-of-war grid.
    pub fog: FogOfWar,
    /// Drag-selection state.
    pub drag: Drag,
    /// Building-placement state.
    pub placement: Placement,
    /// Build/train catalog.
    pub catalog: Catalog,
    rng: ChaCha8Rng,
    tick: u64,
}

impl World {
    /// Create a world with the given settings and RNG seed.
    #[must_use]
    pub fn new(settings: Settings, seed: u64) -> Self {
        let fog = FogOfWar::new(&settings);
        let minimap = Minimap::standard(&settings);
        let player = Player::new(settings.starting_money);
        Self {
            store: Store::new(),
            settings,
            player,
            camera: Camera::default(),
            minimap,
            fog,
            drag: Drag::default(),
            placement: Placement::default(),
            catalog: Catalog::standard(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick: 0,
        }
    }

    /// Number of completed ticks.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Seeded RNG, for scenario setup.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Spawn a spice field with a seeded random amount.
    pub fn spawn_spice_field_random(&mut self, pos: crate::math::Vec2) -> EntityId {
        crate::factory::spawn_spice_field_random(&mut self.store, pos, &mut self.rng)
    }

    /// Advance the simulation by one fixed step.
    pub fn tick(&mut self, input: &InputFrame) -> TickEvents {
        self.tick += 1;
        let mut events = TickEvents::new(self.tick);

        let over_minimap = self.minimap.rect.contains(input.cursor);
        let over_menu = production::menu_contains(
            &self.store,
            &self.catalog,
            &self.minimap,
            input.cursor,
        );
        let ui_blocked = over_minimap || over_menu || self.placement.is_placing();

        input::update(
            &mut self.store,
            &mut self.drag,
            &self.camera,
            &self.settings,
            input,
            ui_blocked,
        );

        if over_minimap && !self.placement.is_placing() {
            let world_point = self.minimap.screen_to_world(input.cursor, &self.settings);
            if input.left_pressed {
                self.camera.center_on(world_point, &self.settings);
            }
            if input.right_pressed {
                input::command_move_selected(&mut self.store, world_point);
            }
        }

        production::update_build_input(
            &mut self.store,
            &mut self.player,
            &mut self.placement,
            &self.catalog,
            &self.camera,
            &self.minimap,
            &self.settings,
            &mut self.rng,
            input,
            &mut events,
        );

        self.camera.update(input, &self.settings, &self.minimap);
        movement::update(&mut self.store, &self.settings);
        collision::resolve(&mut self.store);
        harvester::update(&mut self.store, &mut self.player, &self.settings, &mut events);
        self.fog.update(&self.store);

        tracing::debug!(
            tick = self.tick,
            entities = self.store.len(),
            money = self.player.money,
            "tick complete"
        );
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;
    use crate::math::Vec2;

    #[test]
    fn test_new_world_is_empty() {
        let world = World::new(Settings::new(800, 600), 1);
        assert!(world.store.is_empty());
        assert_eq!(world.tick_count(), 0);
        assert_eq!(world.player.money, world.settings.starting_money);
    }

    #[test]
    fn test_tick_advances_counter_and_moves_units() {
        let mut world = World::new(Settings::new(800, 600), 1);
        let trike = factory::spawn_trike(&mut world.store, Vec2::new(100.0, 100.0));
        world.store.selectable_mut(trike).unwrap().selected = true;

        // Right-click at screen (300, 100) with camera at origin
        let order = InputFrame {
            cursor: Vec2::new(300.0, 100.0),
            right_pressed: true,
            ..InputFrame::default()
        };
        world.tick(&order);
        assert_eq!(world.tick_count(), 1);

        let after_one = world.store.position(trike).unwrap().value;
        assert!(after_one.x > 100.0, "command and movement run the same tick");

        for _ in 0..120 {
            world.tick(&InputFrame::default());
        }
        let settled = world.store.position(trike).unwrap().value;
        assert!(settled.distance(Vec2::new(300.0, 100.0)) < world.settings.arrival_radius);
    }

    #[test]
    fn test_minimap_left_click_recenters_camera() {
        let mut world = World::new(Settings::new(800, 600), 1);
        let rect = world.minimap.rect;
        let center = Vec2::new(
            f64::from(rect.x) + f64::from(rect.w) / 2.0,
            f64::from(rect.y) + f64::from(rect.h) / 2.0,
        );

        world.tick(&InputFrame {
            cursor: center,
            left_pressed: true,
            ..InputFrame::default()
        });

        // Map center (800, 600) minus half a screen
        assert_eq!(world.camera.offset, Vec2::new(400.0, 300.0));
        assert!(!world.drag.active, "minimap clicks never start a drag");
    }

    #[test]
    fn test_minimap_right_click_moves_selected() {
        let mut world = World::new(Settings::new(800, 600), 1);
        let trike = factory::spawn_trike(&mut world.store, Vec2::new(100.0, 100.0));
        world.store.selectable_mut(trike).unwrap().selected = true;
        let rect = world.minimap.rect;
        let corner = Vec2::new(f64::from(rect.x), f64::from(rect.y));

        world.tick(&InputFrame {
            cursor: corner,
            right_pressed: true,
            ..InputFrame::default()
        });

        // Top-left of the minimap maps to the world origin, and movement
        // already stepped toward it this tick
        let target = world.store.move_target(trike).unwrap().point;
        assert_eq!(target, Some(Vec2::ZERO));
    }

    #[test]
    fn test_fog_follows_movement_same_tick() {
        let mut world = World::new(Settings::new(800, 600), 1);
        factory::spawn_trike(&mut world.store, Vec2::new(800.0, 600.0));

        world.tick(&InputFrame::default());

        use crate::fog::Visibility;
        assert_eq!(
            world.fog.visibility_at_world(Vec2::new(800.0, 600.0)),
            Visibility::Visible
        );
    }
}
