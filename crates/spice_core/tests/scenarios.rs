//! End-to-end scenarios driven through `World::tick` with synthetic input.

use spice_core::components::HarvesterState;
use spice_core::factory;
use spice_core::input::InputFrame;
use spice_core::math::Vec2;
use spice_core::production::menu_slot;
use spice_core::settings::Settings;
use spice_core::world::World;

fn world() -> World {
    World::new(Settings::new(800, 600), 42)
}

fn idle() -> InputFrame {
    InputFrame::default()
}

fn left_click_frames(cursor: Vec2) -> (InputFrame, InputFrame) {
    (
        InputFrame {
            cursor,
            left_pressed: true,
            ..InputFrame::default()
        },
        InputFrame {
            cursor,
            left_released: true,
            ..InputFrame::default()
        },
    )
}

fn right_click(cursor: Vec2) -> InputFrame {
    InputFrame {
        cursor,
        right_pressed: true,
        ..InputFrame::default()
    }
}

#[test]
fn full_harvest_cycle_pays_the_player() {
    let mut world = world();
    let starting_money = world.player.money;
    factory::spawn_refinery(&mut world.store, Vec2::new(100.0, 100.0));
    let spice = factory::spawn_spice_field(&mut world.store, Vec2::new(400.0, 300.0), 20);
    let harv = factory::spawn_harvester(&mut world.store, Vec2::new(350.0, 300.0), &world.settings);
    world.store.selectable_mut(harv).unwrap().selected = true;

    // Order the harvester onto the spice field
    world.tick(&right_click(Vec2::new(420.0, 320.0)));
    assert_eq!(
        world.store.harvester(harv).unwrap().state,
        HarvesterState::MovingToSpice
    );

    let mut unloaded = 0;
    for _ in 0..2000 {
        let events = world.tick(&idle());
        if let Some(&(_, amount)) = events.spice_unloaded.first() {
            unloaded = amount;
            break;
        }
    }

    assert_eq!(unloaded, 20, "everything extracted arrives at the refinery");
    assert_eq!(world.player.money, starting_money + 20);
    assert!(!world.store.contains(spice), "field depleted and destroyed");
    let data = world.store.harvester(harv).unwrap();
    assert_eq!(data.carried, 0);
}

#[test]
fn spice_depletion_takes_one_tick_per_unit() {
    let mut world = world();
    let spice = factory::spawn_spice_field(&mut world.store, Vec2::new(400.0, 300.0), 5);
    let harv = factory::spawn_harvester(&mut world.store, Vec2::new(400.0, 310.0), &world.settings);
    {
        let data = world.store.harvester_mut(harv).unwrap();
        data.target_spice = Some(spice);
        data.state = HarvesterState::Harvesting;
    }

    for expected in 1..=4 {
        world.tick(&idle());
        assert_eq!(world.store.harvester(harv).unwrap().carried, expected);
        assert_eq!(world.store.spice(spice).unwrap().amount, 5 - expected);
    }

    let events = world.tick(&idle());
    assert_eq!(world.store.harvester(harv).unwrap().carried, 5);
    assert_eq!(events.spice_depleted, vec![spice]);
    assert!(!world.store.contains(spice));
    assert_ne!(
        world.store.harvester(harv).unwrap().state,
        HarvesterState::Harvesting
    );
}

#[test]
fn placement_rejected_when_unaffordable() {
    let mut world = world();
    world.player.money = 100;

    // Click the refinery icon (cost 750), then try to place it
    let slot = menu_slot(&world.minimap, 0);
    let icon = Vec2::new(
        f64::from(slot.x) + f64::from(slot.w) / 2.0,
        f64::from(slot.y) + f64::from(slot.h) / 2.0,
    );
    let (press, release) = left_click_frames(icon);
    world.tick(&press);
    world.tick(&release);
    assert!(world.placement.is_placing());

    let (press, release) = left_click_frames(Vec2::new(400.0, 300.0));
    let events = world.tick(&press);
    world.tick(&release);

    assert!(!world.placement.is_placing());
    assert_eq!(world.player.money, 100, "no deduction on abort");
    assert!(events.buildings_placed.is_empty());
    assert!(world.store.is_empty(), "no building spawned");
}

#[test]
fn placement_commits_when_affordable() {
    let mut world = world();
    assert_eq!(world.player.money, 1000);

    let slot = menu_slot(&world.minimap, 0);
    let icon = Vec2::new(
        f64::from(slot.x) + f64::from(slot.w) / 2.0,
        f64::from(slot.y) + f64::from(slot.h) / 2.0,
    );
    let (press, release) = left_click_frames(icon);
    world.tick(&press);
    world.tick(&release);

    let (press, release) = left_click_frames(Vec2::new(400.0, 300.0));
    let events = world.tick(&press);
    world.tick(&release);

    assert_eq!(world.player.money, 250);
    assert_eq!(events.buildings_placed.len(), 1);
    let id = events.buildings_placed[0];
    assert_eq!(
        world.store.position(id).unwrap().value,
        Vec2::new(400.0, 300.0)
    );
}

#[test]
fn drag_selection_thresholds() {
    let mut world = world();
    let a = factory::spawn_trike(&mut world.store, Vec2::new(100.0, 100.0));
    let b = factory::spawn_trike(&mut world.store, Vec2::new(150.0, 150.0));
    let outside = factory::spawn_trike(&mut world.store, Vec2::new(400.0, 400.0));

    // Real drag: (10,10) -> (200,200) selects everything in the rectangle
    let (press, _) = left_click_frames(Vec2::new(10.0, 10.0));
    world.tick(&press);
    world.tick(&InputFrame {
        cursor: Vec2::new(200.0, 200.0),
        left_released: true,
        ..InputFrame::default()
    });

    assert!(world.store.selectable(a).unwrap().selected);
    assert!(world.store.selectable(b).unwrap().selected);
    assert!(!world.store.selectable(outside).unwrap().selected);

    // Sub-threshold drag: (10,10) -> (12,11) falls back to a single click,
    // which lands on trike `a` (24x24 footprint anchored at (100,100) does
    // not contain (12,11), so everything deselects)
    let (press, _) = left_click_frames(Vec2::new(10.0, 10.0));
    world.tick(&press);
    world.tick(&InputFrame {
        cursor: Vec2::new(12.0, 11.0),
        left_released: true,
        ..InputFrame::default()
    });

    assert!(!world.store.selectable(a).unwrap().selected);
    assert!(!world.store.selectable(b).unwrap().selected);
    assert!(!world.store.selectable(outside).unwrap().selected);
}

#[test]
fn menu_clicks_never_touch_world_selection() {
    let mut world = world();
    let refinery = factory::spawn_refinery(&mut world.store, Vec2::new(200.0, 200.0));
    world.store.selectable_mut(refinery).unwrap().selected = true;

    let slot = menu_slot(&world.minimap, 0);
    let icon = Vec2::new(
        f64::from(slot.x) + f64::from(slot.w) / 2.0,
        f64::from(slot.y) + f64::from(slot.h) / 2.0,
    );

    // Two full training clicks in a row: each press trains a harvester,
    // and neither release deselects the refinery
    let mut trained = Vec::new();
    for _ in 0..2 {
        let (press, release) = left_click_frames(icon);
        let events = world.tick(&press);
        trained.extend(events.units_trained);
        world.tick(&release);

        assert!(
            world.store.selectable(refinery).unwrap().selected,
            "menu click must not fall through to world selection"
        );
        assert!(!world.placement.is_placing());
        assert!(!world.drag.active);
    }

    assert_eq!(trained.len(), 2);
    assert_eq!(world.player.money, 1000 - 2 * 300);
}

#[test]
fn trained_unit_spawns_near_building() {
    let mut world = world();
    let refinery = factory::spawn_refinery(&mut world.store, Vec2::new(200.0, 200.0));
    world.store.selectable_mut(refinery).unwrap().selected = true;

    let slot = menu_slot(&world.minimap, 0);
    let icon = Vec2::new(
        f64::from(slot.x) + f64::from(slot.w) / 2.0,
        f64::from(slot.y) + f64::from(slot.h) / 2.0,
    );
    let (press, release) = left_click_frames(icon);
    let events = world.tick(&press);
    world.tick(&release);

    assert_eq!(events.units_trained.len(), 1);
    assert_eq!(world.player.money, 700, "harvester costs 300");
    let unit = events.units_trained[0];
    let pos = world.store.position(unit).unwrap().value;
    assert!(pos.x >= 232.0 && pos.x < 296.0);
    assert!(pos.y >= 232.0 && pos.y < 296.0);
}
