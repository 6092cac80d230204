//! Movement and steering.
//!
//! Entities with a move target steer straight at it at a fixed speed and
//! stop when they get close enough. There is no pathfinding; obstacles are
//! handled by collision separation afterwards.

use crate::components::Velocity;
use crate::math::Vec2;
use crate::settings::{Settings, TICK_DT};
use crate::store::Store;

/// Steer, integrate, and clamp every mobile entity for one tick.
///
/// An entity with a set target gets its velocity pointed at the target at
/// `settings.unit_speed`; within `settings.arrival_radius` it snaps to a
/// stop and the target clears. Entities without a target keep drifting
/// under their last velocity. All positions are clamped to the map.
pub fn update(store: &mut Store, settings: &Settings) {
    let world_max = Vec2::new(
        f64::from(settings.map_width),
        f64::from(settings.map_height),
    );

    for id in store.ids() {
        let Some(pos) = store.position(id).map(|p| p.value) else {
            continue;
        };
        if store.velocity(id).is_none() {
            continue;
        }

        if let Some(target_point) = store.move_target(id).and_then(|t| t.point) {
            if pos.distance(target_point) < settings.arrival_radius {
                store.set_velocity(id, Velocity::ZERO);
                if let Some(target) = store.move_target_mut(id) {
                    target.clear();
                }
            } else {
                let direction = (target_point - pos).normalize();
                store.set_velocity(
                    id,
                    Velocity {
                        value: direction.scale(settings.unit_speed),
                    },
                );
            }
        }

        let velocity = match store.velocity(id) {
            Some(v) => v.value,
            None => continue,
        };
        let next = (pos + velocity.scale(TICK_DT)).clamp(Vec2::ZERO, world_max);
        if let Some(position) = store.position_mut(id) {
            position.value = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{MoveTarget, Position};

    fn spawn_mover(store: &mut Store, pos: Vec2) -> crate::store::EntityId {
        let id = store.spawn();
        store.set_position(id, Position::new(pos));
        store.set_velocity(id, Velocity::ZERO);
        store.set_move_target(id, MoveTarget::default());
        id
    }

    #[test]
    fn test_steers_toward_target() {
        let settings = Settings::new(800, 600);
        let mut store = Store::new();
        let id = spawn_mover(&mut store, Vec2::new(100.0, 100.0));
        store.set_move_target(id, MoveTarget::at(Vec2::new(500.0, 100.0)));

        update(&mut store, &settings);

        let vel = store.velocity(id).unwrap().value;
        assert_eq!(vel, Vec2::new(settings.unit_speed, 0.0));
        let pos = store.position(id).unwrap().value;
        assert!(pos.x > 100.0);
        assert_eq!(pos.y, 100.0);
    }

    #[test]
    fn test_distance_strictly_decreases_until_arrival() {
        let settings = Settings::new(800, 600);
        let mut store = Store::new();
        let target = Vec2::new(300.0, 250.0);
        let id = spawn_mover(&mut store, Vec2::new(100.0, 100.0));
        store.set_move_target(id, MoveTarget::at(target));

        let mut last = store.position(id).unwrap().value.distance(target);
        for _ in 0..1000 {
            update(&mut store, &settings);
            if store.move_target(id).unwrap().point.is_none() {
                break;
            }
            let d = store.position(id).unwrap().value.distance(target);
            assert!(d < last, "distance must shrink while the target is set");
            last = d;
        }

        assert_eq!(store.move_target(id).unwrap().point, None);
        assert!(store.velocity(id).unwrap().is_stationary());
        assert!(store.position(id).unwrap().value.distance(target) < settings.arrival_radius);
    }

    #[test]
    fn test_arrival_snaps_and_clears() {
        let settings = Settings::new(800, 600);
        let mut store = Store::new();
        let id = spawn_mover(&mut store, Vec2::new(100.0, 100.0));
        store.set_move_target(id, MoveTarget::at(Vec2::new(103.0, 100.0)));

        update(&mut store, &settings);

        assert!(store.velocity(id).unwrap().is_stationary());
        assert_eq!(store.move_target(id).unwrap().point, None);
    }

    #[test]
    fn test_untargeted_drift_is_clamped() {
        let settings = Settings::new(800, 600);
        let mut store = Store::new();
        let id = store.spawn();
        store.set_position(id, Position::new(Vec2::new(1.0, 1.0)));
        store.set_velocity(
            id,
            Velocity {
                value: Vec2::new(-500.0, -500.0),
            },
        );

        for _ in 0..10 {
            update(&mut store, &settings);
        }
        assert_eq!(store.position(id).unwrap().value, Vec2::ZERO);
    }

    #[test]
    fn test_origin_is_a_reachable_destination() {
        let settings = Settings::new(800, 600);
        let mut store = Store::new();
        let id = spawn_mover(&mut store, Vec2::new(50.0, 50.0));
        store.set_move_target(id, MoveTarget::at(Vec2::ZERO));

        for _ in 0..60 {
            update(&mut store, &settings);
        }
        assert!(store.position(id).unwrap().value.distance(Vec2::ZERO) < settings.arrival_radius);
        assert_eq!(store.move_target(id).unwrap().point, None);
    }
}
