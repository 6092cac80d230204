//! Harvester economy state machine.
//!
//! Each harvester cycles: travel to a spice field, trickle-extract one
//! unit per tick, travel to the nearest refinery, unload into player
//! money, repeat. Spice and refinery targets are weak references and are
//! revalidated before every use; a vanished target re-routes the
//! harvester instead of wedging it.

use crate::components::{HarvesterData, HarvesterState, MoveTarget, Velocity};
use crate::math::Vec2;
use crate::production::Player;
use crate::settings::Settings;
use crate::store::{ComponentKind, EntityId, Store};
use crate::world::TickEvents;

/// Nearest refinery to a point: linear scan, first strict minimum in store
/// iteration order.
#[must_use]
pub fn find_nearest_refinery(store: &Store, from: Vec2) -> Option<EntityId> {
    let mut best: Option<(EntityId, f64)> = None;
    for id in store.ids() {
        if !store.has(id, ComponentKind::Refinery) {
            continue;
        }
        let Some(pos) = store.position(id).map(|p| p.value) else {
            continue;
        };
        let d = from.distance_squared(pos);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((id, d));
        }
    }
    best.map(|(id, _)| id)
}

fn spice_position(store: &Store, id: EntityId) -> Option<Vec2> {
    if !store.contains(id) || !store.has(id, ComponentKind::Spice) {
        return None;
    }
    store.position(id).map(|p| p.value)
}

/// Route a harvester that has lost its current objective: toward a
/// refinery if it carries anything, otherwise idle.
fn route_by_cargo(store: &Store, data: &mut HarvesterData, from: Vec2) -> Option<Vec2> {
    if data.carried > 0 {
        if let Some(refinery) = find_nearest_refinery(store, from) {
            data.target_refinery = Some(refinery);
            data.state = HarvesterState::MovingToRefinery;
            return store.position(refinery).map(|p| p.value);
        }
    }
    data.target_refinery = None;
    data.state = HarvesterState::Idle;
    None
}

/// Advance every harvester's state machine by one tick.
pub fn update(store: &mut Store, player: &mut Player, settings: &Settings, events: &mut TickEvents) {
    for id in store.ids() {
        let Some(mut data) = store.harvester(id).copied() else {
            continue;
        };
        let Some(pos) = store.position(id).map(|p| p.value) else {
            continue;
        };
        let before = data.state;

        let mut new_target: Option<Vec2> = None;
        let mut stop = false;

        match data.state {
            HarvesterState::Idle => {
                if let Some(spice_pos) =
                    data.target_spice.and_then(|s| spice_position(store, s))
                {
                    data.state = HarvesterState::MovingToSpice;
                    new_target = Some(spice_pos);
                } else {
                    data.target_spice = None;
                    if data.carried > 0 {
                        new_target = route_by_cargo(store, &mut data, pos);
                    }
                }
            }
            HarvesterState::MovingToSpice => {
                match data.target_spice.and_then(|s| spice_position(store, s)) {
                    None => {
                        data.target_spice = None;
                        stop = true;
                        new_target = route_by_cargo(store, &mut data, pos);
                    }
                    Some(spice_pos) => {
                        if pos.distance(spice_pos) < settings.harvest_radius {
                            data.state = HarvesterState::Harvesting;
                            stop = true;
                        } else {
                            new_target = Some(spice_pos);
                        }
                    }
                }
            }
            HarvesterState::Harvesting => {
                if data.is_full() {
                    new_target = route_by_cargo(store, &mut data, pos);
                } else {
                    match data.target_spice.filter(|&s| spice_position(store, s).is_some()) {
                        None => {
                            data.target_spice = None;
                            new_target = route_by_cargo(store, &mut data, pos);
                        }
                        Some(spice_id) => {
                            let remaining =
                                store.spice(spice_id).map_or(0, |s| s.amount);
                            if remaining <= 0 {
                                let _ = store.despawn(spice_id);
                                events.spice_depleted.push(spice_id);
                                data.target_spice = None;
                                data.state = HarvesterState::Idle;
                            } else {
                                let extracted = settings.harvest_rate.min(remaining);
                                if let Some(spice) = store.spice_mut(spice_id) {
                                    spice.amount -= extracted;
                                }
                                data.carried += extracted;
                                if store.spice(spice_id).is_some_and(|s| s.amount <= 0) {
                                    let _ = store.despawn(spice_id);
                                    events.spice_depleted.push(spice_id);
                                    data.target_spice = None;
                                    data.state = HarvesterState::Idle;
                                }
                            }
                        }
                    }
                }
            }
            HarvesterState::MovingToRefinery => {
                let refinery_pos = data
                    .target_refinery
                    .filter(|&r| store.contains(r) && store.has(r, ComponentKind::Refinery))
                    .and_then(|r| store.position(r).map(|p| p.value));
                match refinery_pos {
                    None => {
                        data.target_refinery = None;
                        match find_nearest_refinery(store, pos) {
                            Some(refinery) => {
                                data.target_refinery = Some(refinery);
                                new_target = store.position(refinery).map(|p| p.value);
                            }
                            None => {
                                data.state = HarvesterState::Idle;
                                stop = true;
                            }
                        }
                    }
                    Some(refinery_pos) => {
                        if pos.distance(refinery_pos) < settings.unload_radius {
                            data.state = HarvesterState::Unloading;
                            stop = true;
                        } else {
                            new_target = Some(refinery_pos);
                        }
                    }
                }
            }
            HarvesterState::Unloading => {
                player.deposit(data.carried);
                events.spice_unloaded.push((id, data.carried));
                tracing::debug!(%id, amount = data.carried, money = player.money, "harvester unloaded");
                data.carried = 0;
                data.state = HarvesterState::Idle;
                stop = true;
            }
        }

        if data.state != before {
            tracing::trace!(%id, from = ?before, to = ?data.state, "harvester transition");
        }

        if stop {
            store.set_velocity(id, Velocity::ZERO);
            if let Some(target) = store.move_target_mut(id) {
                target.clear();
            }
        }
        if let Some(point) = new_target {
            store.set_move_target(id, MoveTarget::at(point));
        }
        store.set_harvester(id, data);
    }
}
