//! Selection and command input decoding.
//!
//! The core never polls devices. An [`InputFrame`] carries the decoded
//! intents for one tick (cursor, button edges, pan keys); this module
//! turns them into selection state and movement/harvest commands.

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::components::{HarvesterState, MoveTarget, UnitKind};
use crate::math::Vec2;
use crate::settings::Settings;
use crate::store::{ComponentKind, EntityId, Store};

/// Decoded input intents for one tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputFrame {
    /// Pointer position in screen coordinates.
    pub cursor: Vec2,
    /// Left button went down this tick.
    pub left_pressed: bool,
    /// Left button came up this tick.
    pub left_released: bool,
    /// Right button went down this tick.
    pub right_pressed: bool,
    /// Cancel action (escape) this tick.
    pub cancel_pressed: bool,
    /// Pan-left key held.
    pub pan_left: bool,
    /// Pan-right key held.
    pub pan_right: bool,
    /// Pan-up key held.
    pub pan_up: bool,
    /// Pan-down key held.
    pub pan_down: bool,
}

/// Singleton drag-rectangle state, in screen coordinates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Drag {
    /// A drag is in progress.
    pub active: bool,
    /// Screen point where the button went down.
    pub start: Vec2,
    /// Most recent cursor position while dragging.
    pub end: Vec2,
}

/// Issue a plain move command to every selected entity.
pub fn command_move_selected(store: &mut Store, point: Vec2) {
    for id in store.ids() {
        let selected = store.selectable(id).is_some_and(|s| s.selected);
        if selected && store.has(id, ComponentKind::MoveTarget) {
            store.set_move_target(id, MoveTarget::at(point));
        }
    }
}

/// Last spice-field entity whose bounding box contains a world point.
fn spice_under(store: &Store, world: Vec2) -> Option<EntityId> {
    let mut hit = None;
    for id in store.ids() {
        if !store.has(id, ComponentKind::Spice) {
            continue;
        }
        let (Some(pos), Some(fp)) = (store.position(id), store.footprint(id)) else {
            continue;
        };
        if fp.contains(pos.value, world) {
            hit = Some(id);
        }
    }
    hit
}

fn select_only(store: &mut Store, keep: Option<EntityId>) {
    for id in store.ids() {
        if let Some(sel) = store.selectable_mut(id) {
            sel.selected = keep == Some(id);
        }
    }
}

fn rect_select(store: &mut Store, camera: &Camera, corner_a: Vec2, corner_b: Vec2) {
    let min = Vec2::new(corner_a.x.min(corner_b.x), corner_a.y.min(corner_b.y));
    let max = Vec2::new(corner_a.x.max(corner_b.x), corner_a.y.max(corner_b.y));

    for id in store.ids() {
        if store.selectable(id).is_none() {
            continue;
        }
        let Some(pos) = store.position(id).map(|p| p.value) else {
            continue;
        };
        let screen = camera.world_to_screen(pos);
        let inside =
            screen.x >= min.x && screen.x <= max.x && screen.y >= min.y && screen.y <= max.y;
        if let Some(sel) = store.selectable_mut(id) {
            sel.selected = inside;
        }
    }
}

fn single_click_select(store: &mut Store, camera: &Camera, cursor: Vec2) {
    let world = camera.screen_to_world(cursor);
    let mut hit = None;
    for id in store.ids() {
        if store.selectable(id).is_none() {
            continue;
        }
        let (Some(pos), Some(fp)) = (store.position(id), store.footprint(id)) else {
            continue;
        };
        // Last bounding-box match wins "top-most"
        if fp.contains(pos.value, world) {
            hit = Some(id);
        }
    }
    select_only(store, hit);
}

fn command_at(store: &mut Store, camera: &Camera, cursor: Vec2) {
    let world = camera.screen_to_world(cursor);
    let spice_hit = spice_under(store, world);

    for id in store.ids() {
        let selected = store.selectable(id).is_some_and(|s| s.selected);
        if !selected {
            continue;
        }

        let is_harvester = store
            .unit(id)
            .is_some_and(|u| u.kind == UnitKind::Harvester);
        if is_harvester {
            if let Some(spice) = spice_hit {
                if let Some(spice_pos) = store.position(spice).map(|p| p.value) {
                    if let Some(data) = store.harvester_mut(id) {
                        data.target_spice = Some(spice);
                        data.state = HarvesterState::MovingToSpice;
                    }
                    store.set_move_target(id, MoveTarget::at(spice_pos));
                    tracing::debug!(%id, %spice, "harvest order");
                    continue;
                }
            }
        }

        if store.has(id, ComponentKind::MoveTarget) {
            store.set_move_target(id, MoveTarget::at(world));
        }
    }
}

/// Decode one tick of pointer input into selection and commands.
///
/// `ui_blocked` suppresses drag starts and right-click commands while the
/// cursor is over the minimap or a placement is in progress; those clicks
/// belong to the minimap and build workflows.
pub fn update(
    store: &mut Store,
    drag: &mut Drag,
    camera: &Camera,
    settings: &Settings,
    input: &InputFrame,
    ui_blocked: bool,
) {
    if input.left_pressed && !ui_blocked {
        drag.active = true;
        drag.start = input.cursor;
        drag.end = input.cursor;
    }
    if drag.active {
        drag.end = input.cursor;
    }

    if input.left_released && drag.active {
        drag.active = false;
        let dx = (drag.end.x - drag.start.x).abs();
        let dy = (drag.end.y - drag.start.y).abs();
        if dx > f64::from(settings.drag_threshold) || dy > f64::from(settings.drag_threshold) {
            rect_select(store, camera, drag.start, drag.end);
        } else {
            single_click_select(store, camera, drag.end);
        }
    }

    if input.right_pressed && !ui_blocked {
        command_at(store, camera, input.cursor);
    }
}
