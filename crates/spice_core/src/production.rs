//! Player economy, build catalog, and the construction/training workflow.
//!
//! The build menu is a 2-column icon grid docked under the minimap. Its
//! contents depend on selection: with a building selected it lists the
//! units that building can train, otherwise it lists buildings to place.
//! Placing is a small two-state machine over the [`Placement`] singleton.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Minimap, Rect};
use crate::components::{BuildingKind, UnitKind};
use crate::factory;
use crate::input::InputFrame;
use crate::math::Vec2;
use crate::settings::Settings;
use crate::store::{ComponentKind, EntityId, Store};
use crate::world::TickEvents;

/// The player's economy resource.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    /// Spendable money.
    pub money: i32,
}

impl Player {
    /// Create a player with starting money.
    #[must_use]
    pub const fn new(money: i32) -> Self {
        Self { money }
    }

    /// Whether the player can pay a cost.
    #[must_use]
    pub const fn can_afford(&self, cost: i32) -> bool {
        self.money >= cost
    }

    /// Deduct a cost. Returns false, deducting nothing, if unaffordable.
    pub fn spend(&mut self, cost: i32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.money -= cost;
        true
    }

    /// Add income (harvester unloads).
    pub fn deposit(&mut self, amount: i32) {
        self.money += amount;
    }
}

/// Static catalog entry for a constructible building.
///
/// Entries are baked in at startup and only ever serialized (state
/// summaries), never read back.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BuildInfo {
    /// Building kind this entry places.
    pub kind: BuildingKind,
    /// Display name.
    pub name: &'static str,
    /// Placement cost.
    pub cost: i32,
}

/// Static catalog entry for a trainable unit.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UnitInfo {
    /// Unit kind this entry trains.
    pub kind: UnitKind,
    /// Display name.
    pub name: &'static str,
    /// Training cost.
    pub cost: i32,
    /// Building kind that must be selected to train this unit.
    pub required_building: BuildingKind,
}

/// Immutable build/train catalog, created once at startup.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    /// Buildings the player can place.
    pub buildings: Vec<BuildInfo>,
    /// Units buildings can train.
    pub units: Vec<UnitInfo>,
}

impl Catalog {
    /// The standard catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            buildings: vec![
                BuildInfo {
                    kind: BuildingKind::Refinery,
                    name: "Refinery",
                    cost: 750,
                },
                BuildInfo {
                    kind: BuildingKind::Barracks,
                    name: "Barracks",
                    cost: 500,
                },
            ],
            units: vec![
                UnitInfo {
                    kind: UnitKind::Harvester,
                    name: "Harvester",
                    cost: 300,
                    required_building: BuildingKind::Refinery,
                },
                UnitInfo {
                    kind: UnitKind::Trike,
                    name: "Trike",
                    cost: 150,
                    required_building: BuildingKind::Barracks,
                },
                UnitInfo {
                    kind: UnitKind::Quad,
                    name: "Quad",
                    cost: 200,
                    required_building: BuildingKind::Barracks,
                },
            ],
        }
    }

    /// Units trainable from a building kind, in catalog order.
    pub fn trainable_from(&self, building: BuildingKind) -> impl Iterator<Item = &UnitInfo> {
        self.units
            .iter()
            .filter(move |u| u.required_building == building)
    }
}

/// A building placement in progress.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PendingBuild {
    /// Kind being placed.
    pub kind: BuildingKind,
    /// Cost to commit, copied from the catalog entry.
    pub cost: i32,
}

/// Singleton "choosing where to put a building" state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Placement {
    /// The placement in progress, if any.
    pub pending: Option<PendingBuild>,
}

impl Placement {
    /// Whether a placement is in progress.
    #[must_use]
    pub const fn is_placing(&self) -> bool {
        self.pending.is_some()
    }
}

const MENU_PADDING: i32 = 5;
const MENU_ROW_HEIGHT: i32 = 64;

/// Screen rectangle of the menu slot at `index` (2-column grid under the
/// minimap).
#[must_use]
pub fn menu_slot(minimap: &Minimap, index: usize) -> Rect {
    let origin_x = minimap.rect.x;
    let origin_y = minimap.rect.y + minimap.rect.h + 10;
    let slot_w = (minimap.rect.w - MENU_PADDING) / 2;
    let col = (index % 2) as i32;
    let row = (index / 2) as i32;
    Rect::new(
        origin_x + col * (slot_w + MENU_PADDING),
        origin_y + row * (MENU_ROW_HEIGHT + MENU_PADDING),
        slot_w,
        MENU_ROW_HEIGHT,
    )
}

fn menu_hit(minimap: &Minimap, cursor: Vec2, entries: usize) -> Option<usize> {
    (0..entries).find(|&i| menu_slot(minimap, i).contains(cursor))
}

/// Whether a screen point falls on any currently shown menu slot.
///
/// The shown entries depend on selection (unit entries with a building
/// selected, building entries otherwise), so the hot area does too.
#[must_use]
pub fn menu_contains(store: &Store, catalog: &Catalog, minimap: &Minimap, cursor: Vec2) -> bool {
    let entries = match selected_building(store) {
        Some((_, kind)) => catalog.trainable_from(kind).count(),
        None => catalog.buildings.len(),
    };
    menu_hit(minimap, cursor, entries).is_some()
}

/// Selected building, if exactly its kind matters: first selected entity
/// carrying a building marker.
#[must_use]
pub fn selected_building(store: &Store) -> Option<(EntityId, BuildingKind)> {
    store.ids().into_iter().find_map(|id| {
        let selected = store.selectable(id).is_some_and(|s| s.selected);
        if !selected {
            return None;
        }
        if store.has(id, ComponentKind::Refinery) {
            Some((id, BuildingKind::Refinery))
        } else if store.has(id, ComponentKind::Barracks) {
            Some((id, BuildingKind::Barracks))
        } else {
            None
        }
    })
}

/// Run the build-input workflow for one tick.
///
/// While placing: right-click or cancel aborts; left-click commits if
/// affordable (deduct, spawn at the cursor's world position), otherwise
/// aborts with money untouched. While not placing, a left press is tested
/// against the menu grid first (entering placement or training a unit),
/// then falls through to building selection in the world.
pub fn update_build_input(
    store: &mut Store,
    player: &mut Player,
    placement: &mut Placement,
    catalog: &Catalog,
    camera: &Camera,
    minimap: &Minimap,
    settings: &Settings,
    rng: &mut ChaCha8Rng,
    input: &InputFrame,
    events: &mut TickEvents,
) {
    if let Some(pending) = placement.pending {
        if input.right_pressed || input.cancel_pressed {
            placement.pending = None;
            return;
        }
        if input.left_pressed {
            placement.pending = None;
            if !player.spend(pending.cost) {
                tracing::debug!(
                    kind = ?pending.kind,
                    cost = pending.cost,
                    money = player.money,
                    "placement aborted, insufficient funds"
                );
                return;
            }
            let pos = camera.screen_to_world(input.cursor);
            let id = factory::spawn_building(store, pending.kind, pos);
            tracing::debug!(kind = ?pending.kind, %id, "building placed");
            events.buildings_placed.push(id);
        }
        return;
    }

    if !input.left_pressed {
        return;
    }

    // Menu hit-testing: unit entries when a building is selected, building
    // entries otherwise.
    if let Some((building_id, building_kind)) = selected_building(store) {
        let entries: Vec<&UnitInfo> = catalog.trainable_from(building_kind).collect();
        if let Some(index) = menu_hit(minimap, input.cursor, entries.len()) {
            let info = entries[index];
            if !player.spend(info.cost) {
                tracing::debug!(
                    unit = ?info.kind,
                    cost = info.cost,
                    money = player.money,
                    "training rejected, insufficient funds"
                );
                return;
            }
            let base = match store.position(building_id) {
                Some(p) => p.value,
                None => return,
            };
            let spawn_pos = Vec2::new(
                base.x + 32.0 + f64::from(rng.gen_range(0..64)),
                base.y + 32.0 + f64::from(rng.gen_range(0..64)),
            );
            let id = factory::spawn_unit(store, info.kind, spawn_pos, settings);
            tracing::debug!(unit = ?info.kind, %id, "unit trained");
            events.units_trained.push(id);
            return;
        }
    } else if let Some(index) = menu_hit(minimap, input.cursor, catalog.buildings.len()) {
        let info = catalog.buildings[index];
        placement.pending = Some(PendingBuild {
            kind: info.kind,
            cost: info.cost,
        });
        return;
    }

    if minimap.rect.contains(input.cursor) {
        return;
    }

    // No menu hit: building pick in the world. Single-select, last
    // bounding-box match wins, clicking empty ground deselects.
    let world = camera.screen_to_world(input.cursor);
    let mut hit: Option<EntityId> = None;
    for id in store.ids() {
        let is_building =
            store.has(id, ComponentKind::Refinery) || store.has(id, ComponentKind::Barracks);
        if !is_building || store.selectable(id).is_none() {
            continue;
        }
        let (Some(pos), Some(fp)) = (store.position(id), store.footprint(id)) else {
            continue;
        };
        if fp.contains(pos.value, world) {
            hit = Some(id);
        }
    }
    for id in store.ids() {
        let is_building =
            store.has(id, ComponentKind::Refinery) || store.has(id, ComponentKind::Barracks);
        if !is_building {
            continue;
        }
        if let Some(sel) = store.selectable_mut(id) {
            sel.selected = hit == Some(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    use crate::components::Selectable;

    fn fixture() -> (
        Store,
        Player,
        Placement,
        Catalog,
        Camera,
        Minimap,
        Settings,
        ChaCha8Rng,
    ) {
        let settings = Settings::new(800, 600);
        (
            Store::new(),
            Player::new(1000),
            Placement::default(),
            Catalog::standard(),
            Camera::default(),
            Minimap::standard(&settings),
            settings,
            ChaCha8Rng::seed_from_u64(7),
        )
    }

    fn left_click(cursor: Vec2) -> InputFrame {
        InputFrame {
            cursor,
            left_pressed: true,
            ..InputFrame::default()
        }
    }

    fn slot_center(minimap: &Minimap, index: usize) -> Vec2 {
        let r = menu_slot(minimap, index);
        Vec2::new(
            f64::from(r.x) + f64::from(r.w) / 2.0,
            f64::from(r.y) + f64::from(r.h) / 2.0,
        )
    }

    #[test]
    fn test_catalog_serializes_for_summaries() {
        let catalog = Catalog::standard();
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json["buildings"][0]["name"], "Refinery");
        assert_eq!(json["buildings"][0]["cost"], 750);
        assert_eq!(json["units"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_player_spend() {
        let mut p = Player::new(100);
        assert!(!p.spend(750));
        assert_eq!(p.money, 100);
        assert!(p.spend(100));
        assert_eq!(p.money, 0);
    }

    #[test]
    fn test_menu_click_enters_placement() {
        let (mut store, mut player, mut placement, catalog, camera, minimap, settings, mut rng) =
            fixture();
        let mut events = TickEvents::new(1);

        let input = left_click(slot_center(&minimap, 0));
        update_build_input(
            &mut store,
            &mut player,
            &mut placement,
            &catalog,
            &camera,
            &minimap,
            &settings,
            &mut rng,
            &input,
            &mut events,
        );

        let pending = placement.pending.unwrap();
        assert_eq!(pending.kind, BuildingKind::Refinery);
        assert_eq!(pending.cost, 750);
        assert_eq!(player.money, 1000, "entering placement costs nothing");
    }

    #[test]
    fn test_unaffordable_placement_aborts_unchanged() {
        let (mut store, _, mut placement, catalog, camera, minimap, settings, mut rng) = fixture();
        let mut player = Player::new(100);
        let mut events = TickEvents::new(1);
        placement.pending = Some(PendingBuild {
            kind: BuildingKind::Refinery,
            cost: 750,
        });

        let input = left_click(Vec2::new(400.0, 300.0));
        update_build_input(
            &mut store,
            &mut player,
            &mut placement,
            &catalog,
            &camera,
            &minimap,
            &settings,
            &mut rng,
            &input,
            &mut events,
        );

        assert!(!placement.is_placing());
        assert_eq!(player.money, 100);
        assert!(events.buildings_placed.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_affordable_placement_deducts_and_spawns() {
        let (mut store, mut player, mut placement, catalog, camera, minimap, settings, mut rng) =
            fixture();
        let mut events = TickEvents::new(1);
        placement.pending = Some(PendingBuild {
            kind: BuildingKind::Refinery,
            cost: 750,
        });

        let input = left_click(Vec2::new(400.0, 300.0));
        update_build_input(
            &mut store,
            &mut player,
            &mut placement,
            &catalog,
            &camera,
            &minimap,
            &settings,
            &mut rng,
            &input,
            &mut events,
        );

        assert_eq!(player.money, 250);
        assert_eq!(events.buildings_placed.len(), 1);
        let id = events.buildings_placed[0];
        assert!(store.has(id, ComponentKind::Refinery));
        assert_eq!(
            store.position(id).unwrap().value,
            Vec2::new(400.0, 300.0)
        );
    }

    #[test]
    fn test_right_click_cancels_placement() {
        let (mut store, mut player, mut placement, catalog, camera, minimap, settings, mut rng) =
            fixture();
        let mut events = TickEvents::new(1);
        placement.pending = Some(PendingBuild {
            kind: BuildingKind::Barracks,
            cost: 500,
        });

        let input = InputFrame {
            right_pressed: true,
            ..InputFrame::default()
        };
        update_build_input(
            &mut store,
            &mut player,
            &mut placement,
            &catalog,
            &camera,
            &minimap,
            &settings,
            &mut rng,
            &input,
            &mut events,
        );

        assert!(!placement.is_placing());
        assert_eq!(player.money, 1000);
    }

    #[test]
    fn test_training_requires_matching_building() {
        let (mut store, mut player, mut placement, catalog, camera, minimap, settings, mut rng) =
            fixture();
        let mut events = TickEvents::new(1);

        let refinery = factory::spawn_refinery(&mut store, Vec2::new(200.0, 200.0));
        store.selectable_mut(refinery).unwrap().selected = true;

        // Refinery menu lists only the harvester; slot 0 trains it
        let input = left_click(slot_center(&minimap, 0));
        update_build_input(
            &mut store,
            &mut player,
            &mut placement,
            &catalog,
            &camera,
            &minimap,
            &settings,
            &mut rng,
            &input,
            &mut events,
        );

        assert_eq!(player.money, 700);
        assert_eq!(events.units_trained.len(), 1);
        let unit = events.units_trained[0];
        assert_eq!(store.unit(unit).unwrap().kind, UnitKind::Harvester);
        let pos = store.position(unit).unwrap().value;
        assert!(pos.x >= 232.0 && pos.x < 296.0, "jittered near the building");
        assert!(pos.y >= 232.0 && pos.y < 296.0);
    }

    #[test]
    fn test_menu_contains_tracks_shown_entries() {
        let (mut store, _, _, catalog, _, minimap, _, _) = fixture();

        // No building selected: both building slots are hot
        assert!(menu_contains(&store, &catalog, &minimap, slot_center(&minimap, 0)));
        assert!(menu_contains(&store, &catalog, &minimap, slot_center(&minimap, 1)));
        let off_grid = Vec2::new(400.0, 300.0);
        assert!(!menu_contains(&store, &catalog, &minimap, off_grid));

        // Refinery selected: only its single unit entry is shown
        let refinery = factory::spawn_refinery(&mut store, Vec2::new(100.0, 100.0));
        store.selectable_mut(refinery).unwrap().selected = true;
        assert!(menu_contains(&store, &catalog, &minimap, slot_center(&minimap, 0)));
        assert!(!menu_contains(&store, &catalog, &minimap, slot_center(&minimap, 1)));
    }

    #[test]
    fn test_world_click_selects_building_exclusively() {
        let (mut store, mut player, mut placement, catalog, camera, minimap, settings, mut rng) =
            fixture();
        let mut events = TickEvents::new(1);

        let a = factory::spawn_refinery(&mut store, Vec2::new(100.0, 100.0));
        let b = factory::spawn_barracks(&mut store, Vec2::new(300.0, 100.0));
        store.set_selectable(a, Selectable { selected: true });

        let input = left_click(Vec2::new(320.0, 120.0));
        update_build_input(
            &mut store,
            &mut player,
            &mut placement,
            &catalog,
            &camera,
            &minimap,
            &settings,
            &mut rng,
            &input,
            &mut events,
        );

        assert!(!store.selectable(a).unwrap().selected);
        assert!(store.selectable(b).unwrap().selected);
    }
}
