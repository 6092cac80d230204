//! Pairwise collision separation.
//!
//! All-pairs check over unit entities, O(n²) per tick. Fine at the unit
//! counts this game runs (tens of units); the collision bench tracks the
//! ceiling.

use crate::math::Vec2;
use crate::query::Filter;
use crate::store::{ComponentKind, Store};

/// Push overlapping units apart.
///
/// Units are circles of half their footprint width, allowed to overlap by
/// 50% of their combined radii before separation kicks in. Overlapping
/// pairs are pushed apart symmetrically along the line between centers;
/// exactly coincident centers push along the x axis to avoid a zero-length
/// direction.
pub fn resolve(store: &mut Store) {
    let filter = Filter::has_all(&[
        ComponentKind::Position,
        ComponentKind::Unit,
        ComponentKind::Footprint,
    ]);
    let mut units: Vec<(crate::store::EntityId, f64)> = Vec::new();
    for id in filter.entities(store) {
        if let Some(fp) = store.footprint(id) {
            units.push((id, fp.radius()));
        }
    }

    for i in 0..units.len() {
        for j in (i + 1)..units.len() {
            let (id_a, r_a) = units[i];
            let (id_b, r_b) = units[j];
            let (Some(pos_a), Some(pos_b)) = (
                store.position(id_a).map(|p| p.value),
                store.position(id_b).map(|p| p.value),
            ) else {
                continue;
            };

            let required = (r_a + r_b) * 0.5;
            let d = pos_a.distance(pos_b);
            if d >= required {
                continue;
            }

            let direction = if d == 0.0 {
                Vec2::new(1.0, 0.0)
            } else {
                (pos_b - pos_a).scale(1.0 / d)
            };
            let push = (required - d) / 2.0;

            if let Some(p) = store.position_mut(id_a) {
                p.value = p.value - direction.scale(push);
            }
            if let Some(p) = store.position_mut(id_b) {
                p.value = p.value + direction.scale(push);
            }
        }
    }
}
