//! ASCII map renders for terminal review.
//!
//! Downsamples the world onto a character grid: fog first, then spice and
//! buildings, units on top.

use spice_core::fog::Visibility;
use spice_core::math::Vec2;
use spice_core::store::ComponentKind;
use spice_core::world::World;

fn entity_char(world: &World, id: spice_core::store::EntityId) -> Option<char> {
    use spice_core::components::UnitKind;
    if let Some(unit) = world.store.unit(id) {
        return Some(match unit.kind {
            UnitKind::Harvester => 'H',
            UnitKind::Trike => 't',
            UnitKind::Quad => 'q',
        });
    }
    if world.store.has(id, ComponentKind::Refinery) {
        return Some('R');
    }
    if world.store.has(id, ComponentKind::Barracks) {
        return Some('B');
    }
    if world.store.has(id, ComponentKind::Spice) {
        return Some('%');
    }
    None
}

/// Render the world onto a `width` x `height` character grid.
#[must_use]
pub fn render(world: &World, width: usize, height: usize) -> String {
    let map_w = f64::from(world.settings.map_width);
    let map_h = f64::from(world.settings.map_height);
    let mut grid = vec![vec![' '; width]; height];

    // Fog backdrop
    for (row, line) in grid.iter_mut().enumerate() {
        for (col, cell) in line.iter_mut().enumerate() {
            let wx = (col as f64 + 0.5) / width as f64 * map_w;
            let wy = (row as f64 + 0.5) / height as f64 * map_h;
            *cell = match world.fog.visibility_at_world(Vec2::new(wx, wy)) {
                Visibility::Hidden => ' ',
                Visibility::Shroud => '.',
                Visibility::Visible => ':',
            };
        }
    }

    // Entities, units in a second pass so they win contested cells
    for units_pass in [false, true] {
        for id in world.store.ids() {
            if world.store.has(id, ComponentKind::Unit) != units_pass {
                continue;
            }
            let (Some(pos), Some(ch)) = (world.store.position(id), entity_char(world, id)) else {
                continue;
            };
            let col = ((pos.value.x / map_w) * width as f64) as usize;
            let row = ((pos.value.y / map_h) * height as f64) as usize;
            if col < width && row < height {
                grid[row][col] = ch;
            }
        }
    }

    let mut out = String::with_capacity((width + 1) * (height + 2));
    for line in &grid {
        out.extend(line.iter());
        out.push('\n');
    }
    out.push_str("legend: H harvester  t trike  q quad  R refinery  B barracks  % spice\n");
    out
}
