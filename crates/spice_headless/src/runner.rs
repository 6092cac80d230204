//! Scenario execution and per-run summaries.

use serde::Serialize;

use spice_core::components::HarvesterState;
use spice_core::input::InputFrame;
use spice_core::math::Vec2;
use spice_core::settings::Settings;
use spice_core::store::EntityId;
use spice_core::world::World;

use crate::ascii;
use crate::scenario;

/// Runner configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Ticks to simulate.
    pub ticks: u64,
    /// RNG seed.
    pub seed: u64,
    /// Emit a JSON summary line to stdout every N ticks (0 = final only).
    pub summary_every: u64,
    /// Print an ASCII map render at the end of the run.
    pub ascii: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: 3600,
            seed: 0,
            summary_every: 0,
            ascii: false,
        }
    }
}

/// One harvester's state in a summary.
#[derive(Debug, Clone, Serialize)]
pub struct HarvesterSnapshot {
    /// Entity id, as displayed.
    pub id: String,
    /// Current state name.
    pub state: HarvesterState,
    /// Spice on board.
    pub carried: i32,
}

/// Per-run (or per-interval) state summary.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Ticks completed.
    pub tick: u64,
    /// Player money.
    pub money: i32,
    /// Live entity count.
    pub entities: usize,
    /// Total spice left in the ground.
    pub spice_remaining: i32,
    /// Total spice paid out so far.
    pub spice_delivered: i32,
    /// Every harvester's state.
    pub harvesters: Vec<HarvesterSnapshot>,
}

fn summarize(world: &World, delivered: i32) -> Summary {
    let mut spice_remaining = 0;
    let mut harvesters = Vec::new();
    for id in world.store.ids() {
        if let Some(spice) = world.store.spice(id) {
            spice_remaining += spice.amount;
        }
        if let Some(data) = world.store.harvester(id) {
            harvesters.push(HarvesterSnapshot {
                id: id.to_string(),
                state: data.state,
                carried: data.carried,
            });
        }
    }
    Summary {
        tick: world.tick_count(),
        money: world.player.money,
        entities: world.store.len(),
        spice_remaining,
        spice_delivered: delivered,
        harvesters,
    }
}

fn print_summary(summary: &Summary) {
    match serde_json::to_string(summary) {
        Ok(line) => println!("{line}"),
        Err(err) => tracing::error!(error = %err, "failed to serialize summary"),
    }
}

/// Synthetic right-click ordering the harvester onto a spice field. The
/// camera starts at the origin, so world and screen coordinates coincide
/// at scenario scale.
fn harvest_order(world: &World, harvester: EntityId, field: EntityId) -> Option<InputFrame> {
    let field_pos = world.store.position(field)?.value;
    let _ = world.store.harvester(harvester)?;
    Some(InputFrame {
        cursor: world.camera.world_to_screen(field_pos + Vec2::new(10.0, 10.0)),
        right_pressed: true,
        ..InputFrame::default()
    })
}

/// Run the standard scenario for the configured number of ticks.
///
/// The script selects the starting harvester and sends it to the nearest
/// spice field on the first tick; the economy loop does the rest.
pub fn run(config: &RunConfig) -> Summary {
    let mut world = World::new(Settings::new(1280, 720), config.seed);
    let setup = scenario::setup_standard(&mut world);

    if let Some(sel) = world.store.selectable_mut(setup.harvester) {
        sel.selected = true;
    }
    let order = harvest_order(&world, setup.harvester, setup.spice_fields[0]);

    let mut delivered = 0;
    for t in 0..config.ticks {
        let frame = if t == 0 {
            order.unwrap_or_default()
        } else {
            InputFrame::default()
        };
        let events = world.tick(&frame);

        for &(_, amount) in &events.spice_unloaded {
            delivered += amount;
        }
        if config.summary_every > 0 && world.tick_count() % config.summary_every == 0 {
            print_summary(&summarize(&world, delivered));
        }
    }

    let summary = summarize(&world, delivered);
    print_summary(&summary);
    if config.ascii {
        eprintln!("{}", ascii::render(&world, 80, 30));
    }
    summary
}
