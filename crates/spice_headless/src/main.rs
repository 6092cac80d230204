//! Headless desert-RTS scenario runner.
//!
//! Runs the simulation core without graphics, for CI and smoke checks.
//!
//! # Usage
//!
//! ```bash
//! # One minute of simulated time, final JSON summary on stdout
//! cargo run -p spice_headless -- run --ticks 3600
//!
//! # Periodic summaries plus an ASCII map render on stderr
//! cargo run -p spice_headless -- run --ticks 7200 --summary-every 600 --ascii
//!
//! # Tick-throughput benchmark
//! cargo run -p spice_headless -- benchmark --ticks 36000
//! ```
//!
//! Output (stdout): JSON summaries, one per line.
//! Logs (stderr): tracing output.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use spice_headless::runner::{run, RunConfig};

#[derive(Parser)]
#[command(name = "spice_headless")]
#[command(about = "Headless desert-RTS scenario runner for CI")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the standard scenario
    Run {
        /// Ticks to simulate (60 per second of game time)
        #[arg(short, long, default_value = "3600")]
        ticks: u64,

        /// Random seed
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Emit a summary every N ticks (0 = final summary only)
        #[arg(long, default_value = "0")]
        summary_every: u64,

        /// Print an ASCII map render at the end
        #[arg(long)]
        ascii: bool,
    },

    /// Run N ticks and report throughput
    Benchmark {
        /// Number of ticks to run
        #[arg(short, long, default_value = "36000")]
        ticks: u64,

        /// Random seed
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logging goes to stderr; stdout carries the JSON summaries.
    // RUST_LOG overrides the default level; --verbose bumps it to debug.
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(filter)
        .init();

    match cli.command {
        Some(Commands::Run {
            ticks,
            seed,
            summary_every,
            ascii,
        }) => {
            cmd_run(ticks, seed, summary_every, ascii);
        }
        Some(Commands::Benchmark { ticks, seed }) => {
            cmd_benchmark(ticks, seed);
        }
        None => cmd_run(3600, 0, 0, false),
    }
}

fn cmd_run(ticks: u64, seed: u64, summary_every: u64, ascii: bool) {
    tracing::info!(ticks, seed, "running standard scenario");
    let summary = run(&RunConfig {
        ticks,
        seed,
        summary_every,
        ascii,
    });
    tracing::info!(
        money = summary.money,
        delivered = summary.spice_delivered,
        entities = summary.entities,
        "run complete"
    );
}

fn cmd_benchmark(ticks: u64, seed: u64) {
    use std::time::Instant;

    use spice_core::input::InputFrame;
    use spice_core::settings::Settings;
    use spice_core::world::World;
    use spice_headless::scenario;

    tracing::info!(ticks, "running tick benchmark");

    let mut world = World::new(Settings::new(1280, 720), seed);
    scenario::setup_standard(&mut world);

    // Warmup
    for _ in 0..100 {
        world.tick(&InputFrame::default());
    }

    let start = Instant::now();
    for _ in 0..ticks {
        world.tick(&InputFrame::default());
    }
    let elapsed = start.elapsed();
    let tps = ticks as f64 / elapsed.as_secs_f64();

    eprintln!("ticks: {ticks}");
    eprintln!("duration: {:.3}s", elapsed.as_secs_f64());
    eprintln!("ticks/second: {tps:.1}");
    eprintln!(
        "ms/tick: {:.4}",
        elapsed.as_millis() as f64 / ticks as f64
    );
    eprintln!("entities: {}", world.store.len());
}
