//! Headless scenario runner for the desert RTS core.
//!
//! Runs the simulation without graphics: a scripted scenario drives
//! synthetic input frames through `World::tick`, and the runner emits
//! JSON state summaries (stdout) plus optional ASCII map renders.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod ascii;
pub mod runner;
pub mod scenario;
