//! Tinycade: deterministic simulation cores for four tiny arcade games.
//!
//! Each game lives behind the same seam: a world struct holding the full
//! state, a per-tick input value, and a `step(world, input) -> Vec<Event>`
//! function. No rendering, no input polling, no clocks; embedders drive
//! the tick and consume the events. Runs are reproducible from a seed.
//!
//! - [`maze`]: grid maze chase with sub-cell movement and tunnel rows
//! - [`spiral`]: open-field shooter against spiral-pursuit ghosts
//! - [`snake`]: the classic growing snake on a cell grid
//! - [`wrecker`]: turn-based vector racing on generated tracks

pub mod config;
pub mod domain;
pub mod maze;
pub mod snake;
pub mod spiral;
pub mod wrecker;
