//! Advent of Code puzzle solutions with automatic registration
//!
//! Solutions are organized by year. Each one derives `AocSolver` for part
//! dispatch and `AutoRegisterSolver` to submit itself as a plugin, so linking
//! this crate is enough for `SolverRegistryBuilder::register_all_plugins` to
//! find every day.

pub mod utils;

#[cfg(feature = "year-2024")]
pub mod year_2024;
