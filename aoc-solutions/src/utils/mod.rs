//! Helpers shared by the daily solvers

pub mod digits;
pub mod dp_cache;
pub mod grid;
pub mod parse;
