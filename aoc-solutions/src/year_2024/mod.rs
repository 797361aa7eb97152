//! Advent of Code 2024

pub mod day_1;
pub mod day_2;
pub mod day_3;
pub mod day_4;
pub mod day_5;
pub mod day_6;
pub mod day_7;
pub mod day_8;
pub mod day_9;
pub mod day_10;
pub mod day_11;
pub mod day_12;
pub mod day_13;
pub mod day_14;
pub mod day_15;
pub mod day_16;
pub mod day_17;
pub mod day_18;
pub mod day_19;
pub mod day_20;
pub mod day_21;
pub mod day_22;
pub mod day_23;
pub mod day_24;
pub mod day_25;

/// Parses `input` and solves `part`, panicking on any error.
#[cfg(test)]
pub(crate) fn solve<S: aoc_solver::SolverExt>(input: &str, part: u8) -> String {
    let mut shared = S::parse(input).unwrap_or_else(|e| panic!("parse failed: {e}"));
    S::solve_part_checked_range(&mut shared, part).unwrap_or_else(|e| panic!("part {part} failed: {e}"))
}
