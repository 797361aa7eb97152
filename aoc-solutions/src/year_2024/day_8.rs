use std::collections::{BTreeMap, HashSet};

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use glam::IVec2;
use itertools::Itertools;

use crate::utils::grid::Grid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 8, tags = ["2024", "grid"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    /// `(cols, rows)`
    size: IVec2,
    /// Antenna positions keyed by frequency
    antennas: BTreeMap<u8, Vec<IVec2>>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::from_lines(input)?;
        let too_large = || ParseError::InvalidFormat("map too large".into());
        let size = IVec2::new(
            grid.cols().try_into().map_err(|_| too_large())?,
            grid.rows().try_into().map_err(|_| too_large())?,
        );
        let mut antennas: BTreeMap<u8, Vec<IVec2>> = BTreeMap::new();
        for (pos, &c) in grid.iter() {
            if c.is_ascii_alphanumeric() {
                antennas
                    .entry(c)
                    .or_default()
                    .push(pos.as_ivec2().ok_or_else(too_large)?);
            }
        }
        Ok(SharedData { size, antennas })
    }
}

impl SharedData {
    /// Distinct in-bounds antinodes. Each pair contributes the points
    /// `b + k * (b - a)` for `k` in `steps`, in both directions.
    fn antinodes(&self, steps: impl Iterator<Item = i32> + Clone) -> usize {
        let mut found = HashSet::new();
        for positions in self.antennas.values() {
            for (&a, &b) in positions.iter().tuple_combinations() {
                for (from, to) in [(a, b), (b, a)] {
                    let delta = to - from;
                    for k in steps.clone() {
                        let p = to + delta * k;
                        if !self.contains(p) {
                            break;
                        }
                        found.insert(p);
                    }
                }
            }
        }
        found.len()
    }

    fn contains(&self, p: IVec2) -> bool {
        p.cmpge(IVec2::ZERO).all() && p.cmplt(self.size).all()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.antinodes(1..=1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // the antennas themselves are harmonics (k = 0)
        Ok(shared.antinodes(0..).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2024::solve;

    const SAMPLE: &str = "\
............
........0...
.....0......
.......0....
....0.......
......A.....
............
............
........A...
.........A..
............
............
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "14");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "34");
    }

    #[test]
    fn harmonics_of_three_antennas() {
        let input = "\
T.........
...T......
.T........
..........
..........
..........
..........
..........
..........
..........
";
        assert_eq!(solve::<Solver>(input, 2), "9");
    }
}
