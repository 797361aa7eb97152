use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::parse::split_blocks;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2024, day = 25, tags = ["2024"])]
pub struct Solver;

const COLUMNS: usize = 5;
const ROWS: usize = 7;

/// Pin or tooth heights per column, not counting the solid base row.
type Heights = [u8; COLUMNS];

#[derive(Debug, Default)]
pub struct Schematics {
    locks: Vec<Heights>,
    keys: Vec<Heights>,
}

impl AocParser for Solver {
    type SharedData<'a> = Schematics;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut schematics = Schematics::default();
        for (index, block) in split_blocks(input).into_iter().enumerate() {
            let well_formed = block.len() == ROWS
                && block
                    .iter()
                    .all(|row| row.len() == COLUMNS && row.bytes().all(|b| b == b'#' || b == b'.'));
            if !well_formed {
                return Err(ParseError::InvalidFormat(format!(
                    "schematic {} is not a {COLUMNS}x{ROWS} grid of '#' and '.'",
                    index + 1
                )));
            }

            let mut heights = [0; COLUMNS];
            for row in &block[1..ROWS - 1] {
                for (height, b) in heights.iter_mut().zip(row.bytes()) {
                    *height += u8::from(b == b'#');
                }
            }

            match (block[0], block[ROWS - 1]) {
                ("#####", _) => schematics.locks.push(heights),
                (_, "#####") => schematics.keys.push(heights),
                _ => {
                    return Err(ParseError::InvalidFormat(format!(
                        "schematic {} is neither a lock nor a key",
                        index + 1
                    )));
                }
            }
        }
        Ok(schematics)
    }
}

fn fits(lock: &Heights, key: &Heights) -> bool {
    lock.iter()
        .zip(key)
        .all(|(l, k)| usize::from(l + k) <= ROWS - 2)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let pairs = shared
            .locks
            .iter()
            .flat_map(|lock| shared.keys.iter().map(move |key| (lock, key)))
            .filter(|(lock, key)| fits(lock, key))
            .count();
        Ok(pairs.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2024::solve;

    const SAMPLE: &str = "\
#####
.####
.####
.####
.#.#.
.#...
.....

#####
##.##
.#.##
...##
...#.
...#.
.....

.....
#....
#....
#...#
#.#.#
#.###
#####

.....
.....
#.#..
###..
###.#
###.#
#####

.....
.....
.....
#....
#.#..
#.#.#
#####
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "3");
    }

    #[test]
    fn heights() {
        let schematics = Solver::parse(SAMPLE).unwrap();
        assert_eq!(schematics.locks, vec![[0, 5, 3, 4, 3], [1, 2, 0, 5, 3]]);
        assert_eq!(schematics.keys[0], [5, 0, 2, 1, 3]);
    }

    #[test]
    fn rejects_ragged_schematic() {
        assert!(Solver::parse("#####\n.###\n").is_err());
    }
}
