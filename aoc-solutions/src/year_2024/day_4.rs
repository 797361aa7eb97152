use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use glam::IVec2;

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 4, tags = ["2024", "grid"])]
pub struct Solver;

const EIGHT_WAYS: [IVec2; 8] = [
    IVec2::new(-1, -1),
    IVec2::NEG_Y,
    IVec2::new(1, -1),
    IVec2::NEG_X,
    IVec2::X,
    IVec2::new(-1, 1),
    IVec2::Y,
    IVec2::ONE,
];

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::from_lines(input)
    }
}

fn spells(grid: &Grid<u8>, start: Pos, dir: IVec2, word: &[u8]) -> bool {
    let mut pos = Some(start);
    for &letter in word {
        match pos.and_then(|p| grid.get(p)) {
            Some(&c) if c == letter => {}
            _ => return false,
        }
        pos = pos.and_then(|p| p.checked_offset(dir, grid.rows(), grid.cols()));
    }
    true
}

fn is_x_mas(grid: &Grid<u8>, center: Pos) -> bool {
    let corner = |offset| {
        center
            .checked_offset(offset, grid.rows(), grid.cols())
            .map(|p| grid[p])
    };
    let diagonal = |a, b| {
        matches!(
            (corner(a), corner(b)),
            (Some(b'M'), Some(b'S')) | (Some(b'S'), Some(b'M'))
        )
    };
    grid[center] == b'A'
        && diagonal(IVec2::NEG_ONE, IVec2::ONE)
        && diagonal(IVec2::new(1, -1), IVec2::new(-1, 1))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared
            .positions()
            .filter(|&p| shared[p] == b'X')
            .map(|p| {
                EIGHT_WAYS
                    .iter()
                    .filter(|&&dir| spells(shared, p, dir, b"XMAS"))
                    .count()
            })
            .sum::<usize>();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared.positions().filter(|&p| is_x_mas(shared, p)).count();
        Ok(count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2024::solve;

    const SAMPLE: &str = "\
MMMSXXMASM
MSAMXMSMSA
AMXSXMAAMM
MSAMASMSMX
XMASAMXAMM
XXAMMXXAMA
SMSMSASXSS
SAXAMASAAA
MAMMMXMMMM
MXMXAXMASX
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "18");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "9");
    }

    #[test]
    fn backwards_and_diagonal() {
        assert_eq!(solve::<Solver>("SAMX", 1), "1");
        assert_eq!(solve::<Solver>("X...\n.M..\n..A.\n...S", 1), "1");
    }
}
