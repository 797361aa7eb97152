use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use tracing::trace;

use crate::utils::grid::{Direction, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 6, tags = ["2024", "grid", "simulation"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    /// `true` where an obstruction stands
    blocked: Grid<bool>,
    start: Pos,
    /// Cells on the guard's unobstructed route, first visit order
    route: Option<Vec<Pos>>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut start = None;
        let blocked = Grid::parse_with(input, |pos, c| match c {
            '#' => Ok(true),
            '.' => Ok(false),
            '^' => {
                start = Some(pos);
                Ok(false)
            }
            other => Err(ParseError::InvalidFormat(format!(
                "(line {}) unexpected map cell {other:?}",
                pos.row + 1
            ))),
        })?;
        let start = start.ok_or_else(|| ParseError::MissingData("no guard (^) on the map".into()))?;
        Ok(SharedData {
            blocked,
            start,
            route: None,
        })
    }
}

enum Walk {
    Exits(Vec<Pos>),
    Loops,
}

/// Walks the guard from `start` facing up, optionally with one extra obstruction.
fn walk(blocked: &Grid<bool>, start: Pos, extra: Option<Pos>) -> Walk {
    // bit per direction of every (cell, heading) already seen
    let mut seen = blocked.map_fill(0u8);
    let mut order = Vec::new();
    let mut pos = start;
    let mut dir = Direction::Up;

    loop {
        let mask = 1 << dir as u8;
        if seen[pos] & mask != 0 {
            return Walk::Loops;
        }
        if seen[pos] == 0 {
            order.push(pos);
        }
        seen[pos] |= mask;

        let Some(next) = pos.step(dir, blocked) else {
            return Walk::Exits(order);
        };
        if blocked[next] || Some(next) == extra {
            dir = dir.turn_right();
        } else {
            pos = next;
        }
    }
}

fn route(shared: &mut SharedData) -> Result<&[Pos], SolveError> {
    if shared.route.is_none() {
        match walk(&shared.blocked, shared.start, None) {
            Walk::Exits(route) => shared.route = Some(route),
            Walk::Loops => {
                return Err(SolveError::SolveFailed("the guard never leaves the map".into()));
            }
        }
    }
    Ok(shared.route.as_deref().unwrap_or_default())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(route(shared)?.len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let start = shared.start;
        let candidates: Vec<Pos> = route(shared)?
            .iter()
            .copied()
            .filter(|&p| p != start)
            .collect();
        trace!(candidates = candidates.len(), "trying obstructions");

        let loops = candidates
            .into_iter()
            .filter(|&p| matches!(walk(&shared.blocked, start, Some(p)), Walk::Loops))
            .count();
        Ok(loops.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2024::solve;

    const SAMPLE: &str = "\
....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "41");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "6");
    }

    #[test]
    fn missing_guard() {
        assert!(matches!(
            <Solver as AocParser>::parse("..#\n...\n"),
            Err(ParseError::MissingData(_))
        ));
    }
}
