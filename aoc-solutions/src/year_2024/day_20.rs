use std::collections::VecDeque;

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use glam::IVec2;

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 20, tags = ["2024", "grid", "bfs"])]
pub struct Solver;

pub const MIN_SAVING: usize = 100;

#[derive(Debug)]
pub struct RaceTrack {
    /// Picoseconds from the start along the track; `None` for walls
    distance: Grid<Option<usize>>,
    /// Track cells in race order
    path: Vec<Pos>,
}

impl AocParser for Solver {
    type SharedData<'a> = RaceTrack;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (mut start, mut end) = (None, None);
        let walls = Grid::parse_with(input, |pos, c| match c {
            '#' => Ok(true),
            '.' => Ok(false),
            'S' => {
                start = Some(pos);
                Ok(false)
            }
            'E' => {
                end = Some(pos);
                Ok(false)
            }
            _ => Err(ParseError::InvalidFormat(format!(
                "(line {}) unexpected track cell {c:?}",
                pos.row + 1
            ))),
        })?;
        let start = start.ok_or_else(|| ParseError::MissingData("no start (S)".into()))?;
        let end = end.ok_or_else(|| ParseError::MissingData("no end (E)".into()))?;

        let mut distance = walls.map_fill(None);
        let mut path = Vec::new();
        distance[start] = Some(0);
        let mut queue = VecDeque::from([start]);
        while let Some(pos) = queue.pop_front() {
            path.push(pos);
            let here = distance[pos].unwrap_or_default();
            for (_, next) in walls.neighbours(pos) {
                if !walls[next] && distance[next].is_none() {
                    distance[next] = Some(here + 1);
                    queue.push_back(next);
                }
            }
        }
        if distance[end].is_none() {
            return Err(ParseError::InvalidFormat("the end is not on the track".into()));
        }
        Ok(RaceTrack { distance, path })
    }
}

/// Cheats lasting at most `max_cheat` picoseconds that save at least `min_saving`.
pub fn count_cheats(track: &RaceTrack, max_cheat: usize, min_saving: usize) -> usize {
    let grid = &track.distance;
    let reach = i32::try_from(max_cheat).unwrap_or(i32::MAX);
    let mut count = 0;
    for &from in &track.path {
        let Some(before) = grid[from] else { continue };
        for d_row in -reach..=reach {
            let span = reach - d_row.abs();
            for d_col in -span..=span {
                let Some(to) = from.checked_offset(IVec2::new(d_col, d_row), grid.rows(), grid.cols()) else {
                    continue;
                };
                let Some(after) = grid[to] else { continue };
                let cheat = from.manhattan(to);
                if after >= before + cheat + min_saving {
                    count += 1;
                }
            }
        }
    }
    count
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_cheats(shared, 2, MIN_SAVING).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_cheats(shared, 20, MIN_SAVING).to_string())
    }
}
