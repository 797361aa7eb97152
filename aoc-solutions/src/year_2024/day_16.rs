use std::cmp::Reverse;
use std::collections::BinaryHeap;

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use strum::{EnumCount, IntoEnumIterator};

use crate::utils::grid::{Direction, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 16, tags = ["2024", "grid", "dijkstra"])]
pub struct Solver;

const STEP_COST: u64 = 1;
const TURN_COST: u64 = 1000;

/// Cost per facing, indexed by `Direction as usize`
type Costs = [u64; Direction::COUNT];

#[derive(Debug)]
pub struct SharedData {
    walls: Grid<bool>,
    start: Pos,
    end: Pos,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

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
                "(line {}) unexpected maze cell {c:?}",
                pos.row + 1
            ))),
        })?;
        Ok(SharedData {
            walls,
            start: start.ok_or_else(|| ParseError::MissingData("no start tile (S)".into()))?,
            end: end.ok_or_else(|| ParseError::MissingData("no end tile (E)".into()))?,
        })
    }
}

/// Lowest cost to every `(tile, facing)` state from `sources`.
///
/// With `backwards`, moves are replayed in reverse so the costs are those of
/// reaching one of the sources instead.
fn dijkstra(walls: &Grid<bool>, sources: &[(Pos, Direction)], backwards: bool) -> Grid<Costs> {
    let mut dist = walls.map_fill([u64::MAX; Direction::COUNT]);
    let mut queue = BinaryHeap::new();
    for &(pos, dir) in sources {
        dist[pos][dir as usize] = 0;
        queue.push(Reverse((0, pos, dir)));
    }

    while let Some(Reverse((cost, pos, dir))) = queue.pop() {
        if cost > dist[pos][dir as usize] {
            continue;
        }
        let step_dir = if backwards { dir.reverse() } else { dir };
        let forward = pos
            .step(step_dir, walls)
            .filter(|&next| !walls[next])
            .map(|next| (cost + STEP_COST, next, dir));
        let turns = [dir.turn_left(), dir.turn_right()].map(|turned| (cost + TURN_COST, pos, turned));

        for (next_cost, next_pos, next_dir) in forward.into_iter().chain(turns) {
            let best = &mut dist[next_pos][next_dir as usize];
            if next_cost < *best {
                *best = next_cost;
                queue.push(Reverse((next_cost, next_pos, next_dir)));
            }
        }
    }
    dist
}

fn best_score(from_start: &Grid<Costs>, end: Pos) -> Result<u64, SolveError> {
    from_start[end]
        .iter()
        .copied()
        .min()
        .filter(|&score| score != u64::MAX)
        .ok_or_else(|| SolveError::SolveFailed("the end tile is unreachable".into()))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let from_start = dijkstra(&shared.walls, &[(shared.start, Direction::Right)], false);
        Ok(best_score(&from_start, shared.end)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let from_start = dijkstra(&shared.walls, &[(shared.start, Direction::Right)], false);
        let best = best_score(&from_start, shared.end)?;
        let arrivals: Vec<_> = Direction::iter().map(|dir| (shared.end, dir)).collect();
        let to_end = dijkstra(&shared.walls, &arrivals, true);

        let seats = shared
            .walls
            .positions()
            .filter(|&pos| {
                Direction::iter().any(|dir| {
                    let (a, b) = (from_start[pos][dir as usize], to_end[pos][dir as usize]);
                    a != u64::MAX && b != u64::MAX && a + b == best
                })
            })
            .count();
        Ok(seats.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2024::solve;

    const FIRST: &str = "\
###############
#.......#....E#
#.#.###.#.###.#
#.....#.#...#.#
#.###.#####.#.#
#.#.#.......#.#
#.#.#####.###.#
#...........#.#
###.#.#####.#.#
#...#.....#.#.#
#.#.#.###.#.#.#
#.....#...#.#.#
#.###.#.#.#.#.#
#S..#.....#...#
###############
";

    const SECOND: &str = "\
#################
#...#...#...#..E#
#.#.#.#.#.#.#.#.#
#.#.#.#...#...#.#
#.#.#.#.###.#.#.#
#...#.#.#.....#.#
#.#.#.#.#.#####.#
#.#...#.#.#.....#
#.#.#####.#.###.#
#.#.#.......#...#
#.#.###.#####.###
#.#.#...#.....#.#
#.#.#.#####.###.#
#.#.#.........#.#
#.#.#.#########.#
#S#.............#
#################
";

    #[test]
    fn lowest_score() {
        assert_eq!(solve::<Solver>(FIRST, 1), "7036");
        assert_eq!(solve::<Solver>(SECOND, 1), "11048");
    }

    #[test]
    fn best_seats() {
        assert_eq!(solve::<Solver>(FIRST, 2), "45");
        assert_eq!(solve::<Solver>(SECOND, 2), "64");
    }

    #[test]
    fn corridors() {
        let straight = "#####\n#S.E#\n#####\n";
        assert_eq!(solve::<Solver>(straight, 1), "2");
        assert_eq!(solve::<Solver>(straight, 2), "3");

        // two equally good routes around a pillar
        let split = "#####\n#...#\n#S#E#\n#...#\n#####\n";
        assert_eq!(solve::<Solver>(split, 1), "3004");
        assert_eq!(solve::<Solver>(split, 2), "8");
    }

    #[test]
    fn walled_off_end() {
        let mut shared = <Solver as AocParser>::parse("#####\n#S#E#\n#####\n").unwrap();
        assert!(matches!(
            <Solver as PartSolver<1>>::solve(&mut shared),
            Err(SolveError::SolveFailed(_))
        ));
    }
}
