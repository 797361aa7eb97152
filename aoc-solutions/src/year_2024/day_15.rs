use std::collections::HashSet;

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::grid::{Direction, Grid, Pos};
use crate::utils::parse::split_blocks;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 15, tags = ["2024", "grid", "simulation"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    warehouse: Grid<u8>,
    moves: Vec<Direction>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let blocks = split_blocks(input);
        let [map, moves] = &blocks[..] else {
            return Err(ParseError::InvalidFormat(
                "expected a warehouse map and a move list separated by a blank line".into(),
            ));
        };
        let warehouse = Grid::parse_with(&map.join("\n"), |pos, c| match c {
            '#' | '.' | 'O' | '@' => Ok(c as u8),
            _ => Err(ParseError::InvalidFormat(format!(
                "(line {}) unexpected warehouse cell {c:?}",
                pos.row + 1
            ))),
        })?;
        let moves = moves
            .iter()
            .flat_map(|line| line.chars())
            .map(|c| {
                Direction::from_arrow(c)
                    .ok_or_else(|| ParseError::InvalidFormat(format!("unexpected move {c:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SharedData { warehouse, moves })
    }
}

/// Doubles every cell horizontally; boxes become `[]`.
fn widen(warehouse: &Grid<u8>) -> Result<Grid<u8>, SolveError> {
    let text: String = (0..warehouse.rows())
        .map(|r| {
            let row: String = warehouse
                .row(r)
                .iter()
                .map(|&c| match c {
                    b'#' => "##",
                    b'O' => "[]",
                    b'@' => "@.",
                    _ => "..",
                })
                .collect();
            row + "\n"
        })
        .collect();
    Grid::from_lines(&text).map_err(|e| SolveError::SolveFailed(Box::new(e)))
}

/// Moves the robot one step if everything in front of it can be pushed.
fn push(warehouse: &mut Grid<u8>, robot: Pos, dir: Direction) -> Pos {
    // cells to move, nearest first
    let mut moving = vec![robot];
    let mut queued = HashSet::from([robot]);
    let mut i = 0;
    while i < moving.len() {
        let Some(next) = moving[i].step(dir, warehouse) else {
            return robot;
        };
        i += 1;
        let mut enqueue = |p: Pos| {
            if queued.insert(p) {
                moving.push(p);
            }
        };
        match warehouse[next] {
            b'#' => return robot,
            b'O' => enqueue(next),
            b'[' | b']' if !dir.is_vertical() => enqueue(next),
            b'[' => {
                enqueue(next);
                enqueue(Pos::new(next.row, next.col + 1));
            }
            b']' => {
                enqueue(next);
                enqueue(Pos::new(next.row, next.col - 1));
            }
            _ => {}
        }
    }

    for &pos in moving.iter().rev() {
        // farthest first, so `next` is already empty
        if let Some(next) = pos.step(dir, warehouse) {
            warehouse.swap(pos, next);
        }
    }
    robot.step(dir, warehouse).unwrap_or(robot)
}

fn gps_after_moves(mut warehouse: Grid<u8>, moves: &[Direction]) -> Result<String, SolveError> {
    let mut robot = warehouse
        .find(&b'@')
        .ok_or_else(|| SolveError::SolveFailed("no robot (@) in the warehouse".into()))?;
    for &dir in moves {
        robot = push(&mut warehouse, robot, dir);
    }
    let gps: usize = warehouse
        .iter()
        .filter(|(_, c)| matches!(c, b'O' | b'['))
        .map(|(pos, _)| 100 * pos.row + pos.col)
        .sum();
    Ok(gps.to_string())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        gps_after_moves(shared.warehouse.clone(), &shared.moves)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        gps_after_moves(widen(&shared.warehouse)?, &shared.moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2024::solve;

    const SMALL: &str = "\
########
#..O.O.#
##@.O..#
#...O..#
#.#.O..#
#...O..#
#......#
########

<^^>>>vv<v>>v<<
";

    const LARGE: &str = "\
##########
#..O..O.O#
#......O.#
#.OO..O.O#
#..O@..O.#
#O#..O...#
#O..O..O.#
#.OO.O.OO#
#....O...#
##########

<vv>^<v^>v>^vv^v>v<>v^v<v<^vv<<<^><<><>>v<vvv<>^v^>^<<<><<v<<<v^vv^v>^
vvv<<^>^v^^><<>>><>^<<><^vv^^<>vvv<>><^^v>^>vv<>v<<<<v<^v>^<^^>>>^<v<v
><>vv>v^v^<>><>>>><^^>vv>v<^^^>>v^v^<^^>v^^>v^<^v>v<>>v^v^<v>v^^<^^vv<
<<v<^>>^^^^>>>v^<>vvv^><v<<<>^^^vv^<vvv>^>v<^^^^v<>^>vvvv><>>v^<<^^^^^
^><^><>>><>^^<<^^v>>><^<v>^<vv>>v>>>^v><>^v><<<<v>>v<v<v>vvv>^<><<>^><
^>><>^v<><^vvv<^^<><v<<<<<><^v<<<><<<^^<v<^^^><^>>^<v^><<<^>>^v<v^v<v^
>^>>^v>vv>^<<^v<>><<><<v<<v><>v<^vv<<<>^^v^>^^>>><<^v>>v^v><^^>>^<>vv^
<><^^>^^^<><vvvvv^v<v<<>^v<v>v<<^><<><<><<<^^<<<^<<>><<><^^^>^^<>^>v<>
^^>vv<^v^v<vv>^<><v<^v>^^^>>>^^vvv^>vvv<>>>^<^>>>>>^<<^v>^vvv<>^<><<v>
v^^>>><<^^<>>^v^<v^vv<>v^<<>^<^v^v><^<<<><<^<v><v<>vv>>v><v^<vv<>v^<<^
";

    const WIDE_SMALL: &str = "\
#######
#...#.#
#.....#
#..OO@#
#..O..#
#.....#
#######

<vv<<^^<<^^
";

    #[test]
    fn narrow() {
        assert_eq!(solve::<Solver>(SMALL, 1), "2028");
        assert_eq!(solve::<Solver>(LARGE, 1), "10092");
    }

    #[test]
    fn wide() {
        assert_eq!(solve::<Solver>(LARGE, 2), "9021");
        assert_eq!(solve::<Solver>(WIDE_SMALL, 2), "618");
    }

    #[test]
    fn wide_boxes_push_as_a_tree() {
        let shared = <Solver as AocParser>::parse(WIDE_SMALL).unwrap();
        let mut wide = widen(&shared.warehouse).unwrap();
        let mut robot = wide.find(&b'@').unwrap();
        for dir in [Direction::Left, Direction::Down, Direction::Down, Direction::Left, Direction::Left, Direction::Up] {
            robot = push(&mut wide, robot, dir);
        }
        // the upward push moved the stacked boxes together
        assert_eq!(wide.row(2), b"##...[][]...##");
        assert_eq!(wide.row(3), b"##....[]....##");
        assert_eq!(wide.row(4), b"##.....@....##");
    }
}
