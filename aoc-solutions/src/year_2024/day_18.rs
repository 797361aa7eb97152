use std::collections::VecDeque;

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::grid::{Grid, Pos};
use crate::utils::parse::{numbered_lines, numbers_exact};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 18, tags = ["2024", "grid", "bfs", "binary-search"])]
pub struct Solver;

pub const SIZE: usize = 71;
pub const FALLEN: usize = 1024;

/// Falling byte coordinates as `(x, y)`.
pub type Bytes = Vec<(usize, usize)>;

impl AocParser for Solver {
    type SharedData<'a> = Bytes;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        numbered_lines(input)
            .map(|(line_no, line)| {
                numbers_exact::<usize, 2>(line)
                    .map(|[x, y]| (x, y))
                    .map_err(|e| ParseError::InvalidFormat(format!("(line {line_no}) {e}")))
            })
            .collect()
    }
}

/// Steps from the top-left to the bottom-right corner of a `size x size`
/// memory space once the first `fallen` bytes have landed.
pub fn shortest_path(bytes: &[(usize, usize)], size: usize, fallen: usize) -> Option<usize> {
    let mut corrupted = Grid::new(size, size, false);
    for &(x, y) in bytes.iter().take(fallen) {
        if let Some(cell) = corrupted.get_mut(Pos::new(y, x)) {
            *cell = true;
        }
    }

    let (start, exit) = (Pos::new(0, 0), Pos::new(size - 1, size - 1));
    if corrupted[start] || corrupted[exit] {
        return None;
    }
    let mut steps = corrupted.map_fill(usize::MAX);
    steps[start] = 0;
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        if pos == exit {
            return Some(steps[pos]);
        }
        for (_, next) in corrupted.neighbours(pos) {
            if !corrupted[next] && steps[next] == usize::MAX {
                steps[next] = steps[pos] + 1;
                queue.push_back(next);
            }
        }
    }
    None
}

/// The first byte after which the exit can no longer be reached.
pub fn first_blocking_byte(bytes: &[(usize, usize)], size: usize) -> Option<(usize, usize)> {
    if shortest_path(bytes, size, bytes.len()).is_some() {
        return None;
    }
    // smallest count of fallen bytes that cuts the path
    let (mut reachable, mut blocked) = (0, bytes.len());
    while blocked - reachable > 1 {
        let mid = reachable + (blocked - reachable) / 2;
        if shortest_path(bytes, size, mid).is_some() {
            reachable = mid;
        } else {
            blocked = mid;
        }
    }
    bytes.get(blocked - 1).copied()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shortest_path(shared, SIZE, FALLEN)
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::SolveFailed("the exit is unreachable".into()))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        first_blocking_byte(shared, SIZE)
            .map(|(x, y)| format!("{x},{y}"))
            .ok_or_else(|| SolveError::SolveFailed("no byte blocks the exit".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
5,4
4,2
4,5
3,0
2,1
6,3
2,4
1,5
0,6
3,3
2,6
5,1
1,2
5,5
2,5
6,5
1,4
0,4
6,4
1,1
6,1
1,0
0,5
1,6
2,0
";

    #[test]
    fn sample() {
        let bytes = <Solver as AocParser>::parse(SAMPLE).unwrap();
        assert_eq!(shortest_path(&bytes, 7, 12), Some(22));
        assert_eq!(first_blocking_byte(&bytes, 7), Some((6, 1)));
    }

    #[test]
    fn open_space() {
        assert_eq!(shortest_path(&[], 7, 0), Some(12));
        assert_eq!(first_blocking_byte(&[(3, 3)], 7), None);
    }

    #[test]
    fn blocked_corner() {
        assert_eq!(shortest_path(&[(0, 0)], 7, 1), None);
        assert_eq!(first_blocking_byte(&[(1, 1), (6, 6)], 7), Some((6, 6)));
    }
}
