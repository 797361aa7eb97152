use std::collections::HashSet;

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use tracing::trace;

use crate::utils::parse::{numbered_lines, numbers_exact};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 14, tags = ["2024", "simulation"])]
pub struct Solver;

pub const WIDTH: i64 = 101;
pub const HEIGHT: i64 = 103;

/// Occupied cells with a fully occupied 2x2 block up-left of them needed
/// before a layout counts as a picture.
const PICTURE_THRESHOLD: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Robot {
    pos: (i64, i64),
    vel: (i64, i64),
}

impl Robot {
    pub fn after(&self, seconds: i64, width: i64, height: i64) -> (i64, i64) {
        (
            (self.pos.0 + self.vel.0 * seconds).rem_euclid(width),
            (self.pos.1 + self.vel.1 * seconds).rem_euclid(height),
        )
    }
}

/// Product of robot counts per quadrant; robots on a middle line count for none.
pub fn safety_factor(robots: &[Robot], width: i64, height: i64, seconds: i64) -> u64 {
    let (mid_x, mid_y) = (width / 2, height / 2);
    let mut quadrants = [0u64; 4];
    for robot in robots {
        let (x, y) = robot.after(seconds, width, height);
        if x == mid_x || y == mid_y {
            continue;
        }
        let index = usize::from(x > mid_x) + 2 * usize::from(y > mid_y);
        quadrants[index] += 1;
    }
    quadrants.iter().product()
}

/// First second after the start at which the robots cluster into a picture,
/// if any within one full period of the board.
pub fn find_picture(robots: &[Robot], width: i64, height: i64) -> Option<i64> {
    (1..=width * height).find(|&seconds| {
        let occupied: HashSet<(i64, i64)> = robots
            .iter()
            .map(|r| r.after(seconds, width, height))
            .collect();
        let clustered = occupied
            .iter()
            .filter(|&&(x, y)| {
                occupied.contains(&(x - 1, y))
                    && occupied.contains(&(x, y - 1))
                    && occupied.contains(&(x - 1, y - 1))
            })
            .count();
        if clustered > PICTURE_THRESHOLD {
            trace!(seconds, clustered, "picture candidate");
        }
        clustered > PICTURE_THRESHOLD
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Robot>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        numbered_lines(input)
            .map(|(line_no, line)| {
                let [px, py, vx, vy] = numbers_exact::<i64, 4>(line)
                    .map_err(|e| ParseError::InvalidFormat(format!("(line {line_no}) {e}")))?;
                Ok(Robot {
                    pos: (px, py),
                    vel: (vx, vy),
                })
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(safety_factor(shared, WIDTH, HEIGHT, 100).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        find_picture(shared, WIDTH, HEIGHT)
            .map(|seconds| seconds.to_string())
            .ok_or_else(|| SolveError::SolveFailed("the robots never form a picture".into()))
    }
}
