use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::parse::{number, numbered_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 2, tags = ["2024"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<i32>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        numbered_lines(input)
            .map(|(line_no, line)| {
                line.split_whitespace()
                    .map(|level| number(level, line_no))
                    .collect()
            })
            .collect()
    }
}

/// Strictly increasing or decreasing by 1 to 3 at every step.
fn is_safe(levels: &[i32]) -> bool {
    let increasing = levels.windows(2).all(|w| (1..=3).contains(&(w[1] - w[0])));
    increasing || levels.windows(2).all(|w| (1..=3).contains(&(w[0] - w[1])))
}

fn is_safe_dampened(levels: &[i32]) -> bool {
    is_safe(levels)
        || (0..levels.len()).any(|skip| {
            let mut dampened = levels.to_vec();
            dampened.remove(skip);
            is_safe(&dampened)
        })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let safe = shared
            .iter()
            .filter(|report| is_safe(report))
            .count();
        Ok(safe.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let safe = shared
            .iter()
            .filter(|report| is_safe_dampened(report))
            .count();
        Ok(safe.to_string())
    }
}
