use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::digits::{concat, shift_past};
use crate::utils::parse::{number, numbered_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 7, tags = ["2024", "search"])]
pub struct Solver;

#[derive(Debug)]
pub struct Equation {
    target: u64,
    operands: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Equation>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        numbered_lines(input)
            .map(|(line_no, line)| {
                let (target, operands) = line.split_once(':').ok_or_else(|| {
                    ParseError::InvalidFormat(format!("(line {line_no}) missing ':'"))
                })?;
                let operands = operands
                    .split_whitespace()
                    .map(|op| number(op, line_no))
                    .collect::<Result<Vec<_>, _>>()?;
                if operands.is_empty() {
                    return Err(ParseError::MissingData(format!("(line {line_no}) no operands")));
                }
                Ok(Equation {
                    target: number(target, line_no)?,
                    operands,
                })
            })
            .collect()
    }
}

/// Works backwards from the target, undoing the last operator: the right-most
/// operand must have been added, multiplied or (with `concat`) appended.
fn solvable(target: u64, operands: &[u64], with_concat: bool) -> bool {
    match operands {
        [] => false,
        [only] => *only == target,
        [rest @ .., last] => {
            let last = *last;
            (target >= last && solvable(target - last, rest, with_concat))
                || (last != 0 && target % last == 0 && solvable(target / last, rest, with_concat))
                || (with_concat
                    && target > last
                    && shift_past(last).is_some_and(|shift| {
                        let prefix = target / shift;
                        concat(prefix, last) == Some(target) && solvable(prefix, rest, with_concat)
                    }))
        }
    }
}

fn calibration(equations: &[Equation], with_concat: bool) -> u64 {
    equations
        .iter()
        .filter(|eq| solvable(eq.target, &eq.operands, with_concat))
        .map(|eq| eq.target)
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(calibration(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(calibration(shared, true).to_string())
    }
}
