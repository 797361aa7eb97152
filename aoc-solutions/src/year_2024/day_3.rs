use std::sync::LazyLock;

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use regex::Regex;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 3, tags = ["2024", "regex"])]
pub struct Solver;

static INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"mul\((\d{1,3}),(\d{1,3})\)|do\(\)|don't\(\)").expect("valid instruction regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Instruction {
    Mul(u64, u64),
    Do,
    Dont,
}

fn instructions(memory: &str) -> impl Iterator<Item = Instruction> + '_ {
    INSTRUCTION.captures_iter(memory).filter_map(|caps| {
        match (caps.get(1), caps.get(2)) {
            (Some(a), Some(b)) => Some(Instruction::Mul(a.as_str().parse().ok()?, b.as_str().parse().ok()?)),
            _ if &caps[0] == "do()" => Some(Instruction::Do),
            _ => Some(Instruction::Dont),
        }
    })
}

impl AocParser for Solver {
    /// The corrupted memory itself; instructions are scanned lazily.
    type SharedData<'a> = &'a str;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = instructions(shared)
            .map(|ins| match ins {
                Instruction::Mul(a, b) => a * b,
                _ => 0,
            })
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // the enabled flag carries over line breaks
        let (_, total) = instructions(shared).fold((true, 0u64), |(enabled, total), ins| match ins {
            Instruction::Mul(a, b) if enabled => (enabled, total + a * b),
            Instruction::Mul(..) => (enabled, total),
            Instruction::Do => (true, total),
            Instruction::Dont => (false, total),
        });
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2024::solve;

    #[test]
    fn sample() {
        let part1 = "xmul(2,4)%&mul[3,7]!@^do_not_mul(5,5)+mul(32,64]then(mul(11,8)mul(8,5))";
        let part2 = "xmul(2,4)&mul[3,7]!^don't()_mul(5,5)+mul(32,64](mul(11,8)undo()?mul(8,5))";
        assert_eq!(solve::<Solver>(part1, 1), "161");
        assert_eq!(solve::<Solver>(part2, 2), "48");
    }

    #[test]
    fn disabled_state_spans_lines() {
        let input = "mul(1,2)don't()\nmul(3,4)\ndo()mul(5,6)";
        assert_eq!(solve::<Solver>(input, 1), "44");
        assert_eq!(solve::<Solver>(input, 2), "32");
    }

    #[test]
    fn rejects_long_operands() {
        assert_eq!(solve::<Solver>("mul(1234,5)mul(123,4)", 1), "492");
    }
}
