use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::parse::{numbers_exact, split_blocks};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 13, tags = ["2024", "math"])]
pub struct Solver;

const PRIZE_OFFSET: i64 = 10_000_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Machine {
    a: (i64, i64),
    b: (i64, i64),
    prize: (i64, i64),
}

impl Machine {
    /// Cheapest `3a + b` reaching the prize, solved exactly with Cramer's rule.
    pub fn min_tokens(&self, press_limit: Option<i64>) -> Option<i64> {
        let det = self.a.0 * self.b.1 - self.a.1 * self.b.0;
        if det == 0 {
            // collinear buttons never show up in puzzle inputs
            return None;
        }
        let a_num = self.prize.0 * self.b.1 - self.prize.1 * self.b.0;
        let b_num = self.a.0 * self.prize.1 - self.a.1 * self.prize.0;
        if a_num % det != 0 || b_num % det != 0 {
            return None;
        }
        let (a, b) = (a_num / det, b_num / det);
        let in_limit = |n: i64| n >= 0 && press_limit.is_none_or(|limit| n <= limit);
        (in_limit(a) && in_limit(b)).then_some(3 * a + b)
    }

    fn far_away(self) -> Self {
        Self {
            prize: (self.prize.0 + PRIZE_OFFSET, self.prize.1 + PRIZE_OFFSET),
            ..self
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        split_blocks(input)
            .into_iter()
            .map(|block| {
                let [a, b, prize] = block[..] else {
                    return Err(ParseError::InvalidFormat(format!(
                        "expected 3 lines per machine, got {}",
                        block.len()
                    )));
                };
                let pair = |line| numbers_exact::<i64, 2>(line).map(|[x, y]| (x, y));
                Ok(Machine {
                    a: pair(a)?,
                    b: pair(b)?,
                    prize: pair(prize)?,
                })
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let tokens: i64 = shared.iter().filter_map(|m| m.min_tokens(Some(100))).sum();
        Ok(tokens.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let tokens: i64 = shared
            .iter()
            .filter_map(|m| m.far_away().min_tokens(None))
            .sum();
        Ok(tokens.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2024::solve;

    const SAMPLE: &str = "\
Button A: X+94, Y+34
Button B: X+22, Y+67
Prize: X=8400, Y=5400

Button A: X+26, Y+66
Button B: X+67, Y+21
Prize: X=12748, Y=12176

Button A: X+17, Y+86
Button B: X+84, Y+37
Prize: X=7870, Y=6450

Button A: X+69, Y+23
Button B: X+27, Y+71
Prize: X=18641, Y=10279
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "480");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "875318608908");
    }

    #[test]
    fn per_machine() {
        let machines = <Solver as AocParser>::parse(SAMPLE).unwrap();
        let near: Vec<_> = machines.iter().map(|m| m.min_tokens(Some(100))).collect();
        assert_eq!(near, vec![Some(280), None, Some(200), None]);
        let far: Vec<_> = machines.iter().map(|m| m.far_away().min_tokens(None)).collect();
        assert_eq!(far, vec![None, Some(459236326669), None, Some(416082282239)]);
    }
}
