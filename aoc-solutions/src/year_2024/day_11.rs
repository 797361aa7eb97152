use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::digits::split_even_digits;
use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::parse::number;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 11, tags = ["2024", "dp"])]
pub struct Solver;

/// Stones produced by one stone after some blinks, keyed by `(stone, blinks)`.
pub struct Blink;

impl Blink {
    fn next(stone: u64) -> Vec<u64> {
        if stone == 0 {
            vec![1]
        } else if let Some((high, low)) = split_even_digits(stone) {
            vec![high, low]
        } else {
            vec![stone * 2024]
        }
    }
}

impl DpProblem<(u64, u32), u64> for Blink {
    fn deps(&self, &(stone, blinks): &(u64, u32)) -> Vec<(u64, u32)> {
        if blinks == 0 {
            return vec![];
        }
        Blink::next(stone)
            .into_iter()
            .map(|child| (child, blinks - 1))
            .collect()
    }

    fn compute(&self, &(_, blinks): &(u64, u32), deps: Vec<u64>) -> u64 {
        if blinks == 0 { 1 } else { deps.iter().sum() }
    }
}

pub struct SharedData {
    stones: Vec<u64>,
    /// Kept across parts: 75 blinks reuse every 25-blink result
    cache: DpCache<(u64, u32), u64, HashMapBackend<(u64, u32), u64>, Blink>,
}

impl SharedData {
    pub fn stones_after(&self, blinks: u32) -> u64 {
        self.stones
            .iter()
            .map(|&stone| self.cache.get(&(stone, blinks)))
            .sum()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let stones = input
            .split_whitespace()
            .map(|s| number(s, 1))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SharedData {
            stones,
            cache: DpCache::with_problem(HashMapBackend::new(), Blink),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.stones_after(25).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.stones_after(75).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2024::solve;

    #[test]
    fn sample() {
        let shared = <Solver as AocParser>::parse("125 17").unwrap();
        assert_eq!(shared.stones_after(1), 3);
        assert_eq!(shared.stones_after(6), 22);
        assert_eq!(solve::<Solver>("125 17", 1), "55312");
        assert_eq!(solve::<Solver>("125 17", 2), "65601038650482");
    }

    #[test]
    fn blink_rules() {
        assert_eq!(Blink::next(0), vec![1]);
        assert_eq!(Blink::next(1000), vec![10, 0]);
        assert_eq!(Blink::next(99), vec![9, 9]);
        assert_eq!(Blink::next(1), vec![2024]);
    }
}
