use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::dp_cache::{DpCache, DpProblem, VecBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 19, tags = ["2024", "dp", "strings"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData<'a> {
    towels: Vec<&'a str>,
    designs: Vec<&'a str>,
    arrangements: Option<Vec<u64>>,
}

/// Ways to finish `design` from a given offset.
struct Arrangements<'a> {
    towels: &'a [&'a str],
    design: &'a str,
}

impl DpProblem<usize, u64> for Arrangements<'_> {
    fn deps(&self, &offset: &usize) -> Vec<usize> {
        let rest = &self.design[offset..];
        self.towels
            .iter()
            .filter(|towel| rest.starts_with(**towel))
            .map(|towel| offset + towel.len())
            .collect()
    }

    fn compute(&self, &offset: &usize, deps: Vec<u64>) -> u64 {
        if offset == self.design.len() {
            1
        } else {
            deps.iter().sum()
        }
    }
}

fn arrangements<'s>(shared: &'s mut SharedData<'_>) -> &'s [u64] {
    shared.arrangements.get_or_insert_with(|| {
        shared
            .designs
            .iter()
            .map(|&design| {
                let problem = Arrangements {
                    towels: &shared.towels,
                    design,
                };
                DpCache::with_problem(VecBackend::with_capacity(design.len() + 1), problem).get(&0)
            })
            .collect()
    })
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());
        let towels: Vec<&str> = lines
            .next()
            .ok_or_else(|| ParseError::MissingData("no towel patterns".into()))?
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        Ok(SharedData {
            towels,
            designs: lines.collect(),
            arrangements: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let possible = arrangements(shared).iter().filter(|&&ways| ways > 0).count();
        Ok(possible.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(arrangements(shared).iter().sum::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2024::solve;

    const SAMPLE: &str = "\
r, wr, b, g, bwu, rb, gb, br

brwrr
bggr
gbbr
rrbgbr
ubwu
bwurrg
brgr
bbrgwb
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "6");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "16");
    }

    #[test]
    fn per_design() {
        let mut shared = <Solver as AocParser>::parse(SAMPLE).unwrap();
        assert_eq!(arrangements(&mut shared), &[2u64, 1, 4, 6, 0, 1, 2, 0]);
    }
}
