use std::collections::HashMap;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 1, tags = ["2024", "sorting"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    left: Vec<u32>,
    right: Vec<u32>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| -> anyhow::Result<(u32, u32)> {
                let mut ids = line.split_whitespace();
                let (Some(l), Some(r), None) = (ids.next(), ids.next(), ids.next()) else {
                    return Err(anyhow!("(line {}) expected two location ids", idx + 1));
                };
                Ok((
                    l.parse().with_context(|| format!("(line {}) {l:?}", idx + 1))?,
                    r.parse().with_context(|| format!("(line {}) {r:?}", idx + 1))?,
                ))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map(|pairs| {
                let (left, right) = pairs.into_iter().unzip();
                SharedData { left, right }
            })
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.left.sort_unstable();
        shared.right.sort_unstable();
        let distance: u64 = shared
            .left
            .iter()
            .zip(&shared.right)
            .map(|(l, r)| u64::from(l.abs_diff(*r)))
            .sum();
        Ok(distance.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let counts = shared.right.iter().fold(HashMap::new(), |mut counts, id| {
            *counts.entry(*id).or_insert(0u64) += 1;
            counts
        });
        let similarity: u64 = shared
            .left
            .iter()
            .map(|id| u64::from(*id) * counts.get(id).copied().unwrap_or(0))
            .sum();
        Ok(similarity.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2024::solve;

    const SAMPLE: &str = "3   4\n4   3\n2   5\n1   3\n3   9\n3   3\n";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "11");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "31");
    }

    #[test]
    fn rejects_single_column() {
        let err = <Solver as AocParser>::parse("3   4\n5\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
