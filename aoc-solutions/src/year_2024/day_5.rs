use std::cmp::Ordering;
use std::collections::HashSet;

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::parse::{number, numbered_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 5, tags = ["2024", "sorting"])]
pub struct Solver;

#[derive(Debug, Default)]
pub struct SharedData {
    /// `(a, b)`: page `a` must be printed before page `b`
    rules: HashSet<(u32, u32)>,
    updates: Vec<Vec<u32>>,
}

impl SharedData {
    fn order(&self, a: u32, b: u32) -> Ordering {
        if self.rules.contains(&(a, b)) {
            Ordering::Less
        } else if self.rules.contains(&(b, a)) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    fn is_ordered(&self, update: &[u32]) -> bool {
        update.is_sorted_by(|a, b| self.order(*a, *b) != Ordering::Greater)
    }
}

fn middle(update: &[u32]) -> u64 {
    update.get(update.len() / 2).copied().map_or(0, u64::from)
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut shared = SharedData::default();
        for (line_no, line) in numbered_lines(input) {
            if let Some((before, after)) = line.split_once('|') {
                shared
                    .rules
                    .insert((number(before, line_no)?, number(after, line_no)?));
            } else {
                let update = line
                    .split(',')
                    .map(|page| number(page, line_no))
                    .collect::<Result<Vec<_>, _>>()?;
                shared.updates.push(update);
            }
        }
        if shared.updates.is_empty() {
            return Err(ParseError::MissingData("no page updates".into()));
        }
        Ok(shared)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared
            .updates
            .iter()
            .filter(|update| shared.is_ordered(update))
            .map(|update| middle(update))
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared
            .updates
            .iter()
            .filter(|update| !shared.is_ordered(update))
            .map(|update| {
                let mut fixed = update.clone();
                fixed.sort_by(|a, b| shared.order(*a, *b));
                middle(&fixed)
            })
            .sum();
        Ok(sum.to_string())
    }
}
