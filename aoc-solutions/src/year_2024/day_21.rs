use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::parse::number;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 21, tags = ["2024", "dp"])]
pub struct Solver;

/// Key layout as `(row, col)`, with the gap every arm must avoid.
struct Keypad {
    keys: &'static [(char, (i8, i8))],
    gap: (i8, i8),
}

impl Keypad {
    fn locate(&self, key: char) -> Option<(i8, i8)> {
        self.keys.iter().find(|(k, _)| *k == key).map(|&(_, pos)| pos)
    }

    /// Button sequences (ending in `A`) moving the arm from `from` to `to`
    /// and pressing: all horizontal moves then all vertical, or the reverse,
    /// whichever of those never crosses the gap.
    fn routes(&self, from: char, to: char) -> Vec<Vec<char>> {
        let (Some(start), Some(end)) = (self.locate(from), self.locate(to)) else {
            return Vec::new();
        };
        let (d_row, d_col) = (end.0 - start.0, end.1 - start.1);
        let vertical = vec![if d_row < 0 { '^' } else { 'v' }; d_row.unsigned_abs() as usize];
        let horizontal = vec![if d_col < 0 { '<' } else { '>' }; d_col.unsigned_abs() as usize];

        let mut routes = Vec::with_capacity(2);
        if (start.0, end.1) != self.gap {
            routes.push([&horizontal[..], &vertical[..], &['A'][..]].concat());
        }
        if (end.0, start.1) != self.gap {
            let route = [&vertical[..], &horizontal[..], &['A'][..]].concat();
            if !routes.contains(&route) {
                routes.push(route);
            }
        }
        routes
    }
}

const NUMERIC: Keypad = Keypad {
    keys: &[
        ('7', (0, 0)),
        ('8', (0, 1)),
        ('9', (0, 2)),
        ('4', (1, 0)),
        ('5', (1, 1)),
        ('6', (1, 2)),
        ('1', (2, 0)),
        ('2', (2, 1)),
        ('3', (2, 2)),
        ('0', (3, 1)),
        ('A', (3, 2)),
    ],
    gap: (3, 0),
};

const DIRECTIONAL: Keypad = Keypad {
    keys: &[
        ('^', (0, 1)),
        ('A', (0, 2)),
        ('<', (1, 0)),
        ('v', (1, 1)),
        ('>', (1, 2)),
    ],
    gap: (0, 0),
};

/// Human presses needed to press `to` on a directional keypad whose arm rests
/// on `from`, with `depth` robot-operated directional keypads in between
/// (depth 0 is the human's own keypad).
struct PressCost;

impl PressCost {
    /// Consecutive key pairs of a route, starting from `A`.
    fn pairs(route: &[char]) -> impl Iterator<Item = (char, char)> + '_ {
        std::iter::once('A').chain(route.iter().copied()).zip(route.iter().copied())
    }
}

impl DpProblem<(char, char, u8), u64> for PressCost {
    fn deps(&self, &(from, to, depth): &(char, char, u8)) -> Vec<(char, char, u8)> {
        if depth == 0 {
            return vec![];
        }
        DIRECTIONAL
            .routes(from, to)
            .iter()
            .flat_map(|route| Self::pairs(route).map(|(a, b)| (a, b, depth - 1)).collect::<Vec<_>>())
            .collect()
    }

    fn compute(&self, &(from, to, depth): &(char, char, u8), deps: Vec<u64>) -> u64 {
        if depth == 0 {
            return 1;
        }
        // deps are laid out route after route
        let mut costs = deps.into_iter();
        DIRECTIONAL
            .routes(from, to)
            .iter()
            .map(|route| costs.by_ref().take(route.len()).sum::<u64>())
            .min()
            .unwrap_or(u64::MAX)
    }
}

type CostCache = DpCache<(char, char, u8), u64, HashMapBackend<(char, char, u8), u64>, PressCost>;

pub struct SharedData<'a> {
    codes: Vec<(&'a str, u64)>,
    cost: CostCache,
}

impl SharedData<'_> {
    /// Fewest human presses to type `code` through `robots` directional robots.
    fn presses(&self, code: &str, robots: u8) -> u64 {
        let keys: Vec<char> = code.chars().collect();
        PressCost::pairs(&keys)
            .map(|(from, to)| {
                NUMERIC
                    .routes(from, to)
                    .iter()
                    .map(|route| {
                        PressCost::pairs(route)
                            .map(|(a, b)| self.cost.get(&(a, b, robots)))
                            .sum::<u64>()
                    })
                    .min()
                    .unwrap_or(u64::MAX)
            })
            .sum()
    }

    fn complexity(&self, robots: u8) -> u64 {
        self.codes
            .iter()
            .map(|&(code, value)| self.presses(code, robots) * value)
            .sum()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let codes = input
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .map(|(line_no, code)| {
                if let Some(bad) = code.chars().find(|&c| NUMERIC.locate(c).is_none()) {
                    return Err(ParseError::InvalidFormat(format!(
                        "(line {line_no}) {bad:?} is not on the numeric keypad"
                    )));
                }
                let digits = code.trim_end_matches('A');
                Ok((code, if digits.is_empty() { 0 } else { number(digits, line_no)? }))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SharedData {
            codes,
            cost: DpCache::with_problem(HashMapBackend::new(), PressCost),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.complexity(2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.complexity(25).to_string())
    }
}
