use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

use crate::utils::parse::{number, numbered_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 22, tags = ["2024", "prng"])]
pub struct Solver;

const PRUNE: u64 = 16_777_216;
const ROUNDS: usize = 2000;
/// Price changes range over -9..=9
const CHANGE_VALUES: usize = 19;
const SEQUENCES: usize = CHANGE_VALUES.pow(4);

/// Only the low 24 bits of `secret` survive the first prune, so the
/// multiplications may wrap.
pub fn next_secret(mut secret: u64) -> u64 {
    secret = (secret ^ secret.wrapping_mul(64)) % PRUNE;
    secret = (secret ^ (secret / 32)) % PRUNE;
    (secret ^ secret.wrapping_mul(2048)) % PRUNE
}

fn secrets(seed: u64) -> impl Iterator<Item = u64> {
    std::iter::successors(Some(seed), |&s| Some(next_secret(s))).take(ROUNDS + 1)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        numbered_lines(input)
            .map(|(line_no, line)| number(line, line_no))
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .iter()
            .filter_map(|&seed| secrets(seed).last())
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // bananas per sequence of four changes, encoded base 19
        let mut bananas = vec![0u32; SEQUENCES];
        // last buyer that already sold on a sequence
        let mut sold_by = vec![usize::MAX; SEQUENCES];

        for (buyer, &seed) in shared.iter().enumerate() {
            let prices: Vec<u32> = secrets(seed).map(|s| (s % 10) as u32).collect();
            let mut key = 0;
            for (i, pair) in prices.windows(2).enumerate() {
                let change = (pair[1] + 9 - pair[0]) as usize;
                key = (key * CHANGE_VALUES + change) % SEQUENCES;
                if i >= 3 && sold_by[key] != buyer {
                    sold_by[key] = buyer;
                    bananas[key] += pair[1];
                }
            }
        }

        let best = bananas.iter().max().copied().unwrap_or(0);
        Ok(best.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2024::solve;

    #[test]
    fn secret_sequence() {
        let sequence: Vec<u64> = secrets(123).skip(1).take(10).collect();
        assert_eq!(
            sequence,
            vec![
                15887950, 16495136, 527345, 704524, 1553684, 12683156, 11100544, 12249484,
                7753432, 5908254
            ]
        );
    }

    #[test]
    fn oversized_seed_is_pruned_instead_of_overflowing() {
        assert_eq!(next_secret((1 << 60) + 123), 15887950);
        assert_eq!(solve::<Solver>("1152921504606846976\n", 1), "0");
    }

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>("1\n10\n100\n2024\n", 1), "37327623");
        assert_eq!(solve::<Solver>("1\n2\n3\n2024\n", 2), "23");
    }
}
