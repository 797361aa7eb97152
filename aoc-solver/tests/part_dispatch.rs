//! Property tests for `#[derive(AocSolver)]` part dispatch

use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver, SolverExt};
use proptest::prelude::*;

fn parse_ints(input: &str) -> Result<Vec<i64>, ParseError> {
    input
        .split_whitespace()
        .map(|t| {
            t.parse()
                .map_err(|_| ParseError::InvalidFormat(format!("not an integer: {t}")))
        })
        .collect()
}

fn join(numbers: &[i64]) -> String {
    numbers
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 3)]
struct Stats;

impl AocParser for Stats {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_ints(input)
    }
}

impl PartSolver<1> for Stats {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for Stats {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .max()
            .map(i64::to_string)
            .ok_or_else(|| SolveError::SolveFailed("empty input".into()))
    }
}

impl PartSolver<3> for Stats {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

/// Part 1 leaves a sorted copy behind; part 2 reuses it when present.
#[derive(Default)]
struct Sorted {
    numbers: Vec<i64>,
    sorted: Option<Vec<i64>>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Median;

impl AocParser for Median {
    type SharedData<'a> = Sorted;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(Sorted {
            numbers: parse_ints(input)?,
            sorted: None,
        })
    }
}

impl PartSolver<1> for Median {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut sorted = shared.numbers.clone();
        sorted.sort_unstable();
        let min = sorted.first().copied().unwrap_or_default();
        shared.sorted = Some(sorted);
        Ok(min.to_string())
    }
}

impl PartSolver<2> for Median {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sorted = match shared.sorted.take() {
            Some(sorted) => sorted,
            None => {
                let mut sorted = shared.numbers.clone();
                sorted.sort_unstable();
                sorted
            }
        };
        let median = sorted.get(sorted.len() / 2).copied().unwrap_or_default();
        shared.sorted = Some(sorted);
        Ok(median.to_string())
    }
}

#[test]
fn parts_constant_matches_attribute() {
    assert_eq!(<Stats as Solver>::PARTS, 3);
    assert_eq!(<Median as Solver>::PARTS, 2);
}

#[test]
fn solve_failed_is_propagated() {
    let mut shared = Stats::parse("").unwrap();
    let err = Stats::solve_part(&mut shared, 2).unwrap_err();
    assert!(matches!(err, SolveError::SolveFailed(_)));
    assert!(err.to_string().contains("empty input"));
}

proptest! {
    #[test]
    fn dispatch_matches_direct_part_call(
        numbers in prop::collection::vec(-1000i64..1000, 1..20),
        part in 1u8..=3,
    ) {
        let input = join(&numbers);
        let mut via_dispatch = Stats::parse(&input).unwrap();
        let mut direct = Stats::parse(&input).unwrap();

        let expected = match part {
            1 => <Stats as PartSolver<1>>::solve(&mut direct),
            2 => <Stats as PartSolver<2>>::solve(&mut direct),
            _ => <Stats as PartSolver<3>>::solve(&mut direct),
        };

        prop_assert_eq!(Stats::solve_part(&mut via_dispatch, part).unwrap(), expected.unwrap());
    }

    #[test]
    fn unknown_part_is_not_implemented(part in prop_oneof![Just(0u8), 4u8..=255]) {
        let mut shared = Stats::parse("1 2 3").unwrap();
        match Stats::solve_part(&mut shared, part) {
            Err(SolveError::PartNotImplemented(p)) => prop_assert_eq!(p, part),
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }

    #[test]
    fn checked_range_rejects_before_dispatch(part in prop_oneof![Just(0u8), 4u8..=255]) {
        let mut shared = Stats::parse("1 2 3").unwrap();
        match Stats::solve_part_checked_range(&mut shared, part) {
            Err(SolveError::PartOutOfRange(p)) => prop_assert_eq!(p, part),
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }

    #[test]
    fn part_two_agrees_with_or_without_part_one(
        numbers in prop::collection::vec(-1000i64..1000, 1..20),
    ) {
        let input = join(&numbers);

        let mut in_order = Median::parse(&input).unwrap();
        Median::solve_part(&mut in_order, 1).unwrap();
        prop_assert!(in_order.sorted.is_some());
        let after_part_one = Median::solve_part(&mut in_order, 2).unwrap();

        let mut alone = Median::parse(&input).unwrap();
        let standalone = Median::solve_part(&mut alone, 2).unwrap();

        prop_assert_eq!(after_part_one, standalone);
    }
}
