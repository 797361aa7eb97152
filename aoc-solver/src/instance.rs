//! Parsed puzzles and their timed part solving

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

/// Runs `f`, returning its output with the UTC instants around it.
fn timed<T>(f: impl FnOnce() -> T) -> (T, DateTime<Utc>, DateTime<Utc>) {
    let start = Utc::now();
    let value = f();
    (value, start, Utc::now())
}

/// One solved part
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    pub solve_start: DateTime<Utc>,
    pub solve_end: DateTime<Utc>,
}

impl SolveResult {
    pub fn duration(&self) -> TimeDelta {
        self.solve_end - self.solve_start
    }
}

/// Input for one year/day parsed by `S`, ready to solve any of its parts.
///
/// Parts run against the same shared data, in whatever order they are asked
/// for.
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parse_start: DateTime<Utc>,
    parse_end: DateTime<Utc>,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let (shared, parse_start, parse_end) = timed(|| S::parse(input));
        let shared = shared?;
        debug!(
            year,
            day,
            micros = (parse_end - parse_start).num_microseconds(),
            "parsed input"
        );

        Ok(Self {
            year,
            day,
            shared,
            parse_start,
            parse_end,
        })
    }
}

/// Object-safe view of a [`SolverInstance`].
///
/// The registry hands these out so callers can solve puzzles without naming
/// their shared data types.
pub trait DynSolver {
    /// Solves `part`, rejecting parts outside `1..=parts()`.
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn parse_start(&self) -> DateTime<Utc>;

    fn parse_end(&self) -> DateTime<Utc>;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    /// Highest part number this puzzle has
    fn parts(&self) -> u8;

    fn parse_duration(&self) -> TimeDelta {
        self.parse_end() - self.parse_start()
    }
}

impl<S: SolverExt> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let (answer, solve_start, solve_end) =
            timed(|| S::solve_part_checked_range(&mut self.shared, part));
        let answer = answer?;
        debug!(
            year = self.year,
            day = self.day,
            part,
            micros = (solve_end - solve_start).num_microseconds(),
            "solved part"
        );

        Ok(SolveResult {
            answer,
            solve_start,
            solve_end,
        })
    }

    fn parse_start(&self) -> DateTime<Utc> {
        self.parse_start
    }

    fn parse_end(&self) -> DateTime<Utc> {
        self.parse_end
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::AocParser;

    /// Part 1 counts words and caches the count; part 2 doubles the cache.
    struct WordCount;

    impl AocParser for WordCount {
        type SharedData<'a> = (Vec<&'a str>, Option<usize>);

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            if input.trim().is_empty() {
                return Err(ParseError::MissingData("no words".into()));
            }
            Ok((input.split_whitespace().collect(), None))
        }
    }

    impl Solver for WordCount {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            let count = *shared.1.get_or_insert(shared.0.len());
            match part {
                1 => Ok(count.to_string()),
                2 => Ok((count * 2).to_string()),
                _ => Err(SolveError::PartNotImplemented(part)),
            }
        }
    }

    #[test]
    fn parts_share_parsed_input() {
        let mut instance = SolverInstance::<WordCount>::new(2024, 3, "a b c").unwrap();
        assert_eq!((instance.year(), instance.day(), instance.parts()), (2024, 3, 2));

        let second = instance.solve(2).unwrap();
        assert_eq!(second.answer, "6");
        assert!(second.duration() >= TimeDelta::zero());
        assert_eq!(instance.solve(1).unwrap().answer, "3");
        assert!(instance.parse_duration() >= TimeDelta::zero());
    }

    #[test]
    fn out_of_range_parts_never_reach_the_solver() {
        let mut instance = SolverInstance::<WordCount>::new(2024, 3, "a").unwrap();
        assert!(matches!(instance.solve(0), Err(SolveError::PartOutOfRange(0))));
        assert!(matches!(instance.solve(3), Err(SolveError::PartOutOfRange(3))));
    }

    #[test]
    fn parse_errors_surface() {
        assert!(matches!(
            SolverInstance::<WordCount>::new(2024, 3, "  \n"),
            Err(ParseError::MissingData(_))
        ));
    }
}
