//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{debug, info, warn};

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Time spent parsing, when parsing succeeded
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    shared: SharedState,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker thread needs, borrowed across the pool
struct SharedState {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            shared: SharedState {
                registry,
                inputs: config.input_store(),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Input store used to load puzzle inputs
    pub fn inputs(&self) -> &InputStore {
        &self.shared.inputs
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let shared = &self.shared;
        shared
            .registry
            .iter_info()
            .filter(|info| shared.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| shared.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(shared.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        info!(
            solvers = work_items.len(),
            mode = ?self.shared.parallelize_by,
            threads = self.thread_pool.current_num_threads(),
            "starting execution"
        );

        match self.shared.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, &self.shared) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_grouped(by_year, &tx)
            }
            // Part differs from Day only inside run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => {
                let singletons = work_items.into_iter().map(|w| vec![w]).collect();
                self.execute_grouped(singletons, &tx)
            }
        }
    }

    /// Run groups in parallel; items within a group run in order
    fn execute_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let shared = &self.shared;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map_with(tx.clone(), |tx, items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work_item(&work, tx, shared) {
                            err = Some(ArcExecutorError::combine_opt(err, e));
                        }
                    }
                    err
                })
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(e1), e2) => Some(ArcExecutorError::combine_opt(e2, e1)),
                    (None, e2) => e2,
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }
}

/// Restrict a solver's parts to the part filter; empty when the filter is out of range
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        #[allow(clippy::reversed_empty_ranges)]
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Load the input for one work item and solve its parts
///
/// Input and parse failures are reported as error results for every part,
/// so they never abort the rest of the run.
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    shared: &SharedState,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let input = match shared.inputs.read(year, day) {
        Ok(input) => input,
        Err(e) => {
            warn!(year, day, error = %e, "skipping solver");
            let error: ArcExecutorError = ExecutorError::from(e).into();
            for part in work.parts.clone() {
                send(tx, SolverResult::failed(year, day, part, error.clone()))?;
            }
            return Ok(());
        }
    };

    if shared.parallelize_by == ParallelizeBy::Part {
        run_parts_parallel(work, &input, tx, &shared.registry)
    } else {
        run_parts_sequential(work, &input, tx, &shared.registry)
    }
}

/// Parse once, then solve parts in order against the same shared data
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let mut solver = match registry.create_solver(year, day, input) {
        Ok(solver) => solver,
        Err(e) => {
            let error: ArcExecutorError = ExecutorError::from(e).into();
            for part in work.parts.clone() {
                send(tx, SolverResult::failed(year, day, part, error.clone()))?;
            }
            return Ok(());
        }
    };

    let parse_duration = solver.parse_duration();
    for part in work.parts.clone() {
        send(tx, solve_part(year, day, part, &mut *solver, parse_duration))?;
    }
    Ok(())
}

/// Each part gets its own parsed instance so parts run independently
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    work.parts
        .clone()
        .into_par_iter()
        .map_with(tx.clone(), |tx, part| {
            let result = match registry.create_solver(year, day, input) {
                Ok(mut solver) => {
                    let parse_duration = solver.parse_duration();
                    solve_part(year, day, part, &mut *solver, parse_duration)
                }
                Err(e) => SolverResult::failed(year, day, part, ExecutorError::from(e).into()),
            };
            send(tx, result)
        })
        .collect::<Vec<_>>()
        .into_iter()
        .filter_map(Result::err)
        .reduce(ArcExecutorError::combine)
        .map_or(Ok(()), Err)
}

/// Solve a single part, carrying the parse time of the instance it ran on
fn solve_part(
    year: u16,
    day: u8,
    part: u8,
    solver: &mut dyn DynSolver,
    parse_duration: TimeDelta,
) -> SolverResult {
    match solver.solve(part) {
        Ok(solved) => {
            debug!(year, day, part, "solved");
            SolverResult {
                year,
                day,
                part,
                solve_duration: solved.duration(),
                answer: Ok(solved.answer),
                parse_duration: Some(parse_duration),
            }
        }
        Err(e) => SolverResult {
            parse_duration: Some(parse_duration),
            ..SolverResult::failed(
                year,
                day,
                part,
                ExecutorError::from(aoc_solver::SolverError::from(e)).into(),
            )
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverRegistryBuilder};
    use clap::Parser;
    use proptest::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Sums the numbers in part 1, multiplies them in part 2
    struct Arith;

    impl AocParser for Arith {
        type SharedData<'a> = Vec<u64>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            input
                .split_whitespace()
                .map(|t| t.parse().map_err(|_| ParseError::InvalidFormat(t.to_string())))
                .collect()
        }
    }

    impl Solver for Arith {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => Ok(shared.iter().sum::<u64>().to_string()),
                2 => Ok(shared.iter().product::<u64>().to_string()),
                _ => Err(SolveError::PartNotImplemented(part)),
            }
        }
    }

    fn registry() -> SolverRegistry {
        SolverRegistryBuilder::new()
            .register_solver::<Arith>(2023, 1)
            .and_then(|b| b.register_solver::<Arith>(2024, 1))
            .and_then(|b| b.register_solver::<Arith>(2024, 2))
            .and_then(|b| b.register_solver::<Arith>(2024, 3))
            .unwrap()
            .build()
    }

    fn executor(dir: &Path, extra: &[&str]) -> Executor {
        let dir = dir.to_str().unwrap();
        let args = Args::try_parse_from(
            ["aoc", "--input-dir", dir, "--threads", "2"]
                .into_iter()
                .chain(extra.iter().copied()),
        )
        .unwrap();
        Executor::new(registry(), &Config::from_args(args).unwrap()).unwrap()
    }

    fn write_inputs(dir: &Path) {
        fs::write(dir.join("2023_day01.txt"), "1 2 3").unwrap();
        fs::write(dir.join("2024_day01.txt"), "2 5").unwrap();
        fs::write(dir.join("2024_day02.txt"), "not numbers").unwrap();
        // 2024 day 3 is missing
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    fn summary(results: &[SolverResult]) -> Vec<(u16, u8, u8, Option<String>)> {
        results
            .iter()
            .map(|r| (r.year, r.day, r.part, r.answer.as_ref().ok().cloned()))
            .collect()
    }

    #[test]
    fn test_collect_work_items_filters() {
        let temp = TempDir::new().unwrap();

        let all = executor(temp.path(), &[]).collect_work_items();
        assert_eq!(all.len(), 4);
        assert!(all.iter().all(|w| w.parts == (1..=2)));

        let year = executor(temp.path(), &["-y", "2024"]).collect_work_items();
        assert_eq!(year.iter().map(|w| w.day).collect::<Vec<_>>(), vec![1, 2, 3]);

        let part = executor(temp.path(), &["-d", "1", "-p", "2"]).collect_work_items();
        assert_eq!(part.len(), 2);
        assert!(part.iter().all(|w| w.parts == (2..=2)));
    }

    #[test]
    fn test_filter_parts() {
        assert_eq!(filter_parts(None, 2), 1..=2);
        assert_eq!(filter_parts(Some(1), 2), 1..=1);
        assert!(filter_parts(Some(2), 1).is_empty());
    }

    #[test]
    fn test_failures_become_results() {
        let temp = TempDir::new().unwrap();
        write_inputs(temp.path());

        let results = run(&executor(temp.path(), &["--parallelize-by", "sequential"]));
        assert_eq!(
            summary(&results),
            vec![
                (2023, 1, 1, Some("6".to_string())),
                (2023, 1, 2, Some("6".to_string())),
                (2024, 1, 1, Some("7".to_string())),
                (2024, 1, 2, Some("10".to_string())),
                (2024, 2, 1, None),
                (2024, 2, 2, None),
                (2024, 3, 1, None),
                (2024, 3, 2, None),
            ]
        );

        let missing = results[6].answer.as_ref().unwrap_err();
        assert!(missing.to_string().starts_with("Missing input for 2024/day03"));
        assert!(results[6].parse_duration.is_none());
        assert!(results[0].parse_duration.is_some());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn every_mode_yields_the_same_answers(
            mode in prop::sample::select(vec!["sequential", "year", "day", "part"]),
        ) {
            let temp = TempDir::new().unwrap();
            write_inputs(temp.path());

            let sequential = run(&executor(temp.path(), &["--parallelize-by", "sequential"]));
            let other = run(&executor(temp.path(), &["--parallelize-by", mode]));
            prop_assert_eq!(summary(&sequential), summary(&other));
        }
    }
}
