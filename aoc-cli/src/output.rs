//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::time::Instant;

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

/// Totals over a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub solved: usize,
    pub failed: usize,
    pub parse_time: TimeDelta,
    pub solve_time: TimeDelta,
}

impl Summary {
    /// Aggregate timings over the successful results
    pub fn of(results: &[SolverResult]) -> Self {
        let solved: Vec<&SolverResult> = results.iter().filter(|r| r.answer.is_ok()).collect();
        Self {
            solved: solved.len(),
            failed: results.len() - solved.len(),
            parse_time: solved.iter().filter_map(|r| r.parse_duration).sum(),
            solve_time: solved.iter().map(|r| r.solve_duration).sum(),
        }
    }

    /// Sum of compute time over wall-clock time
    pub fn speedup(&self, elapsed: std::time::Duration) -> Option<f64> {
        if elapsed.is_zero() {
            return None;
        }
        let compute = (self.parse_time + self.solve_time).num_microseconds()? as f64 / 1e6;
        Some(compute / elapsed.as_secs_f64())
    }
}

impl OutputFormatter {
    /// Create a new output formatter; wall-clock time is measured from here
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => println!("{answer}"),
            (Ok(_), false) => println!("{}", format_full(result)),
            (Err(e), true) => eprintln!("Error: {e}"),
            (Err(e), false) => eprintln!("{}: Error - {e}", prefix(result)),
        }
    }

    /// Print a summary after all results
    /// Shows both total solve time (sum of durations) and actual elapsed wall-clock time
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let summary = Summary::of(results);
        let elapsed = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!("Solvers: {} solved, {} failed", summary.solved, summary.failed);
        println!("Total parse time: {}", format_duration(summary.parse_time));
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!("Elapsed wall-clock time: {}", format_std_duration(elapsed));
        if let Some(speedup) = summary.speedup(elapsed) {
            println!("Speedup factor: {speedup:.2}x");
        }
    }
}

fn prefix(result: &SolverResult) -> String {
    format!("{}/{:02} Part {}", result.year, result.day, result.part)
}

/// `2024/01 Part 1: answer (parse: .., solve: ..)`
fn format_full(result: &SolverResult) -> String {
    let answer = result.answer.as_deref().unwrap_or_default();
    let parse_timing = result
        .parse_duration
        .map(|d| format!("parse: {}, ", format_duration(d)))
        .unwrap_or_default();
    format!(
        "{}: {answer} ({parse_timing}solve: {})",
        prefix(result),
        format_duration(result.solve_duration)
    )
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{micros}µs")
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    TimeDelta::from_std(d).map_or_else(|_| "N/A".to_string(), format_duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExecutorError;

    fn result(part: u8, answer: Option<&str>) -> SolverResult {
        SolverResult {
            year: 2024,
            day: 7,
            part,
            answer: answer
                .map(str::to_string)
                .ok_or_else(|| ExecutorError::ChannelSend.into()),
            parse_duration: answer.map(|_| TimeDelta::microseconds(250)),
            solve_duration: TimeDelta::milliseconds(3),
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-20)), "-20µs");
        assert_eq!(
            format_std_duration(std::time::Duration::from_micros(42)),
            "42µs"
        );
    }

    #[test]
    fn test_format_full() {
        assert_eq!(
            format_full(&result(2, Some("11387"))),
            "2024/07 Part 2: 11387 (parse: 250µs, solve: 3.00ms)"
        );
    }

    #[test]
    fn test_summary_counts_successes_only() {
        let results = [result(1, Some("3749")), result(2, None)];
        let summary = Summary::of(&results);
        assert_eq!(summary.solved, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.parse_time, TimeDelta::microseconds(250));
        assert_eq!(summary.solve_time, TimeDelta::milliseconds(3));

        let speedup = summary
            .speedup(std::time::Duration::from_micros(3250))
            .unwrap();
        assert!((speedup - 1.0).abs() < 1e-9);
        assert_eq!(summary.speedup(std::time::Duration::ZERO), None);
    }
}
