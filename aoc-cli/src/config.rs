//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use crate::inputs::InputStore;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Directory holding puzzle inputs
    pub input_dir: PathBuf,
    /// Single-puzzle input override as (year, day, file)
    pub input_override: Option<(u16, u8, PathBuf)>,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Quiet mode
    pub quiet: bool,
    /// Number of `-v` flags given
    pub verbosity: u8,
}

impl Config {
    /// Build config from CLI args, validating flag combinations
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let input_dir = expand_tilde(&args.input_dir);

        let thread_count = match args.threads {
            Some(0) => {
                return Err(CliError::Config("--threads must be at least 1".to_string()));
            }
            Some(n) => n,
            None => num_cpus(),
        };

        let input_override = match (args.input, args.year, args.day) {
            (None, _, _) => None,
            (Some(path), Some(year), Some(day)) => Some((year, day, expand_tilde(&path))),
            (Some(_), _, _) => {
                return Err(CliError::Config(
                    "--input needs both --year and --day".to_string(),
                ));
            }
        };

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_dir,
            input_override,
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
            verbosity: args.verbose,
        })
    }

    /// Log level implied by `-v` flags, used when `RUST_LOG` is unset
    pub fn log_level(&self) -> Level {
        match self.verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Input store described by this config
    pub fn input_store(&self) -> InputStore {
        let store = InputStore::new(self.input_dir.clone());
        match &self.input_override {
            Some((year, day, path)) => store.with_override(*year, *day, path.clone()),
            None => store,
        }
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> Result<Config, CliError> {
        let args = Args::try_parse_from(std::iter::once("aoc").chain(args.iter().copied()))
            .expect("valid arguments");
        Config::from_args(args)
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/inputs")), home.join("inputs"));
            assert_eq!(expand_tilde(Path::new("~")), home);
        }
        assert_eq!(expand_tilde(Path::new("/abs/dir")), PathBuf::from("/abs/dir"));
        assert_eq!(expand_tilde(Path::new("rel/~x")), PathBuf::from("rel/~x"));
        assert_eq!(expand_tilde(Path::new("~user/x")), PathBuf::from("~user/x"));
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert!(cfg.thread_count >= 1);
        assert!(cfg.input_override.is_none());
        assert_eq!(cfg.verbosity, 0);
        assert_eq!(cfg.log_level(), Level::WARN);
    }

    #[test]
    fn test_verbose_flags_raise_log_level() {
        assert_eq!(config(&["-v"]).unwrap().log_level(), Level::INFO);
        assert_eq!(config(&["-vv"]).unwrap().log_level(), Level::DEBUG);
        assert_eq!(config(&["-vvvvv"]).unwrap().log_level(), Level::TRACE);
    }

    #[test]
    fn test_input_requires_year_and_day() {
        assert!(matches!(
            config(&["--input", "sample.txt"]),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            config(&["--input", "sample.txt", "--year", "2024"]),
            Err(CliError::Config(_))
        ));

        let cfg = config(&["--input", "/tmp/sample.txt", "-y", "2024", "-d", "5"]).unwrap();
        assert_eq!(
            cfg.input_override,
            Some((2024, 5, PathBuf::from("/tmp/sample.txt")))
        );
        assert_eq!(
            cfg.input_store().input_path(2024, 5),
            PathBuf::from("/tmp/sample.txt")
        );
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(matches!(config(&["--threads", "0"]), Err(CliError::Config(_))));
        assert_eq!(config(&["--threads", "3"]).unwrap().thread_count, 3);
    }
}
