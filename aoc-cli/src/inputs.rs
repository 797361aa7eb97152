//! Local puzzle input lookup

use crate::error::InputError;
use std::fs;
use std::path::PathBuf;

/// File-based store of puzzle inputs
///
/// Directory structure: `{input_dir}/{year}_day{day:02}.txt`. A single
/// puzzle may instead read from an explicit override file.
#[derive(Debug, Clone)]
pub struct InputStore {
    input_dir: PathBuf,
    override_file: Option<(u16, u8, PathBuf)>,
}

impl InputStore {
    /// Create a store rooted at `input_dir`
    pub fn new(input_dir: PathBuf) -> Self {
        Self {
            input_dir,
            override_file: None,
        }
    }

    /// Serve `year`/`day` from `path` instead of the input directory
    pub fn with_override(mut self, year: u16, day: u8, path: PathBuf) -> Self {
        self.override_file = Some((year, day, path));
        self
    }

    /// Location of the input for a specific year/day
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        match &self.override_file {
            Some((y, d, path)) if (*y, *d) == (year, day) => path.clone(),
            _ => self.input_dir.join(format!("{year}_day{day:02}.txt")),
        }
    }

    /// Check if the input file exists
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Read the input for a year/day
    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.input_path(year, day);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => InputError::Missing { year, day, path },
            _ => InputError::Read { path, source },
        })
    }
}
