//! Local input file store

use aoc_common::input::InputReader;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for input loading
#[derive(Debug, Error)]
pub enum InputError {
    /// No input file exists for the year/day
    #[error("No input file for {year}/day{day:02} at {path}")]
    NotFound { year: u16, day: u8, path: PathBuf },

    /// IO error while reading the input
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// File-based store for puzzle inputs
///
/// Layout: `{dir}/{year}_day{day:02}.txt`
pub struct InputStore {
    dir: PathBuf,
}

impl InputStore {
    /// Create a store rooted at a directory
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The input path for a specific year/day
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.dir.join(format!("{}_day{:02}.txt", year, day))
    }

    /// Check if an input file exists
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).exists()
    }

    /// Load the input for a year/day
    ///
    /// # Errors
    /// [`InputError::NotFound`] when no file exists; [`InputError::Io`] on read failure.
    pub fn load(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.input_path(year, day);
        if !path.exists() {
            return Err(InputError::NotFound { year, day, path });
        }
        let mut reader = InputReader::open(&path)?;
        Ok(reader.read_to_string()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn input_path_format() {
        let store = InputStore::new(PathBuf::from("/inputs"));
        assert_eq!(
            store.input_path(2023, 1),
            PathBuf::from("/inputs/2023_day01.txt")
        );
        assert_eq!(
            store.input_path(2023, 25),
            PathBuf::from("/inputs/2023_day25.txt")
        );
    }

    #[test]
    fn load_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(!store.contains(2023, 1));
        assert!(matches!(
            store.load(2023, 1),
            Err(InputError::NotFound { year: 2023, day: 1, .. })
        ));

        fs::write(store.input_path(2023, 1), "puzzle input\n").unwrap();
        assert!(store.contains(2023, 1));
        assert_eq!(store.load(2023, 1).unwrap(), "puzzle input\n");
    }
}
