//! Input helpers for line-based puzzle text

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Lazily iterate the non-blank lines of a string
pub fn non_empty_lines(input: &str) -> impl Iterator<Item = &str> {
    input.lines().filter(|line| !line.trim().is_empty())
}

/// Split on a delimiter, trimming entries and dropping empty ones
///
/// Mirrors the trimmed/remove-empty split used by most record parsers.
pub fn split_trimmed<'a>(input: &'a str, delimiter: char) -> impl Iterator<Item = &'a str> {
    input
        .split(delimiter)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

/// Split input into blank-line-separated blocks of consecutive lines
pub fn blocks(input: &str) -> Vec<Vec<&str>> {
    let mut result = Vec::new();
    let mut current = Vec::new();
    for line in input.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                result.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        result.push(current);
    }
    result
}

/// A file-backed reader of non-empty input lines
///
/// Opens the file on construction; line enumeration is a single forward
/// pass that can be restarted with [`InputReader::reset`], which rewinds
/// the underlying file to byte 0.
pub struct InputReader {
    reader: BufReader<File>,
}

impl InputReader {
    /// Open an input file
    ///
    /// # Errors
    /// Fails with an I/O error when the file does not exist or cannot be read.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self {
            reader: BufReader::new(File::open(path)?),
        })
    }

    /// Lazily iterate the remaining non-empty lines
    ///
    /// Lines are consumed from the underlying stream as the iterator
    /// advances; call [`InputReader::reset`] to read them again.
    pub fn non_empty_lines(&mut self) -> impl Iterator<Item = io::Result<String>> + '_ {
        (&mut self.reader)
            .lines()
            .filter(|line| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
    }

    /// Eagerly read all remaining non-empty lines
    pub fn all_non_empty_lines(&mut self) -> io::Result<Vec<String>> {
        self.non_empty_lines().collect()
    }

    /// Read the rest of the stream into a single string
    pub fn read_to_string(&mut self) -> io::Result<String> {
        let mut content = String::new();
        self.reader.read_to_string(&mut content)?;
        Ok(content)
    }

    /// Rewind the underlying file to byte 0
    pub fn reset(&mut self) -> io::Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn non_empty_lines_skips_blanks() {
        let lines: Vec<&str> = non_empty_lines("a\n\nb\n   \nc\n").collect();
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn split_trimmed_drops_empty_entries() {
        let entries: Vec<&str> = split_trimmed(" 1 ,, 2 ,  , 3", ',').collect();
        assert_eq!(entries, vec!["1", "2", "3"]);
    }

    #[test]
    fn blocks_split_on_blank_lines() {
        let parsed = blocks("a\nb\n\nc\n\n\nd\ne\n");
        assert_eq!(parsed, vec![vec!["a", "b"], vec!["c"], vec!["d", "e"]]);
        assert!(blocks("\n\n").is_empty());
    }

    #[test]
    fn reader_fails_on_missing_file() {
        assert!(InputReader::open("/definitely/not/here.txt").is_err());
    }

    #[test]
    fn reader_single_forward_pass_and_reset() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "one\n\ntwo\n   \nthree\n").unwrap();

        let mut reader = InputReader::open(file.path()).unwrap();
        let lines = reader.all_non_empty_lines().unwrap();
        assert_eq!(lines, vec!["one", "two", "three"]);

        // the stream is consumed until reset rewinds it
        assert!(reader.all_non_empty_lines().unwrap().is_empty());
        reader.reset().unwrap();
        assert_eq!(reader.all_non_empty_lines().unwrap().len(), 3);
    }

    #[test]
    fn reader_lazy_iteration_consumes_incrementally() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "a\nb\nc\n").unwrap();

        let mut reader = InputReader::open(file.path()).unwrap();
        {
            let mut lines = reader.non_empty_lines();
            assert_eq!(lines.next().unwrap().unwrap(), "a");
        }
        // remaining lines are still available after dropping the iterator
        let rest = reader.all_non_empty_lines().unwrap();
        assert_eq!(rest, vec!["b", "c"]);
    }

    #[test]
    fn reader_read_to_string_returns_raw_content() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "raw\n\ncontent").unwrap();

        let mut reader = InputReader::open(file.path()).unwrap();
        assert_eq!(reader.read_to_string().unwrap(), "raw\n\ncontent");
    }
}
