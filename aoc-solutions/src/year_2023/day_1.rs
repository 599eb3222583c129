use aoc_common::input::non_empty_lines;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 1, tags = ["strings"])]
pub struct Solver;

const NUMERIC_WORDS: [(&str, u32); 9] = [
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
];

pub struct SharedData<'a> {
    lines: Vec<&'a str>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<&str> = non_empty_lines(input).collect();
        if lines.is_empty() {
            return Err(ParseError::MissingData("no calibration lines".into()));
        }
        Ok(SharedData { lines })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .lines
            .iter()
            .map(|line| {
                let first = first_digit(line)
                    .ok_or_else(|| no_digit(line))?
                    .1;
                let last = last_digit(line)
                    .ok_or_else(|| no_digit(line))?
                    .1;
                Ok(first * 10 + last)
            })
            .sum::<Result<u32, SolveError>>()
            .map(|sum| sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .lines
            .iter()
            .map(|line| {
                let first = earlier(first_digit(line), first_word(line))
                    .ok_or_else(|| no_digit(line))?
                    .1;
                let last = later(last_digit(line), last_word(line))
                    .ok_or_else(|| no_digit(line))?
                    .1;
                Ok(first * 10 + last)
            })
            .sum::<Result<u32, SolveError>>()
            .map(|sum| sum.to_string())
    }
}

fn no_digit(line: &str) -> SolveError {
    SolveError::SolveFailed(format!("no numeric value in line {:?}", line).into())
}

/// Position and value of the first ASCII digit, if any.
fn first_digit(line: &str) -> Option<(usize, u32)> {
    line.char_indices()
        .find_map(|(idx, c)| c.to_digit(10).map(|d| (idx, d)))
}

fn last_digit(line: &str) -> Option<(usize, u32)> {
    line.char_indices()
        .rev()
        .find_map(|(idx, c)| c.to_digit(10).map(|d| (idx, d)))
}

/// Position and value of the earliest spelled-out digit, if any.
fn first_word(line: &str) -> Option<(usize, u32)> {
    NUMERIC_WORDS
        .iter()
        .filter_map(|(word, value)| line.find(word).map(|idx| (idx, *value)))
        .min_by_key(|(idx, _)| *idx)
}

fn last_word(line: &str) -> Option<(usize, u32)> {
    NUMERIC_WORDS
        .iter()
        .filter_map(|(word, value)| line.rfind(word).map(|idx| (idx, *value)))
        .max_by_key(|(idx, _)| *idx)
}

fn earlier(a: Option<(usize, u32)>, b: Option<(usize, u32)>) -> Option<(usize, u32)> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if a.0 < b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}

fn later(a: Option<(usize, u32)>, b: Option<(usize, u32)>) -> Option<(usize, u32)> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if a.0 > b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE_1: &str = "\
1abc2
pqr3stu8vwx
a1b2c3d4e5f
treb7uchet
";

    const SAMPLE_2: &str = "\
two1nine
eightwothree
abcone2threexyz
xtwone3four
4nineeightseven2
zoneight234
7pqrstsixteen
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE_1).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "142");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE_2).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "281");
    }

    #[test]
    fn overlapping_words_use_positions() {
        // "eightwothree" starts with eight, ends with three
        assert_eq!(first_word("eightwothree"), Some((0, 8)));
        assert_eq!(last_word("eightwothree"), Some((7, 3)));
    }
}
