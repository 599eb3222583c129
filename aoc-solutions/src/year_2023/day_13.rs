use aoc_common::input::blocks;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 13, tags = ["grid", "symmetry"])]
pub struct Solver;

/// One ash/rock pattern, kept both row-wise and transposed.
struct Pattern {
    rows: Vec<String>,
    columns: Vec<String>,
}

impl Pattern {
    fn new(rows: Vec<String>) -> Self {
        let width = rows.first().map_or(0, |r| r.len());
        let columns = (0..width)
            .map(|c| {
                rows.iter()
                    .filter_map(|row| row.as_bytes().get(c))
                    .map(|b| *b as char)
                    .collect()
            })
            .collect();
        Pattern { rows, columns }
    }

    /// Summary value: columns left of a vertical mirror, plus 100 times the
    /// rows above a horizontal mirror.
    fn summarize(&self, mismatch_tolerance: usize) -> usize {
        count_reflections(&self.columns, mismatch_tolerance)
            + 100 * count_reflections(&self.rows, mismatch_tolerance)
    }
}

/// Sums the mirror indices where the total mismatched characters across the
/// fold equal exactly `mismatch_tolerance`.
fn count_reflections(lines: &[String], mismatch_tolerance: usize) -> usize {
    (1..lines.len())
        .filter(|split| {
            let mismatches: usize = lines[..*split]
                .iter()
                .rev()
                .zip(&lines[*split..])
                .map(|(a, b)| {
                    a.bytes()
                        .zip(b.bytes())
                        .filter(|(ca, cb)| ca != cb)
                        .count()
                })
                .sum();
            mismatches == mismatch_tolerance
        })
        .sum()
}

pub struct SharedData {
    patterns: Vec<Pattern>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let patterns: Vec<Pattern> = blocks(input)
            .into_iter()
            .map(|block| Pattern::new(block.into_iter().map(str::to_string).collect()))
            .collect();
        if patterns.is_empty() {
            return Err(ParseError::MissingData("no patterns".into()));
        }
        Ok(SharedData { patterns })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: usize = shared.patterns.iter().map(|p| p.summarize(0)).sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: usize = shared.patterns.iter().map(|p| p.summarize(1)).sum();
        Ok(sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
#.##..##.
..#.##.#.
##......#
##......#
..#.##.#.
..##..##.
#.#.##.#.

#...##..#
#....#..#
..##..###
#####.##.
#####.##.
..##..###
#....#..#
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "405");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "400");
    }

    #[test]
    fn transposed_columns_match_rows() {
        let pattern = Pattern::new(vec!["#.".to_string(), "##".to_string()]);
        assert_eq!(pattern.columns, vec!["##".to_string(), ".#".to_string()]);
    }
}
