use aoc_common::input::non_empty_lines;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 9, tags = ["sequences"])]
pub struct Solver;

/// A history of sensor readings.
struct History {
    values: Vec<i64>,
}

impl History {
    fn predict_next_value(&self) -> i64 {
        self.difference_rows()
            .iter()
            .rev()
            .fold(0, |next, row| row.last().copied().unwrap_or(0) + next)
    }

    fn predict_previous_value(&self) -> i64 {
        self.difference_rows()
            .iter()
            .rev()
            .fold(0, |prev, row| row.first().copied().unwrap_or(0) - prev)
    }

    /// Successive difference rows, starting with the values themselves and
    /// stopping once a row is all zero.
    fn difference_rows(&self) -> Vec<Vec<i64>> {
        let mut rows = vec![self.values.clone()];
        while let Some(last) = rows.last() {
            if last.iter().all(|v| *v == 0) {
                break;
            }
            let next: Vec<i64> = last.iter().tuple_windows().map(|(a, b)| b - a).collect();
            rows.push(next);
        }
        rows
    }
}

pub struct SharedData {
    histories: Vec<History>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .map(|line| {
                line.split_whitespace()
                    .map(str::parse)
                    .collect::<Result<Vec<i64>, _>>()
                    .map(|values| History { values })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|histories| SharedData { histories })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: i64 = shared
            .histories
            .iter()
            .map(History::predict_next_value)
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: i64 = shared
            .histories
            .iter()
            .map(History::predict_previous_value)
            .sum();
        Ok(sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
0 3 6 9 12 15
1 3 6 10 15 21
10 13 16 21 30 45
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "114");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "2");
    }

    #[test]
    fn arithmetic_progression_extends_both_ways() {
        let history = History {
            values: vec![0, 3, 6, 9, 12, 15],
        };
        assert_eq!(history.predict_next_value(), 18);
        assert_eq!(history.predict_previous_value(), -3);
    }
}
