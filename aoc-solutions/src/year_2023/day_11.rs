use aoc_common::grid::Position;
use aoc_common::input::non_empty_lines;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 11, tags = ["grid", "manhattan"])]
pub struct Solver;

const GALAXY: char = '#';

pub struct Image {
    galaxies: Vec<Position>,
    empty_rows: HashSet<i64>,
    empty_columns: HashSet<i64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Image;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<&str> = non_empty_lines(input).collect();
        if lines.is_empty() {
            return Err(ParseError::MissingData("empty image".into()));
        }

        let galaxies: Vec<Position> = lines
            .iter()
            .enumerate()
            .flat_map(|(row, line)| {
                line.char_indices().filter_map(move |(column, c)| {
                    (c == GALAXY).then(|| Position::new(row as i64, column as i64))
                })
            })
            .collect();

        let occupied_rows: HashSet<i64> = galaxies.iter().map(|g| g.row).collect();
        let occupied_columns: HashSet<i64> = galaxies.iter().map(|g| g.column).collect();
        let empty_rows = (0..lines.len() as i64)
            .filter(|r| !occupied_rows.contains(r))
            .collect();
        let empty_columns = (0..lines[0].len() as i64)
            .filter(|c| !occupied_columns.contains(c))
            .collect();

        Ok(Image {
            galaxies,
            empty_rows,
            empty_columns,
        })
    }
}

impl Image {
    /// Position after inflating every empty row and column to `expand_factor`.
    fn expand_position(&self, position: Position, expand_factor: i64) -> Position {
        let row = (0..position.row)
            .map(|r| {
                if self.empty_rows.contains(&r) {
                    expand_factor
                } else {
                    1
                }
            })
            .sum();
        let column = (0..position.column)
            .map(|c| {
                if self.empty_columns.contains(&c) {
                    expand_factor
                } else {
                    1
                }
            })
            .sum();
        Position::new(row, column)
    }

    fn distance_sum(&self, expand_factor: i64) -> i64 {
        let expanded: Vec<Position> = self
            .galaxies
            .iter()
            .map(|g| self.expand_position(*g, expand_factor))
            .collect();
        expanded
            .iter()
            .tuple_combinations()
            .map(|(a, b)| a.manhattan_distance(*b))
            .sum()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.distance_sum(2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.distance_sum(1_000_000).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
...#......
.......#..
#.........
..........
......#...
.#........
.........#
..........
.......#..
#...#.....
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "374");
    }

    #[test]
    fn expansion_factor_10() {
        let shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(shared.distance_sum(10), 1030);
    }

    #[test]
    fn expansion_factor_100() {
        let shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(shared.distance_sum(100), 8410);
    }
}
