use aoc_common::grid::{Boundary, Position};
use aoc_common::input::non_empty_lines;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 3, tags = ["grid"])]
pub struct Solver;

/// An engine schematic as a rectangular character grid.
pub struct Schematic<'a> {
    rows: Vec<&'a [u8]>,
    boundary: Boundary,
}

impl AocParser for Solver {
    type SharedData<'a> = Schematic<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rows: Vec<&[u8]> = non_empty_lines(input).map(str::as_bytes).collect();
        let row_count = rows.len() as i64;
        let column_count = rows.first().map_or(0, |r| r.len()) as i64;
        let boundary = Boundary::new(row_count, column_count)
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        Ok(Schematic { rows, boundary })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared
            .symbol_positions(|c| c != b'.' && !c.is_ascii_digit())
            .flat_map(|pos| shared.part_numbers_around(pos))
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared
            .symbol_positions(|c| c == b'*')
            .filter_map(|pos| {
                let parts: Vec<u64> = shared.part_numbers_around(pos).collect();
                (parts.len() == 2).then(|| parts[0] * parts[1])
            })
            .sum();
        Ok(sum.to_string())
    }
}

impl Schematic<'_> {
    fn at(&self, pos: Position) -> u8 {
        self.rows[pos.row as usize][pos.column as usize]
    }

    fn symbol_positions(&self, pred: impl Fn(u8) -> bool) -> impl Iterator<Item = Position> {
        self.boundary
            .positions()
            .filter(move |pos| pred(self.at(*pos)))
    }

    /// All distinct numbers adjacent to a symbol position.
    ///
    /// When the cell directly above (or below) is a digit, the diagonal cells
    /// on that side belong to the same number and are skipped.
    fn part_numbers_around(&self, pos: Position) -> impl Iterator<Item = u64> {
        let mut numbers = Vec::with_capacity(6);

        for side in [pos.left(), pos.right()] {
            if let Some(n) = self.number_at(side) {
                numbers.push(n);
            }
        }
        for (mid, corners) in [
            (pos.top(), [pos.top_left(), pos.top_right()]),
            (pos.bottom(), [pos.bottom_left(), pos.bottom_right()]),
        ] {
            if let Some(n) = self.number_at(mid) {
                numbers.push(n);
            } else {
                for corner in corners {
                    if let Some(n) = self.number_at(corner) {
                        numbers.push(n);
                    }
                }
            }
        }
        numbers.into_iter()
    }

    /// The full number covering `pos`, if the cell holds a digit.
    fn number_at(&self, pos: Position) -> Option<u64> {
        if !self.boundary.is_valid(pos) || !self.at(pos).is_ascii_digit() {
            return None;
        }

        let row = self.rows[pos.row as usize];
        let mut start = pos.column as usize;
        while start > 0 && row[start - 1].is_ascii_digit() {
            start -= 1;
        }

        let number = row[start..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .fold(0u64, |acc, c| acc * 10 + (c - b'0') as u64);
        Some(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
467..114..
...*......
..35..633.
......#...
617*......
.....+.58.
..592.....
......755.
...$.*....
.664.598..
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "4361");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "467835");
    }

    #[test]
    fn number_extends_left_of_symbol() {
        let shared = Solver::parse("617*..\n......").unwrap();
        let parts: Vec<u64> = shared.part_numbers_around(Position::new(0, 3)).collect();
        assert_eq!(parts, vec![617]);
    }
}
