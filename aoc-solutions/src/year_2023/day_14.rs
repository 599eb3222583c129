use aoc_common::grid::Direction;
use aoc_common::input::non_empty_lines;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 14, tags = ["grid", "cycle-detection"])]
pub struct Solver;

const ROUND_ROCK: u8 = b'O';
const CUBE_ROCK: u8 = b'#';
const EMPTY: u8 = b'.';

const TOTAL_SPIN_CYCLES: u64 = 1_000_000_000;

/// The rock platform; round rocks roll, cube rocks stay put.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    cells: Vec<Vec<u8>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Platform;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let cells: Vec<Vec<u8>> = non_empty_lines(input)
            .map(|line| line.bytes().collect())
            .collect();
        if cells.is_empty() {
            return Err(ParseError::MissingData("empty platform".into()));
        }
        Ok(Platform { cells })
    }
}

impl Platform {
    fn tilt(&mut self, direction: Direction) {
        let rows = self.cells.len();
        let columns = self.cells[0].len();

        // Each lane lists cells from the tilt edge inward.
        let lanes: Vec<Vec<(usize, usize)>> = match direction {
            Direction::Up => (0..columns)
                .map(|c| (0..rows).map(|r| (r, c)).collect())
                .collect(),
            Direction::Down => (0..columns)
                .map(|c| (0..rows).rev().map(|r| (r, c)).collect())
                .collect(),
            Direction::Left => (0..rows)
                .map(|r| (0..columns).map(|c| (r, c)).collect())
                .collect(),
            Direction::Right => (0..rows)
                .map(|r| (0..columns).rev().map(|c| (r, c)).collect())
                .collect(),
        };

        for lane in lanes {
            // Round rocks compact towards the lane front; cubes reset the
            // landing slot.
            let mut next_free = 0;
            for idx in 0..lane.len() {
                let (r, c) = lane[idx];
                match self.cells[r][c] {
                    ROUND_ROCK => {
                        let (fr, fc) = lane[next_free];
                        self.cells[r][c] = EMPTY;
                        self.cells[fr][fc] = ROUND_ROCK;
                        next_free += 1;
                    }
                    CUBE_ROCK => next_free = idx + 1,
                    _ => {}
                }
            }
        }
    }

    fn spin_cycle(&mut self) {
        self.tilt(Direction::Up);
        self.tilt(Direction::Left);
        self.tilt(Direction::Down);
        self.tilt(Direction::Right);
    }

    /// Runs `total` spin cycles, shortcutting once the platform state repeats.
    fn run_cycles(&mut self, total: u64) {
        let mut seen: HashMap<Platform, u64> = HashMap::new();
        let mut cycles_ran = 0u64;
        while cycles_ran < total {
            if let Some(first_seen) = seen.insert(self.clone(), cycles_ran) {
                let cycle_length = cycles_ran - first_seen;
                let remaining = (total - cycles_ran) % cycle_length;
                for _ in 0..remaining {
                    self.spin_cycle();
                }
                return;
            }
            self.spin_cycle();
            cycles_ran += 1;
        }
    }

    /// North-beam load: each round rock weighs its distance from the south edge.
    fn total_load(&self) -> usize {
        let rows = self.cells.len();
        self.cells
            .iter()
            .enumerate()
            .map(|(r, row)| {
                (rows - r) * row.iter().filter(|cell| **cell == ROUND_ROCK).count()
            })
            .sum()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut platform = shared.clone();
        platform.tilt(Direction::Up);
        Ok(platform.total_load().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut platform = shared.clone();
        platform.run_cycles(TOTAL_SPIN_CYCLES);
        Ok(platform.total_load().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
O....#....
O.OO#....#
.....##...
OO.#O....O
.O.....O#.
O.#..O.#.#
..O..#O..O
.......O..
#....###..
#OO..#....
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "136");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "64");
    }

    #[test]
    fn tilt_north_stacks_behind_cubes() {
        let mut platform = Solver::parse(".\n#\nO").unwrap();
        platform.tilt(Direction::Up);
        assert_eq!(platform.cells, vec![b".".to_vec(), b"#".to_vec(), b"O".to_vec()]);
    }

    #[test]
    fn one_spin_cycle_matches_expected() {
        let mut platform = Solver::parse(SAMPLE).unwrap();
        platform.spin_cycle();
        let expected = Solver::parse(
            "\
.....#....
....#...O#
...OO##...
.OO#......
.....OOO#.
.O#...O#.#
....O#....
......OOOO
#...O###..
#..OO#....
",
        )
        .unwrap();
        assert_eq!(platform, expected);
    }
}
