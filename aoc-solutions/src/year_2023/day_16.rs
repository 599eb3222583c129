use aoc_common::grid::{Boundary, Direction, Position};
use aoc_common::input::non_empty_lines;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 16, tags = ["grid", "simulation"])]
pub struct Solver;

pub struct Contraption<'a> {
    layout: Vec<&'a [u8]>,
    bounds: Boundary,
}

impl AocParser for Solver {
    type SharedData<'a> = Contraption<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let layout: Vec<&[u8]> = non_empty_lines(input).map(str::as_bytes).collect();
        let bounds = Boundary::new(
            layout.len() as i64,
            layout.first().map_or(0, |r| r.len()) as i64,
        )
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        Ok(Contraption { layout, bounds })
    }
}

impl Contraption<'_> {
    fn tile(&self, pos: Position) -> u8 {
        self.layout[pos.row as usize][pos.column as usize]
    }

    /// Traces beams from the given entry and counts energised tiles. Tracks
    /// (position, direction) pairs so looping beams terminate.
    fn count_energised_tiles(&self, start: Position, direction: Direction) -> usize {
        let mut visited: HashSet<(Position, Direction)> = HashSet::new();
        let mut beams = vec![(start, direction)];

        while let Some((mut pos, mut direction)) = beams.pop() {
            while self.bounds.is_valid(pos) && visited.insert((pos, direction)) {
                match (self.tile(pos), direction) {
                    (b'/', _) => {
                        direction = match direction {
                            Direction::Up => Direction::Right,
                            Direction::Down => Direction::Left,
                            Direction::Left => Direction::Down,
                            Direction::Right => Direction::Up,
                        };
                    }
                    (b'\\', _) => {
                        direction = match direction {
                            Direction::Up => Direction::Left,
                            Direction::Down => Direction::Right,
                            Direction::Left => Direction::Up,
                            Direction::Right => Direction::Down,
                        };
                    }
                    (b'|', Direction::Left | Direction::Right) => {
                        beams.push((pos.top(), Direction::Up));
                        beams.push((pos.bottom(), Direction::Down));
                        break;
                    }
                    (b'-', Direction::Up | Direction::Down) => {
                        beams.push((pos.left(), Direction::Left));
                        beams.push((pos.right(), Direction::Right));
                        break;
                    }
                    _ => {}
                }
                pos = pos.destination(direction, 1);
            }
        }

        let energised: HashSet<Position> = visited.into_iter().map(|(pos, _)| pos).collect();
        energised.len()
    }

    /// Every beam entry along the four edges with its inward direction.
    fn entries(&self) -> Vec<(Position, Direction)> {
        let last_row = self.bounds.row_count() - 1;
        let last_column = self.bounds.column_count() - 1;
        let mut entries = Vec::new();
        entries.extend(
            self.bounds
                .row_positions(0)
                .into_iter()
                .map(|pos| (pos, Direction::Down)),
        );
        entries.extend(
            self.bounds
                .row_positions(last_row)
                .into_iter()
                .map(|pos| (pos, Direction::Up)),
        );
        entries.extend(
            self.bounds
                .column_positions(0)
                .into_iter()
                .map(|pos| (pos, Direction::Right)),
        );
        entries.extend(
            self.bounds
                .column_positions(last_column)
                .into_iter()
                .map(|pos| (pos, Direction::Left)),
        );
        entries
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .count_energised_tiles(Position::ORIGIN, Direction::Right)
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .entries()
            .into_par_iter()
            .map(|(pos, direction)| shared.count_energised_tiles(pos, direction))
            .max()
            .map(|max| max.to_string())
            .ok_or_else(|| SolveError::SolveFailed("empty contraption".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = r".|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "46");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "51");
    }

    #[test]
    fn entry_count_covers_all_edges() {
        let shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(shared.entries().len(), 40);
    }
}
