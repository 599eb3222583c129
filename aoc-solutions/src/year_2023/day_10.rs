use aoc_common::grid::{Boundary, Direction, Position};
use aoc_common::input::non_empty_lines;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashSet, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 10, tags = ["grid", "bfs"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TileType {
    Dirt,
    Horizontal,
    Vertical,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    Start,
}

impl TileType {
    fn from_char(c: char) -> Self {
        match c {
            '-' => TileType::Horizontal,
            '|' => TileType::Vertical,
            'L' => TileType::NorthEast,
            'J' => TileType::NorthWest,
            'F' => TileType::SouthEast,
            '7' => TileType::SouthWest,
            'S' => TileType::Start,
            _ => TileType::Dirt,
        }
    }

    /// Directions this pipe opens towards. Start opens everywhere.
    fn openings(&self) -> &'static [Direction] {
        match self {
            TileType::Horizontal => &[Direction::Left, Direction::Right],
            TileType::Vertical => &[Direction::Up, Direction::Down],
            TileType::NorthEast => &[Direction::Up, Direction::Right],
            TileType::NorthWest => &[Direction::Up, Direction::Left],
            TileType::SouthEast => &[Direction::Down, Direction::Right],
            TileType::SouthWest => &[Direction::Down, Direction::Left],
            TileType::Start => &[Direction::Up, Direction::Down, Direction::Left, Direction::Right],
            TileType::Dirt => &[],
        }
    }

    fn opens_towards(&self, direction: Direction) -> bool {
        self.openings().contains(&direction)
    }
}

pub struct PipeMap {
    tiles: Vec<Vec<TileType>>,
    boundary: Boundary,
    start: Position,
    loop_positions: HashSet<Position>,
    max_distance: u64,
}

impl AocParser for Solver {
    type SharedData<'a> = PipeMap;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let tiles: Vec<Vec<TileType>> = non_empty_lines(input)
            .map(|line| line.chars().map(TileType::from_char).collect())
            .collect();
        let boundary = Boundary::new(
            tiles.len() as i64,
            tiles.first().map_or(0, |r| r.len()) as i64,
        )
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        let start = boundary
            .positions()
            .find(|pos| tiles[pos.row as usize][pos.column as usize] == TileType::Start)
            .ok_or_else(|| ParseError::MissingData("no start tile".into()))?;

        let mut map = PipeMap {
            tiles,
            boundary,
            start,
            loop_positions: HashSet::new(),
            max_distance: 0,
        };
        map.walk_loop();
        Ok(map)
    }
}

impl PipeMap {
    fn tile(&self, pos: Position) -> TileType {
        self.tiles[pos.row as usize][pos.column as usize]
    }

    /// Two tiles connect when both open towards each other.
    fn can_travel(&self, from: Position, direction: Direction) -> bool {
        let to = from.destination(direction, 1);
        self.boundary.is_valid(to)
            && self.tile(from).opens_towards(direction)
            && self.tile(to).opens_towards(direction.opposite())
    }

    /// BFS from the start tile, recording the loop tiles and the farthest
    /// distance along the loop.
    fn walk_loop(&mut self) {
        let mut queue = VecDeque::new();
        queue.push_back((self.start, 0u64));
        self.loop_positions.insert(self.start);

        while let Some((pos, distance)) = queue.pop_front() {
            self.max_distance = self.max_distance.max(distance);
            for direction in Direction::ALL {
                let next = pos.destination(direction, 1);
                if self.can_travel(pos, direction) && self.loop_positions.insert(next) {
                    queue.push_back((next, distance + 1));
                }
            }
        }
    }

    /// What pipe shape the start tile actually is, from its loop connections.
    fn resolved_start_type(&self) -> TileType {
        let up = self.can_travel(self.start, Direction::Up);
        let down = self.can_travel(self.start, Direction::Down);
        let left = self.can_travel(self.start, Direction::Left);
        match (up, down, left) {
            (true, true, _) => TileType::Vertical,
            (true, false, true) => TileType::NorthWest,
            (true, false, false) => TileType::NorthEast,
            (false, true, true) => TileType::SouthWest,
            (false, true, false) => TileType::SouthEast,
            (false, false, _) => TileType::Horizontal,
        }
    }

    /// Counts tiles enclosed by the loop with a horizontal ray cast per row.
    /// A tile is inside when an odd number of north-opening loop pipes lie to
    /// its left.
    fn enclosed_count(&self) -> u64 {
        let start_type = self.resolved_start_type();
        let mut enclosed = 0u64;

        for row in 0..self.boundary.row_count() {
            let mut inside = false;
            for pos in self.boundary.row_positions(row) {
                if self.loop_positions.contains(&pos) {
                    let mut tile = self.tile(pos);
                    if tile == TileType::Start {
                        tile = start_type;
                    }
                    if tile.opens_towards(Direction::Up) {
                        inside = !inside;
                    }
                } else if inside {
                    enclosed += 1;
                }
            }
        }
        enclosed
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.max_distance.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.enclosed_count().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SIMPLE_LOOP: &str = "\
.....
.S-7.
.|.|.
.L-J.
.....
";

    const COMPLEX_LOOP: &str = "\
..F7.
.FJ|.
SJ.L7
|F--J
LJ...
";

    const ENCLOSED_SAMPLE: &str = "\
...........
.S-------7.
.|F-----7|.
.||.....||.
.||.....||.
.|L-7.F-J|.
.|..|.|..|.
.L--J.L--J.
...........
";

    const LARGER_ENCLOSED_SAMPLE: &str = "\
FF7FSF7F7F7F7F7F---7
L|LJ||||||||||||F--J
FL-7LJLJ||||||LJL-77
F--JF--7||LJLJ7F7FJ-
L---JF-JLJ.||-FJLJJ7
|F|F-JF---7F7-L7L|7|
|FFJF7L7F-JF7|JL---7
7-L-JL7||F7|L7F-7F7|
L.L7LFJ|||||FJL7||LJ
L7JLJL-JLJLJL--JLJ.L
";

    #[test]
    fn part_1_simple_loop() {
        let mut shared = Solver::parse(SIMPLE_LOOP).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "4");
    }

    #[test]
    fn part_1_complex_loop() {
        let mut shared = Solver::parse(COMPLEX_LOOP).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "8");
    }

    #[test]
    fn part_2_enclosed() {
        let mut shared = Solver::parse(ENCLOSED_SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "4");
    }

    #[test]
    fn part_2_larger_enclosed() {
        let mut shared = Solver::parse(LARGER_ENCLOSED_SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "10");
    }

    #[test]
    fn start_type_resolution() {
        let shared = Solver::parse(SIMPLE_LOOP).unwrap();
        assert_eq!(shared.resolved_start_type(), TileType::SouthEast);
    }
}
