use aoc_common::grid::{Boundary, Direction, Position};
use aoc_common::input::non_empty_lines;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 17, tags = ["grid", "dijkstra"])]
pub struct Solver;

/// Dijkstra node: where the crucible is, how it got here and for how many
/// straight steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Node {
    position: Position,
    direction: Option<Direction>,
    steps: u8,
}

pub struct HeatMap {
    layout: Vec<Vec<u32>>,
    bounds: Boundary,
}

impl AocParser for Solver {
    type SharedData<'a> = HeatMap;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let layout: Vec<Vec<u32>> = non_empty_lines(input)
            .map(|line| {
                line.chars()
                    .map(|c| {
                        c.to_digit(10)
                            .ok_or_else(|| ParseError::InvalidFormat(format!("non-digit {:?}", c)))
                    })
                    .collect()
            })
            .collect::<Result<_, _>>()?;
        let bounds = Boundary::new(
            layout.len() as i64,
            layout.first().map_or(0, |r| r.len()) as i64,
        )
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        Ok(HeatMap { layout, bounds })
    }
}

impl HeatMap {
    fn heat(&self, pos: Position) -> u32 {
        self.layout[pos.row as usize][pos.column as usize]
    }

    /// Minimum heat loss from origin to the bottom-right corner, moving at
    /// least `min_steps` and at most `max_steps` in a line before turning.
    fn min_heat_loss(&self, min_steps: u8, max_steps: u8) -> Option<u32> {
        let goal = self.bounds.bottom_right();
        let mut visited: HashSet<Node> = HashSet::new();
        let mut queue: BinaryHeap<Reverse<(u32, Node)>> = BinaryHeap::new();
        queue.push(Reverse((
            0,
            Node {
                position: Position::ORIGIN,
                direction: None,
                steps: 0,
            },
        )));

        while let Some(Reverse((heat, node))) = queue.pop() {
            if node.position == goal && node.steps >= min_steps {
                return Some(heat);
            }
            if !visited.insert(node) {
                continue;
            }

            // Keep going straight while allowed.
            if let Some(direction) = node.direction
                && node.steps < max_steps
            {
                let next = node.position.destination(direction, 1);
                if self.bounds.is_valid(next) {
                    queue.push(Reverse((
                        heat + self.heat(next),
                        Node {
                            position: next,
                            direction: Some(direction),
                            steps: node.steps + 1,
                        },
                    )));
                }
            }

            // Turning is only allowed once min_steps straight moves are done.
            if node.direction.is_some() && node.steps < min_steps {
                continue;
            }
            for direction in Direction::ALL {
                if node.direction.is_some_and(|d| d == direction || d == direction.opposite()) {
                    continue;
                }
                let next = node.position.destination(direction, 1);
                if self.bounds.is_valid(next) {
                    queue.push(Reverse((
                        heat + self.heat(next),
                        Node {
                            position: next,
                            direction: Some(direction),
                            steps: 1,
                        },
                    )));
                }
            }
        }
        None
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .min_heat_loss(0, 3)
            .map(|heat| heat.to_string())
            .ok_or_else(|| SolveError::SolveFailed("goal unreachable".into()))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .min_heat_loss(4, 10)
            .map(|heat| heat.to_string())
            .ok_or_else(|| SolveError::SolveFailed("goal unreachable".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533
";

    const ULTRA_SAMPLE: &str = "\
111111111111
999999999991
999999999991
999999999991
999999999991
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "102");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "94");
    }

    #[test]
    fn ultra_crucible_needs_straight_runs() {
        let shared = Solver::parse(ULTRA_SAMPLE).unwrap();
        assert_eq!(shared.min_heat_loss(4, 10), Some(71));
    }
}
