use aoc_common::grid::{Boundary, Direction, Position};
use aoc_common::input::non_empty_lines;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 23, tags = ["grid", "longest-path"])]
pub struct Solver;

const FOREST: u8 = b'#';
const PATH: u8 = b'.';

pub struct TrailMap<'a> {
    rows: Vec<&'a [u8]>,
    bounds: Boundary,
    start: Position,
    end: Position,
}

impl AocParser for Solver {
    type SharedData<'a> = TrailMap<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rows: Vec<&[u8]> = non_empty_lines(input).map(str::as_bytes).collect();
        let bounds = Boundary::new(
            rows.len() as i64,
            rows.first().map_or(0, |r| r.len()) as i64,
        )
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        let path_column = |row: &&[u8]| row.iter().position(|b| *b == PATH);
        let start = rows
            .first()
            .and_then(path_column)
            .map(|column| Position::new(0, column as i64))
            .ok_or_else(|| ParseError::InvalidFormat("no entry tile".to_string()))?;
        let end = rows
            .last()
            .and_then(path_column)
            .map(|column| Position::new(rows.len() as i64 - 1, column as i64))
            .ok_or_else(|| ParseError::InvalidFormat("no exit tile".to_string()))?;

        Ok(TrailMap {
            rows,
            bounds,
            start,
            end,
        })
    }
}

/// Junction-to-junction edges, with junctions numbered for bitmask DFS.
struct TrailGraph {
    edges: Vec<Vec<(usize, i64)>>,
    start: usize,
    end: usize,
}

impl TrailMap<'_> {
    fn tile(&self, pos: Position) -> u8 {
        self.rows[pos.row as usize][pos.column as usize]
    }

    /// Neighbours walkable from `pos`. On a slope with `follow_slopes` the
    /// only exit is downhill.
    fn next_positions(&self, pos: Position, follow_slopes: bool) -> Vec<Position> {
        let slope = match self.tile(pos) {
            b'^' => Some(Direction::Up),
            b'v' => Some(Direction::Down),
            b'<' => Some(Direction::Left),
            b'>' => Some(Direction::Right),
            _ => None,
        };
        if follow_slopes && let Some(direction) = slope {
            let next = pos.step(direction);
            return if self.bounds.is_valid(next) {
                vec![next]
            } else {
                vec![]
            };
        }
        self.bounds
            .valid_cross_neighbours(pos)
            .into_iter()
            .filter(|n| self.tile(*n) != FOREST)
            .collect()
    }

    /// Walkable tiles with three or more walkable neighbours, plus the entry
    /// and exit.
    fn junctions(&self) -> Vec<Position> {
        let mut junctions = vec![self.start, self.end];
        junctions.extend(self.bounds.positions().filter(|pos| {
            self.tile(*pos) != FOREST
                && *pos != self.start
                && *pos != self.end
                && self
                    .bounds
                    .valid_cross_neighbours(*pos)
                    .into_iter()
                    .filter(|n| self.tile(*n) != FOREST)
                    .count()
                >= 3
        }));
        junctions
    }

    /// Contracts corridors between junctions into weighted edges.
    fn contracted_graph(&self, follow_slopes: bool) -> TrailGraph {
        let junctions = self.junctions();
        let indices: HashMap<Position, usize> = junctions
            .iter()
            .enumerate()
            .map(|(idx, pos)| (*pos, idx))
            .collect();

        let edges = junctions
            .iter()
            .map(|junction| {
                let mut reachable: Vec<(usize, i64)> = Vec::new();
                let mut visited: Vec<Position> = vec![*junction];
                let mut stack: Vec<(Position, i64)> = vec![(*junction, 0)];
                while let Some((pos, distance)) = stack.pop() {
                    if distance > 0 && let Some(idx) = indices.get(&pos) {
                        reachable.push((*idx, distance));
                        continue;
                    }
                    for next in self.next_positions(pos, follow_slopes) {
                        if !visited.contains(&next) {
                            visited.push(next);
                            stack.push((next, distance + 1));
                        }
                    }
                }
                reachable
            })
            .collect();

        TrailGraph {
            edges,
            start: indices[&self.start],
            end: indices[&self.end],
        }
    }

    fn longest_hike(&self, follow_slopes: bool) -> Result<i64, SolveError> {
        let graph = self.contracted_graph(follow_slopes);
        if graph.edges.len() > u128::BITS as usize {
            return Err(SolveError::SolveFailed("too many junctions".into()));
        }
        longest_path(&graph, graph.start, 1u128 << graph.start)
            .ok_or_else(|| SolveError::SolveFailed("exit unreachable".into()))
    }
}

fn longest_path(graph: &TrailGraph, node: usize, visited: u128) -> Option<i64> {
    if node == graph.end {
        return Some(0);
    }
    graph.edges[node]
        .iter()
        .filter(|(next, _)| visited & (1 << *next) == 0)
        .filter_map(|(next, distance)| {
            longest_path(graph, *next, visited | (1 << *next)).map(|rest| rest + distance)
        })
        .max()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.longest_hike(true).map(|steps| steps.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.longest_hike(false).map(|steps| steps.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
#.#####################
#.......#########...###
#######.#########.#.###
###.....#.>.>.###.#.###
###v#####.#v#.###.#.###
###.>...#.#.#.....#...#
###v###.#.#.#########.#
###...#.#.#.......#...#
#####.#.#.#######.#.###
#.....#.#.#.......#...#
#.#####.#.#.#########v#
#.#...#...#...###...>.#
#.#.#v#######v###.###v#
#...#.>.#...>.>.#.###.#
#####v#.#.###v#.#.###.#
#.....#...#...#.#.#...#
#.#########.###.#.#.###
#...###...#...#...#.###
###.###.#.###v#####v###
#...#...#.#.>.>.#.>.###
#.###.###.#.###.#.#v###
#.....###...###...#...#
#####################.#
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "94");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "154");
    }

    #[test]
    fn entry_and_exit_are_found() {
        let shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(shared.start, Position::new(0, 1));
        assert_eq!(shared.end, Position::new(22, 21));
    }

    #[test]
    fn slopes_restrict_movement_only_when_followed() {
        let shared = Solver::parse(SAMPLE).unwrap();
        // '>' at (3, 10) forces rightward travel in part 1.
        let slope = Position::new(3, 10);
        assert_eq!(shared.next_positions(slope, true), vec![slope.right()]);
        assert!(shared.next_positions(slope, false).len() > 1);
    }
}
