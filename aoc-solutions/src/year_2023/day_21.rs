use aoc_common::grid::{Boundary, Position};
use aoc_common::input::non_empty_lines;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashSet, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 21, tags = ["grid", "bfs"])]
pub struct Solver;

const ROCK: u8 = b'#';
const START: u8 = b'S';

const PART_1_STEPS: i64 = 64;
const PART_2_STEPS: i64 = 26501365;

pub struct GardenMap<'a> {
    rows: Vec<&'a [u8]>,
    bounds: Boundary,
    start: Position,
}

impl AocParser for Solver {
    type SharedData<'a> = GardenMap<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rows: Vec<&[u8]> = non_empty_lines(input).map(str::as_bytes).collect();
        let bounds = Boundary::new(
            rows.len() as i64,
            rows.first().map_or(0, |r| r.len()) as i64,
        )
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        let start = rows
            .iter()
            .enumerate()
            .find_map(|(row, line)| {
                line.iter()
                    .position(|b| *b == START)
                    .map(|column| Position::new(row as i64, column as i64))
            })
            .ok_or_else(|| ParseError::InvalidFormat("no start plot".to_string()))?;
        Ok(GardenMap { rows, bounds, start })
    }
}

impl GardenMap<'_> {
    /// Whether the (possibly off-map) position lands on a plot once wrapped
    /// onto the repeating map.
    fn is_plot(&self, pos: Position) -> bool {
        let reduced = pos.reduce(self.bounds.row_count(), self.bounds.column_count());
        self.rows[reduced.row as usize][reduced.column as usize] != ROCK
    }

    /// Plots reachable in exactly `steps` steps on the bounded map. A plot at
    /// distance d is reachable iff d <= steps and d has the same parity.
    fn reachable_plots(&self, steps: i64) -> i64 {
        let mut reachable = 0i64;
        let mut visited: HashSet<Position> = HashSet::from([self.start]);
        let mut queue: VecDeque<(Position, i64)> = VecDeque::from([(self.start, 0)]);

        while let Some((pos, distance)) = queue.pop_front() {
            if distance % 2 == steps % 2 {
                reachable += 1;
            }
            if distance == steps {
                continue;
            }
            for neighbour in self.bounds.valid_cross_neighbours(pos) {
                if self.is_plot(neighbour) && visited.insert(neighbour) {
                    queue.push_back((neighbour, distance + 1));
                }
            }
        }
        reachable
    }

    /// Reachable plot counts on the infinite repeating map, sampled at each
    /// of the given (ascending) step counts.
    fn infinite_reachable(&self, sample_steps: &[i64]) -> Vec<i64> {
        let max_steps = sample_steps.last().copied().unwrap_or(0);
        let mut samples = Vec::with_capacity(sample_steps.len());
        let mut totals = [0i64; 2];
        let mut visited: HashSet<Position> = HashSet::from([self.start]);
        let mut frontier = vec![self.start];

        for step in 0..=max_steps {
            totals[(step % 2) as usize] += frontier.len() as i64;
            if sample_steps.contains(&step) {
                samples.push(totals[(step % 2) as usize]);
            }
            if step == max_steps {
                break;
            }
            let mut next = Vec::new();
            for pos in frontier {
                for neighbour in pos.cross_neighbours() {
                    if self.is_plot(neighbour) && visited.insert(neighbour) {
                        next.push(neighbour);
                    }
                }
            }
            frontier = next;
        }
        samples
    }

    /// The reachable count grows quadratically in whole map widths, so three
    /// samples one map-width apart pin down the polynomial.
    fn repeated_reachable_plots(&self, steps: i64) -> Result<i64, SolveError> {
        let size = self.bounds.row_count();
        if size == 0 || size != self.bounds.column_count() {
            return Err(SolveError::SolveFailed("map must be square".into()));
        }
        let remainder = steps % size;
        let widths = steps / size;

        let samples =
            self.infinite_reachable(&[remainder, remainder + size, remainder + 2 * size]);
        let [y0, y1, y2] = samples[..] else {
            return Err(SolveError::SolveFailed("sampling failed".into()));
        };

        let a = (y2 - 2 * y1 + y0) / 2;
        let b = y1 - y0 - a;
        let c = y0;
        Ok(a * widths * widths + b * widths + c)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.reachable_plots(PART_1_STEPS).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .repeated_reachable_plots(PART_2_STEPS)
            .map(|count| count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
...........
.....###.#.
.###.##..#.
..#.#...#..
....#.#....
.##..S####.
.##..#...#.
.......##..
.##.#.####.
.##..##.##.
...........
";

    #[test]
    fn six_steps_reach_sixteen_plots() {
        let shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(shared.reachable_plots(6), 16);
    }

    #[test]
    fn start_is_found() {
        let shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(shared.start, Position::new(5, 5));
    }

    #[test]
    fn infinite_map_counts_match_known_values() {
        let shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(shared.infinite_reachable(&[6, 10, 50, 100]), [16, 50, 1594, 6536]);
    }
}
