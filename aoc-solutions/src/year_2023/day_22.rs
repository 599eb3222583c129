use anyhow::{Context, anyhow};
use aoc_common::input::non_empty_lines;
use aoc_common::three_d::{Coordinate, Direction};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 22, tags = ["3d", "simulation"])]
pub struct Solver;

/// A straight brick with `start <= end` on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Brick {
    start: Coordinate,
    end: Coordinate,
}

impl Brick {
    fn new(a: Coordinate, b: Coordinate) -> Brick {
        Brick {
            start: Coordinate::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            end: Coordinate::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    fn min_z(&self) -> i64 {
        self.start.z
    }

    fn max_z(&self) -> i64 {
        self.end.z
    }

    /// Every cell the brick occupies, walked along its single axis.
    fn cells(&self) -> Vec<Coordinate> {
        let (direction, distance) = if self.end.x > self.start.x {
            (Direction::PositiveX, self.end.x - self.start.x)
        } else if self.end.y > self.start.y {
            (Direction::PositiveY, self.end.y - self.start.y)
        } else {
            (Direction::PositiveZ, self.end.z - self.start.z)
        };
        self.start.line(direction, distance).collect()
    }

    /// The (x, y) columns the brick covers.
    fn footprint(&self) -> HashSet<(i64, i64)> {
        self.cells().into_iter().map(|c| (c.x, c.y)).collect()
    }
}

/// Bricks settled onto each other, with the resulting support graph.
pub struct BrickPile {
    bricks: Vec<Brick>,
    /// For each brick, the bricks resting directly on it.
    resting_above: Vec<HashSet<usize>>,
    /// For each brick, the bricks it rests directly on.
    resting_below: Vec<HashSet<usize>>,
}

impl AocParser for Solver {
    type SharedData<'a> = BrickPile;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let bricks = non_empty_lines(input)
            .map(parse_brick)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        Ok(BrickPile::settle(bricks))
    }
}

/// "1,0,1~1,2,1"
fn parse_brick(line: &str) -> Result<Brick, anyhow::Error> {
    let (first, second) = line
        .split_once('~')
        .ok_or_else(|| anyhow!("missing '~' in {:?}", line))?;
    Ok(Brick::new(
        parse_coordinate(first)?,
        parse_coordinate(second)?,
    ))
}

fn parse_coordinate(text: &str) -> Result<Coordinate, anyhow::Error> {
    let mut parts = text.trim().split(',');
    let mut next = || -> Result<i64, anyhow::Error> {
        Ok(parts
            .next()
            .with_context(|| format!("short coordinate {:?}", text))?
            .parse()?)
    };
    Ok(Coordinate::new(next()?, next()?, next()?))
}

impl BrickPile {
    /// Drops the bricks bottom-up onto a heightmap of occupied columns,
    /// recording who ends up resting on whom.
    fn settle(mut bricks: Vec<Brick>) -> BrickPile {
        bricks.sort_by_key(|b| (b.min_z(), b.max_z()));

        let mut resting_above = vec![HashSet::new(); bricks.len()];
        let mut resting_below = vec![HashSet::new(); bricks.len()];
        // Highest occupied z (and its brick) per (x, y) column.
        let mut column_tops: HashMap<(i64, i64), (i64, usize)> = HashMap::new();

        for idx in 0..bricks.len() {
            let footprint = bricks[idx].footprint();
            let support_z = footprint
                .iter()
                .filter_map(|cell| column_tops.get(cell).map(|(z, _)| *z))
                .max()
                .unwrap_or(0);

            let supporters: HashSet<usize> = footprint
                .iter()
                .filter_map(|cell| column_tops.get(cell))
                .filter(|(z, _)| *z == support_z)
                .map(|(_, below)| *below)
                .collect();
            for below in &supporters {
                resting_above[*below].insert(idx);
            }
            resting_below[idx] = supporters;

            let fall_distance = bricks[idx].min_z() - (support_z + 1);
            let brick = &mut bricks[idx];
            brick.start = brick.start.destination(Direction::NegativeZ, fall_distance);
            brick.end = brick.end.destination(Direction::NegativeZ, fall_distance);
            let top = brick.max_z();
            for cell in footprint {
                column_tops.insert(cell, (top, idx));
            }
        }

        BrickPile {
            bricks,
            resting_above,
            resting_below,
        }
    }

    /// Bricks that can be removed without anything above them falling.
    fn safe_disintegration_count(&self) -> usize {
        (0..self.bricks.len())
            .filter(|idx| {
                self.resting_above[*idx]
                    .iter()
                    .all(|above| self.resting_below[*above].len() > 1)
            })
            .count()
    }

    /// How many other bricks fall when this one is removed.
    fn chain_reaction_size(&self, idx: usize) -> usize {
        let mut falling: HashSet<usize> = HashSet::from([idx]);
        let mut queue: VecDeque<usize> = self.resting_above[idx]
            .iter()
            .filter(|above| self.resting_below[**above].len() == 1)
            .copied()
            .collect();
        falling.extend(queue.iter());

        while let Some(current) = queue.pop_front() {
            for above in &self.resting_above[current] {
                if falling.contains(above) {
                    continue;
                }
                if self.resting_below[*above].is_subset(&falling) {
                    falling.insert(*above);
                    queue.push_back(*above);
                }
            }
        }
        falling.len() - 1
    }

    fn total_chain_reactions(&self) -> usize {
        (0..self.bricks.len())
            .map(|idx| self.chain_reaction_size(idx))
            .sum()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.safe_disintegration_count().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.total_chain_reactions().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
1,0,1~1,2,1
0,0,2~2,0,2
0,2,3~2,2,3
0,0,4~0,2,4
2,0,5~2,2,5
0,1,6~2,1,6
1,1,8~1,1,9
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "5");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "7");
    }

    #[test]
    fn bricks_settle_onto_the_ground() {
        let shared = Solver::parse(SAMPLE).unwrap();
        // The lowest brick ends on z=1; the vertical one drops to z=5..6.
        assert!(shared.bricks.iter().all(|b| b.min_z() >= 1));
        assert_eq!(shared.bricks.iter().map(Brick::max_z).max(), Some(6));
    }

    #[test]
    fn vertical_brick_has_single_column_footprint() {
        let brick = parse_brick("1,1,8~1,1,9").unwrap();
        assert_eq!(brick.footprint(), HashSet::from([(1, 1)]));
        assert_eq!(brick.cells().len(), 2);
    }

    #[test]
    fn reversed_ends_are_normalised() {
        let brick = parse_brick("2,0,5~0,0,5").unwrap();
        assert_eq!(brick.start, Coordinate::new(0, 0, 5));
        assert_eq!(brick.end, Coordinate::new(2, 0, 5));
    }
}
