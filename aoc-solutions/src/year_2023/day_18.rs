use anyhow::{Context, anyhow};
use aoc_common::grid::{Direction, Position};
use aoc_common::input::non_empty_lines;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 18, tags = ["geometry"])]
pub struct Solver;

/// One trench edge: the listed direction/distance plus the pair hidden in the
/// colour code.
#[derive(Debug, Clone, Copy)]
struct Instruction {
    direction: Direction,
    distance: i64,
    encoded_direction: Direction,
    encoded_distance: i64,
}

pub struct DigPlan {
    instructions: Vec<Instruction>,
}

impl AocParser for Solver {
    type SharedData<'a> = DigPlan;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .map(parse_instruction)
            .collect::<Result<Vec<_>, _>>()
            .map(|instructions| DigPlan { instructions })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

/// "R 6 (#70c710)"
fn parse_instruction(line: &str) -> Result<Instruction, anyhow::Error> {
    let mut parts = line.split_whitespace();
    let direction = match parts.next() {
        Some("R") => Direction::Right,
        Some("D") => Direction::Down,
        Some("L") => Direction::Left,
        Some("U") => Direction::Up,
        other => return Err(anyhow!("bad direction {:?} in {:?}", other, line)),
    };
    let distance = parts
        .next()
        .context("missing distance")?
        .parse::<i64>()?;

    let colour = parts
        .next()
        .and_then(|c| c.strip_prefix("(#"))
        .and_then(|c| c.strip_suffix(')'))
        .with_context(|| format!("missing colour in {:?}", line))?;
    if colour.len() != 6 {
        return Err(anyhow!("colour must be 6 hex digits, got {:?}", colour));
    }
    let encoded_distance = i64::from_str_radix(&colour[..5], 16)?;
    let encoded_direction = match colour.as_bytes()[5] {
        b'0' => Direction::Right,
        b'1' => Direction::Down,
        b'2' => Direction::Left,
        b'3' => Direction::Up,
        other => return Err(anyhow!("bad encoded direction {:?}", other as char)),
    };

    Ok(Instruction {
        direction,
        distance,
        encoded_direction,
        encoded_distance,
    })
}

impl DigPlan {
    /// Lagoon size via the shoelace formula plus Pick's theorem: interior
    /// points plus the trench itself.
    fn dig_area(&self, moves: impl Iterator<Item = (Direction, i64)>) -> i64 {
        let mut corners = vec![Position::ORIGIN];
        let mut boundary = 0i64;
        for (direction, distance) in moves {
            let last = *corners.last().unwrap_or(&Position::ORIGIN);
            corners.push(last.destination(direction, distance));
            boundary += distance;
        }

        let twice_area: i64 = corners
            .iter()
            .circular_tuple_windows()
            .map(|(current, next)| current.row * next.column - current.column * next.row)
            .sum();
        let shoelace_area = twice_area.abs() / 2;

        let interior = shoelace_area - boundary / 2 + 1;
        interior + boundary
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let area = shared.dig_area(
            shared
                .instructions
                .iter()
                .map(|i| (i.direction, i.distance)),
        );
        Ok(area.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let area = shared.dig_area(
            shared
                .instructions
                .iter()
                .map(|i| (i.encoded_direction, i.encoded_distance)),
        );
        Ok(area.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
R 6 (#70c710)
D 5 (#0dc571)
L 2 (#5713f0)
D 2 (#d2c081)
R 2 (#59c680)
D 2 (#411b91)
L 5 (#8ceee2)
U 2 (#caa173)
L 1 (#1b58a2)
U 2 (#caa171)
R 2 (#7807d2)
U 3 (#a77fa3)
L 2 (#015232)
U 2 (#7a21e3)
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "62");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(
            Solver::solve_part(&mut shared, 2).unwrap(),
            "952408144115"
        );
    }

    #[test]
    fn colour_decodes_direction_and_distance() {
        let instruction = parse_instruction("R 6 (#70c710)").unwrap();
        assert_eq!(instruction.encoded_direction, Direction::Right);
        assert_eq!(instruction.encoded_distance, 461937);
    }

    #[test]
    fn unit_square_area() {
        let plan = Solver::parse(
            "R 1 (#000010)\nD 1 (#000011)\nL 1 (#000012)\nU 1 (#000013)",
        )
        .unwrap();
        let area = plan.dig_area(plan.instructions.iter().map(|i| (i.direction, i.distance)));
        assert_eq!(area, 4);
    }
}
