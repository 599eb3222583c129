use anyhow::{Context, anyhow};
use aoc_common::math::lcm_all;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 8, tags = ["graph", "lcm"])]
pub struct Solver;

const START: &str = "AAA";
const END: &str = "ZZZ";

pub struct SharedData<'a> {
    instructions: &'a str,
    map: HashMap<&'a str, (&'a str, &'a str)>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_map(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_map(input: &str) -> Result<SharedData<'_>, anyhow::Error> {
    let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());
    let instructions = lines.next().context("missing instruction line")?;

    let map = lines
        .map(|line| {
            // "AAA = (BBB, CCC)"
            let (node, pair) = line
                .split_once('=')
                .ok_or_else(|| anyhow!("missing '=' in {:?}", line))?;
            let (left, right) = pair
                .trim()
                .strip_prefix('(')
                .and_then(|p| p.strip_suffix(')'))
                .and_then(|p| p.split_once(','))
                .ok_or_else(|| anyhow!("malformed node pair in {:?}", line))?;
            Ok((node.trim(), (left.trim(), right.trim())))
        })
        .collect::<Result<HashMap<_, _>, anyhow::Error>>()?;

    Ok(SharedData { instructions, map })
}

impl SharedData<'_> {
    /// Steps from `start` until the end condition holds, cycling through the
    /// instruction line.
    fn total_steps(&self, start: &str, is_end: impl Fn(&str) -> bool) -> Result<u64, SolveError> {
        let mut node = start;
        let mut steps = 0u64;
        for instruction in self.instructions.chars().cycle() {
            if is_end(node) {
                return Ok(steps);
            }
            let (left, right) = self
                .map
                .get(node)
                .ok_or_else(|| SolveError::SolveFailed(format!("unknown node {:?}", node).into()))?;
            node = if instruction == 'R' { right } else { left };
            steps += 1;
        }
        unreachable!("cycled instructions never end")
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .total_steps(START, |node| node == END)
            .map(|steps| steps.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Each ghost path is periodic, so simultaneous arrival happens at the
        // least common multiple of the individual cycle lengths.
        let starts: Vec<&str> = shared
            .map
            .keys()
            .copied()
            .filter(|node| node.ends_with('A'))
            .collect();

        let steps = starts
            .into_par_iter()
            .map(|start| shared.total_steps(start, |node| node.ends_with('Z')))
            .collect::<Result<Vec<u64>, _>>()?;

        Ok(lcm_all(steps.into_iter().map(|s| s as i64)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE_1: &str = "\
LLR

AAA = (BBB, BBB)
BBB = (AAA, ZZZ)
ZZZ = (ZZZ, ZZZ)
";

    const SAMPLE_2: &str = "\
LR

11A = (11B, XXX)
11B = (XXX, 11Z)
11Z = (11B, XXX)
22A = (22B, XXX)
22B = (22C, 22C)
22C = (22Z, 22Z)
22Z = (22B, 22B)
XXX = (XXX, XXX)
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE_1).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "6");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE_2).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "6");
    }

    #[test]
    fn unknown_node_is_an_error() {
        let shared = Solver::parse("L\n\nAAA = (BBB, BBB)").unwrap();
        assert!(shared.total_steps(START, |node| node == END).is_err());
    }
}
