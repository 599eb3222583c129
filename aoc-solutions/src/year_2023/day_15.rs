use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 15, tags = ["hashing"])]
pub struct Solver;

const BOX_COUNT: usize = 256;

/// The HASH algorithm from the puzzle.
fn hash(content: &str) -> usize {
    content
        .bytes()
        .fold(0usize, |current, b| (current + b as usize) * 17 % BOX_COUNT)
}

/// A lens operation: either `label=focal` or `label-`.
enum Step<'a> {
    Add { label: &'a str, focal: u32 },
    Remove { label: &'a str },
}

impl<'a> Step<'a> {
    fn parse(step: &'a str) -> Result<Self, anyhow::Error> {
        if let Some(label) = step.strip_suffix('-') {
            return Ok(Step::Remove { label });
        }
        let (label, focal) = step
            .split_once('=')
            .ok_or_else(|| anyhow!("malformed step {:?}", step))?;
        Ok(Step::Add {
            label,
            focal: focal.parse()?,
        })
    }

    fn label(&self) -> &'a str {
        match self {
            Step::Add { label, .. } | Step::Remove { label } => label,
        }
    }
}

pub struct SharedData<'a> {
    steps: Vec<&'a str>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let steps: Vec<&str> = input.trim().split(',').map(str::trim).collect();
        if steps.is_empty() || steps[0].is_empty() {
            return Err(ParseError::MissingData("no initialization steps".into()));
        }
        Ok(SharedData { steps })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: usize = shared.steps.iter().map(|step| hash(step)).sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut boxes: Vec<Vec<(&str, u32)>> = vec![Vec::new(); BOX_COUNT];

        for step in &shared.steps {
            let step = Step::parse(step).map_err(|e| SolveError::SolveFailed(e.into()))?;
            let lenses = &mut boxes[hash(step.label())];
            match step {
                Step::Add { label, focal } => {
                    match lenses.iter_mut().find(|(l, _)| *l == label) {
                        Some((_, existing)) => *existing = focal,
                        None => lenses.push((label, focal)),
                    }
                }
                Step::Remove { label } => lenses.retain(|(l, _)| *l != label),
            }
        }

        let focal_power: u64 = boxes
            .iter()
            .enumerate()
            .flat_map(|(box_num, lenses)| {
                lenses.iter().enumerate().map(move |(slot, (_, focal))| {
                    (box_num as u64 + 1) * (slot as u64 + 1) * *focal as u64
                })
            })
            .sum();
        Ok(focal_power.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "rn=1,cm-,qp=3,cm=2,qp-,pc=4,ot=9,ab=5,pc-,pc=6,ot=7";

    #[test]
    fn hash_sample_word() {
        assert_eq!(hash("HASH"), 52);
    }

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "1320");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "145");
    }

    #[test]
    fn remove_step_parses() {
        assert!(matches!(
            Step::parse("cm-").unwrap(),
            Step::Remove { label: "cm" }
        ));
    }
}
