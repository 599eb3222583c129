use anyhow::anyhow;
use aoc_common::input::non_empty_lines;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 12, tags = ["dp"])]
pub struct Solver;

const DAMAGED: u8 = b'#';
const OPERATIONAL: u8 = b'.';
const UNKNOWN: u8 = b'?';

/// One row of springs and its damaged-group sizes.
struct SpringRow {
    springs: String,
    damaged_groups: Vec<usize>,
}

impl SpringRow {
    /// Counts the valid arrangements, with the row unfolded `copies` times
    /// joined by '?'.
    fn count_arrangements(&self, copies: usize) -> u64 {
        let springs = std::iter::repeat_n(self.springs.as_str(), copies).join("?");
        let groups: Vec<usize> = self
            .damaged_groups
            .iter()
            .copied()
            .cycle()
            .take(self.damaged_groups.len() * copies)
            .collect();

        let mut cache = HashMap::new();
        count_recurse(springs.as_bytes(), &groups, &mut cache)
    }
}

/// Memoized over remaining (springs, groups) suffix lengths.
fn count_recurse<'a>(
    springs: &'a [u8],
    groups: &'a [usize],
    cache: &mut HashMap<(usize, usize), u64>,
) -> u64 {
    if let Some(count) = cache.get(&(springs.len(), groups.len())) {
        return *count;
    }

    let count = match groups.split_first() {
        None => {
            if springs.contains(&DAMAGED) {
                0
            } else {
                1
            }
        }
        Some((group, rest_groups)) => match springs.first() {
            None => 0,
            Some(&OPERATIONAL) => count_recurse(&springs[1..], groups, cache),
            Some(&UNKNOWN) => {
                // Branch: treat as operational, or fall through as damaged.
                count_recurse(&springs[1..], groups, cache)
                    + count_damaged(springs, *group, rest_groups, cache)
            }
            _ => count_damaged(springs, *group, rest_groups, cache),
        },
    };
    cache.insert((springs.len(), groups.len()), count);
    count
}

/// Consume a damaged group starting at the head of `springs`.
fn count_damaged(
    springs: &[u8],
    group: usize,
    rest_groups: &[usize],
    cache: &mut HashMap<(usize, usize), u64>,
) -> u64 {
    if springs.len() < group || springs[..group].contains(&OPERATIONAL) {
        return 0;
    }
    match springs.get(group) {
        // The group must be followed by a non-damaged separator.
        Some(&DAMAGED) => 0,
        Some(_) => count_recurse(&springs[group + 1..], rest_groups, cache),
        None => {
            if rest_groups.is_empty() {
                1
            } else {
                0
            }
        }
    }
}

pub struct SharedData {
    rows: Vec<SpringRow>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .map(|line| {
                let (springs, groups) = line
                    .split_once(' ')
                    .ok_or_else(|| anyhow!("missing groups in {:?}", line))?;
                let damaged_groups = groups
                    .split(',')
                    .map(|g| g.trim().parse())
                    .collect::<Result<Vec<usize>, _>>()?;
                Ok(SpringRow {
                    springs: springs.to_string(),
                    damaged_groups,
                })
            })
            .collect::<Result<Vec<_>, anyhow::Error>>()
            .map(|rows| SharedData { rows })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared
            .rows
            .iter()
            .map(|row| row.count_arrangements(1))
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared
            .rows
            .par_iter()
            .map(|row| row.count_arrangements(5))
            .sum();
        Ok(sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
???.### 1,1,3
.??..??...?##. 1,1,3
?#?#?#?#?#?#?#? 1,3,1,6
????.#...#... 4,1,1
????.######..#####. 1,6,5
?###???????? 3,2,1
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "21");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "525152");
    }

    #[test]
    fn fully_known_row_has_one_arrangement() {
        let row = SpringRow {
            springs: "#.#.###".to_string(),
            damaged_groups: vec![1, 1, 3],
        };
        assert_eq!(row.count_arrangements(1), 1);
    }

    #[test]
    fn last_sample_row_has_ten_arrangements() {
        let row = SpringRow {
            springs: "?###????????".to_string(),
            damaged_groups: vec![3, 2, 1],
        };
        assert_eq!(row.count_arrangements(1), 10);
    }
}
