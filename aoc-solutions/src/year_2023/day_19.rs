use anyhow::{Context, anyhow};
use aoc_common::ranges::IntegerRange;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 19, tags = ["ranges", "workflows"])]
pub struct Solver;

const START: &str = "in";
const ACCEPTED: &str = "A";
const REJECTED: &str = "R";

const CATEGORIES: usize = 4;

fn category_index(category: char) -> Option<usize> {
    match category {
        'x' => Some(0),
        'm' => Some(1),
        'a' => Some(2),
        's' => Some(3),
        _ => None,
    }
}

/// A single workflow rule: an optional comparison guarding a jump.
#[derive(Debug, Clone)]
enum Rule {
    Jump(String),
    Compare {
        category: usize,
        less_than: bool,
        value: i64,
        jump: String,
    },
}

#[derive(Debug, Clone, Copy)]
struct Rating {
    values: [i64; CATEGORIES],
}

impl Rating {
    fn sum(&self) -> i64 {
        self.values.iter().sum()
    }
}

/// Per-category value ranges flowing through the workflows.
#[derive(Debug, Clone, Copy)]
struct RatingRanges {
    ranges: [IntegerRange; CATEGORIES],
}

impl RatingRanges {
    fn combinations(&self) -> i64 {
        self.ranges.iter().map(|r| r.len()).product()
    }
}

pub struct SharedData {
    workflows: HashMap<String, Vec<Rule>>,
    ratings: Vec<Rating>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_operation(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_operation(input: &str) -> Result<SharedData, anyhow::Error> {
    let (workflow_block, rating_block) = input
        .split_once("\n\n")
        .context("missing blank line between workflows and ratings")?;

    let workflows = workflow_block
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_workflow)
        .collect::<Result<HashMap<_, _>, _>>()?;
    let ratings = rating_block
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_rating)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SharedData { workflows, ratings })
}

/// "px{a<2006:qkq,m>2090:A,rfg}"
fn parse_workflow(line: &str) -> Result<(String, Vec<Rule>), anyhow::Error> {
    let (name, rules) = line
        .trim_end_matches('}')
        .split_once('{')
        .ok_or_else(|| anyhow!("malformed workflow {:?}", line))?;
    let rules = rules
        .split(',')
        .map(parse_rule)
        .collect::<Result<Vec<_>, _>>()?;
    Ok((name.to_string(), rules))
}

fn parse_rule(rule: &str) -> Result<Rule, anyhow::Error> {
    let Some((comparison, jump)) = rule.split_once(':') else {
        return Ok(Rule::Jump(rule.to_string()));
    };
    let mut chars = comparison.chars();
    let category = chars
        .next()
        .and_then(category_index)
        .with_context(|| format!("bad category in {:?}", rule))?;
    let less_than = match chars.next() {
        Some('<') => true,
        Some('>') => false,
        other => return Err(anyhow!("bad operator {:?} in {:?}", other, rule)),
    };
    let value = comparison[2..].parse::<i64>()?;
    Ok(Rule::Compare {
        category,
        less_than,
        value,
        jump: jump.to_string(),
    })
}

/// "{x=787,m=2655,a=1222,s=2876}"
fn parse_rating(line: &str) -> Result<Rating, anyhow::Error> {
    let mut values = [0i64; CATEGORIES];
    let inner = line
        .trim()
        .strip_prefix('{')
        .and_then(|l| l.strip_suffix('}'))
        .ok_or_else(|| anyhow!("malformed rating {:?}", line))?;
    for entry in inner.split(',') {
        let (category, value) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("malformed rating entry {:?}", entry))?;
        let idx = category
            .chars()
            .next()
            .and_then(category_index)
            .with_context(|| format!("bad category {:?}", category))?;
        values[idx] = value.parse()?;
    }
    Ok(Rating { values })
}

impl SharedData {
    fn rating_passes(&self, rating: &Rating) -> Result<bool, SolveError> {
        let mut workflow_name = START;
        loop {
            match workflow_name {
                ACCEPTED => return Ok(true),
                REJECTED => return Ok(false),
                _ => {}
            }
            let rules = self.workflows.get(workflow_name).ok_or_else(|| {
                SolveError::SolveFailed(format!("unknown workflow {:?}", workflow_name).into())
            })?;
            workflow_name = rules
                .iter()
                .find_map(|rule| match rule {
                    Rule::Jump(jump) => Some(jump.as_str()),
                    Rule::Compare {
                        category,
                        less_than,
                        value,
                        jump,
                    } => {
                        let rating_value = rating.values[*category];
                        let passes = if *less_than {
                            rating_value < *value
                        } else {
                            rating_value > *value
                        };
                        passes.then_some(jump.as_str())
                    }
                })
                .ok_or_else(|| {
                    SolveError::SolveFailed(
                        format!("workflow {:?} fell through", workflow_name).into(),
                    )
                })?;
        }
    }

    /// Pushes whole rating ranges through the workflows, splitting at each
    /// comparison, and sums the combinations that end up accepted.
    fn count_passes(&self, min_rating: i64, max_rating: i64) -> Result<i64, SolveError> {
        let full = IntegerRange::new(min_rating, max_rating)
            .map_err(|e| SolveError::SolveFailed(e.to_string().into()))?;
        let mut passed = 0i64;
        let mut queue: VecDeque<(RatingRanges, &str)> = VecDeque::new();
        queue.push_back((
            RatingRanges {
                ranges: [full; CATEGORIES],
            },
            START,
        ));

        while let Some((mut current, workflow_name)) = queue.pop_front() {
            match workflow_name {
                ACCEPTED => {
                    passed += current.combinations();
                    continue;
                }
                REJECTED => continue,
                _ => {}
            }
            let rules = self.workflows.get(workflow_name).ok_or_else(|| {
                SolveError::SolveFailed(format!("unknown workflow {:?}", workflow_name).into())
            })?;

            for rule in rules {
                match rule {
                    Rule::Jump(jump) => {
                        queue.push_back((current, jump));
                        break;
                    }
                    Rule::Compare {
                        category,
                        less_than,
                        value,
                        jump,
                    } => {
                        let range = current.ranges[*category];
                        let (matched, rest) = split_on_comparison(range, *less_than, *value);

                        if let Some(matched) = matched {
                            let mut split = current;
                            split.ranges[*category] = matched;
                            queue.push_back((split, jump));
                        }
                        match rest {
                            Some(rest) => current.ranges[*category] = rest,
                            None => break,
                        }
                    }
                }
            }
        }
        Ok(passed)
    }
}

/// Splits a range against `value < v` or `value > v` into the matching and
/// non-matching parts. Either side can be empty when the comparison covers
/// the whole range.
fn split_on_comparison(
    range: IntegerRange,
    less_than: bool,
    value: i64,
) -> (Option<IntegerRange>, Option<IntegerRange>) {
    if less_than {
        if value > range.max() {
            (Some(range), None)
        } else if value <= range.min() {
            (None, Some(range))
        } else if value == range.max() {
            // Split point sits on the upper bound; peel off the endpoint.
            (
                IntegerRange::new(range.min(), value - 1).ok(),
                IntegerRange::new(value, value).ok(),
            )
        } else {
            (
                range.split_lower(value, false).ok(),
                range.split_upper(value, true).ok(),
            )
        }
    } else if value < range.min() {
        (Some(range), None)
    } else if value >= range.max() {
        (None, Some(range))
    } else if value == range.min() {
        (
            IntegerRange::new(value + 1, range.max()).ok(),
            IntegerRange::new(value, value).ok(),
        )
    } else {
        (
            range.split_upper(value, false).ok(),
            range.split_lower(value, true).ok(),
        )
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut sum = 0i64;
        for rating in &shared.ratings {
            if shared.rating_passes(rating)? {
                sum += rating.sum();
            }
        }
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.count_passes(1, 4000).map(|count| count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
px{a<2006:qkq,m>2090:A,rfg}
pv{a>1716:R,A}
lnx{m>1548:A,A}
rfg{s<537:gd,x>2440:R,A}
qs{s>3448:A,lnx}
qkq{x<1416:A,crn}
crn{x>2662:A,R}
in{s<1351:px,qqz}
qqz{s>2770:qs,m<1801:hdj,R}
gd{a>3333:R,R}
hdj{m>838:A,pv}

{x=787,m=2655,a=1222,s=2876}
{x=1679,m=44,a=2067,s=496}
{x=2036,m=264,a=79,s=2244}
{x=2461,m=1339,a=466,s=291}
{x=2127,m=1623,a=2188,s=1013}
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "19114");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(
            Solver::solve_part(&mut shared, 2).unwrap(),
            "167409079868000"
        );
    }

    #[test]
    fn comparison_split_at_bounds() {
        let range = IntegerRange::new(1, 4000).unwrap();
        let (matched, rest) = split_on_comparison(range, true, 4000);
        assert_eq!(matched.unwrap().len(), 3999);
        assert_eq!(rest.unwrap().len(), 1);

        let (matched, rest) = split_on_comparison(range, false, 4000);
        assert!(matched.is_none());
        assert_eq!(rest.unwrap().len(), 4000);
    }

    #[test]
    fn first_sample_rating_is_accepted() {
        let shared = Solver::parse(SAMPLE).unwrap();
        assert!(shared.rating_passes(&shared.ratings[0]).unwrap());
        assert!(!shared.rating_passes(&shared.ratings[1]).unwrap());
    }
}
