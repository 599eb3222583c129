use anyhow::{Context, anyhow};
use aoc_common::input::non_empty_lines;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 4, tags = ["sets"])]
pub struct Solver;

/// A scratchcard with its winning numbers and the numbers you have.
pub struct Card {
    winning_numbers: HashSet<u32>,
    numbers_you_have: Vec<u32>,
}

impl Card {
    fn match_count(&self) -> usize {
        self.numbers_you_have
            .iter()
            .filter(|n| self.winning_numbers.contains(n))
            .count()
    }

    fn score(&self) -> u64 {
        match self.match_count() {
            0 => 0,
            n => 1 << (n - 1),
        }
    }
}

/// Cards indexed by position in the input (card numbers are contiguous from 1).
pub struct SharedData {
    cards: Vec<Card>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .map(parse_card)
            .collect::<Result<Vec<_>, _>>()
            .map(|cards| SharedData { cards })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_card(line: &str) -> Result<Card, anyhow::Error> {
    let (_, numbers) = line
        .split_once(':')
        .ok_or_else(|| anyhow!("missing ':' in {:?}", line))?;
    let (winning, yours) = numbers
        .split_once('|')
        .context("missing '|' separator")?;

    let winning_numbers = winning
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<HashSet<u32>, _>>()?;
    let numbers_you_have = yours
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<Vec<u32>, _>>()?;

    Ok(Card {
        winning_numbers,
        numbers_you_have,
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared.cards.iter().map(Card::score).sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Each card starts as one copy; matches on card i add copies of the
        // following match_count cards.
        let mut counts = vec![1u64; shared.cards.len()];
        for (idx, card) in shared.cards.iter().enumerate() {
            let copies = counts[idx];
            let last = (idx + card.match_count()).min(shared.cards.len() - 1);
            for count in &mut counts[idx + 1..=last] {
                *count += copies;
            }
        }
        Ok(counts.iter().sum::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53
Card 2: 13 32 20 16 61 | 61 30 68 82 17 32 24 19
Card 3:  1 21 53 59 44 | 69 82 63 72 16 21 14  1
Card 4: 41 92 73 84 69 | 59 84 76 51 58  5 54 83
Card 5: 87 83 26 28 32 | 88 30 70 12 93 22 82 36
Card 6: 31 18 13 56 72 | 74 77 10 23 35 67 36 11
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "13");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "30");
    }

    #[test]
    fn score_doubles_per_match() {
        let shared = Solver::parse("Card 1: 1 2 3 | 1 2 3").unwrap();
        assert_eq!(shared.cards[0].score(), 4);
    }
}
