use anyhow::anyhow;
use aoc_common::input::non_empty_lines;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 7, tags = ["sorting"])]
pub struct Solver;

const HAND_SIZE: usize = 5;
const JOKER: u8 = b'J';

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

/// A Camel Cards hand with its bid.
#[derive(Debug, Clone, Copy)]
struct Hand {
    cards: [u8; HAND_SIZE],
    bet: u64,
}

impl Hand {
    /// Strength of a single card; jokers are the weakest card when promoted.
    fn card_strength(card: u8, promoted: bool) -> u8 {
        if promoted && card == JOKER {
            return 0;
        }
        match card {
            b'2'..=b'9' => card - b'1',
            b'T' => 9,
            b'J' => 10,
            b'Q' => 11,
            b'K' => 12,
            b'A' => 13,
            _ => 0,
        }
    }

    fn hand_type(&self, promoted: bool) -> HandType {
        let mut frequencies: Vec<(u8, u8)> = Vec::with_capacity(HAND_SIZE);
        let mut jokers = 0u8;
        for card in self.cards {
            if promoted && card == JOKER {
                jokers += 1;
                continue;
            }
            match frequencies.iter_mut().find(|(c, _)| *c == card) {
                Some((_, count)) => *count += 1,
                None => frequencies.push((card, 1)),
            }
        }

        // Jokers always join the largest group.
        let mut counts: Vec<u8> = frequencies.iter().map(|(_, count)| *count).collect();
        counts.sort_unstable_by(|a, b| b.cmp(a));
        match counts.first_mut() {
            Some(top) => *top += jokers,
            None => counts.push(jokers),
        }

        match (counts[0], counts.get(1).copied().unwrap_or(0)) {
            (5, _) => HandType::FiveOfAKind,
            (4, _) => HandType::FourOfAKind,
            (3, 2) => HandType::FullHouse,
            (3, _) => HandType::ThreeOfAKind,
            (2, 2) => HandType::TwoPair,
            (2, _) => HandType::OnePair,
            _ => HandType::HighCard,
        }
    }

    /// Type first, then card-by-card strength.
    fn sort_key(&self, promoted: bool) -> (HandType, [u8; HAND_SIZE]) {
        let strengths = self.cards.map(|c| Self::card_strength(c, promoted));
        (self.hand_type(promoted), strengths)
    }
}

pub struct SharedData {
    hands: Vec<Hand>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .map(parse_hand)
            .collect::<Result<Vec<_>, _>>()
            .map(|hands| SharedData { hands })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_hand(line: &str) -> Result<Hand, anyhow::Error> {
    let (cards, bet) = line
        .split_once(' ')
        .ok_or_else(|| anyhow!("missing bet in {:?}", line))?;
    let cards: [u8; HAND_SIZE] = cards
        .as_bytes()
        .try_into()
        .map_err(|_| anyhow!("expected {} cards in {:?}", HAND_SIZE, line))?;
    Ok(Hand {
        cards,
        bet: bet.trim().parse()?,
    })
}

/// Total winnings: rank (1-based after sorting) times bet, summed.
fn total_winnings(hands: &[Hand], promoted: bool) -> u64 {
    let mut sorted: Vec<&Hand> = hands.iter().collect();
    sorted.sort_by_key(|hand| hand.sort_key(promoted));
    sorted
        .iter()
        .enumerate()
        .map(|(idx, hand)| (idx as u64 + 1) * hand.bet)
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_winnings(&shared.hands, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_winnings(&shared.hands, true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
32T3K 765
T55J5 684
KK677 28
KTJJT 220
QQQJA 483
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "6440");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "5905");
    }

    #[test]
    fn joker_promotion_changes_type() {
        let hand = parse_hand("T55J5 684").unwrap();
        assert_eq!(hand.hand_type(false), HandType::ThreeOfAKind);
        assert_eq!(hand.hand_type(true), HandType::FourOfAKind);
    }

    #[test]
    fn all_jokers_promote_to_five_of_a_kind() {
        let hand = parse_hand("JJJJJ 1").unwrap();
        assert_eq!(hand.hand_type(true), HandType::FiveOfAKind);
    }
}
