use anyhow::{Context, anyhow};
use aoc_common::input::{non_empty_lines, split_trimmed};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 2, tags = ["parsing"])]
pub struct Solver;

/// One handful of cubes shown during a game.
#[derive(Debug, Default, Clone, Copy)]
pub struct CubeShow {
    red: u32,
    green: u32,
    blue: u32,
}

impl CubeShow {
    fn is_possible(&self, max_red: u32, max_green: u32, max_blue: u32) -> bool {
        self.red <= max_red && self.green <= max_green && self.blue <= max_blue
    }
}

pub struct SharedData {
    games: Vec<(u32, Vec<CubeShow>)>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        non_empty_lines(input)
            .map(parse_game)
            .collect::<Result<Vec<_>, _>>()
            .map(|games| SharedData { games })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_game(line: &str) -> Result<(u32, Vec<CubeShow>), anyhow::Error> {
    let (header, shows) = line
        .split_once(':')
        .ok_or_else(|| anyhow!("missing ':' in {:?}", line))?;
    let game_num = header
        .split_whitespace()
        .nth(1)
        .context("missing game number")?
        .parse::<u32>()?;

    let shows = split_trimmed(shows, ';')
        .map(parse_show)
        .collect::<Result<Vec<_>, _>>()?;
    Ok((game_num, shows))
}

fn parse_show(shown_cubes: &str) -> Result<CubeShow, anyhow::Error> {
    let mut show = CubeShow::default();
    for entry in split_trimmed(shown_cubes, ',') {
        let (count, colour) = entry
            .split_once(' ')
            .ok_or_else(|| anyhow!("malformed cube entry {:?}", entry))?;
        let count = count.trim().parse::<u32>()?;
        match colour.trim().as_bytes().first() {
            Some(b'r') => show.red = count,
            Some(b'g') => show.green = count,
            Some(b'b') => show.blue = count,
            _ => return Err(anyhow!("unknown colour {:?}", colour)),
        }
    }
    Ok(show)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u32 = shared
            .games
            .iter()
            .filter(|(_, shows)| shows.iter().all(|s| s.is_possible(12, 13, 14)))
            .map(|(game_num, _)| game_num)
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared
            .games
            .iter()
            .map(|(_, shows)| min_power(shows))
            .sum();
        Ok(sum.to_string())
    }
}

/// Product of the per-colour maxima, the fewest cubes that make every show possible.
fn min_power(shows: &[CubeShow]) -> u64 {
    let (mut red, mut green, mut blue) = (0u64, 0u64, 0u64);
    for show in shows {
        red = red.max(show.red as u64);
        green = green.max(show.green as u64);
        blue = blue.max(show.blue as u64);
    }
    red * green * blue
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "8");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "2286");
    }

    #[test]
    fn malformed_line_rejected() {
        assert!(Solver::parse("Game 1 3 blue").is_err());
    }
}
