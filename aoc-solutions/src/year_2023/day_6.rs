use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 6, tags = ["math"])]
pub struct Solver;

/// A boat race with a time limit and a distance record to beat.
#[derive(Debug, Clone, Copy)]
struct Race {
    time: i64,
    record_distance: i64,
}

impl Race {
    /// Number of hold times that beat the record. Distance is symmetric in the
    /// hold time, so the last win mirrors the first.
    fn count_winnings(&self) -> i64 {
        let Some(first_win) = (1..self.time)
            .find(|hold| hold * (self.time - hold) > self.record_distance)
        else {
            return 0;
        };
        let last_win = self.time - first_win;
        last_win - first_win + 1
    }
}

pub struct SharedData {
    races: Vec<Race>,
    combined: Race,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_races(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_races(input: &str) -> Result<SharedData, anyhow::Error> {
    let mut lines = input.lines();
    let times = lines.next().context("missing time line")?;
    let distances = lines.next().context("missing distance line")?;

    let (times, combined_time) = parse_number_line(times, "Time")?;
    let (distances, combined_distance) = parse_number_line(distances, "Distance")?;
    if times.len() != distances.len() {
        return Err(anyhow!(
            "time and distance counts differ ({} vs {})",
            times.len(),
            distances.len()
        ));
    }

    let races = times
        .into_iter()
        .zip(distances)
        .map(|(time, record_distance)| Race {
            time,
            record_distance,
        })
        .collect();
    Ok(SharedData {
        races,
        combined: Race {
            time: combined_time,
            record_distance: combined_distance,
        },
    })
}

/// Parses the numbers both ways: as a list and with the spaces removed.
fn parse_number_line(line: &str, label: &str) -> Result<(Vec<i64>, i64), anyhow::Error> {
    let (header, values) = line
        .split_once(':')
        .ok_or_else(|| anyhow!("missing ':' in {:?}", line))?;
    if header.trim() != label {
        return Err(anyhow!("expected {:?} line, got {:?}", label, header));
    }

    let list = values
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<Vec<i64>, _>>()?;
    let combined = values.replace(' ', "").parse::<i64>()?;
    Ok((list, combined))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let product: i64 = shared.races.iter().map(Race::count_winnings).product();
        Ok(product.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.combined.count_winnings().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
Time:      7  15   30
Distance:  9  40  200
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "288");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "71503");
    }

    #[test]
    fn unwinnable_race_counts_zero() {
        let race = Race {
            time: 4,
            record_distance: 100,
        };
        assert_eq!(race.count_winnings(), 0);
    }
}
