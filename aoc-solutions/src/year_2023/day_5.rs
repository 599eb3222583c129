use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 5, tags = ["ranges"])]
pub struct Solver;

/// One `destination source length` line of a mapping block.
#[derive(Debug, Clone, Copy)]
struct MapperEntry {
    source: i64,
    destination: i64,
    length: i64,
}

impl MapperEntry {
    fn in_source_range(&self, num: i64) -> bool {
        num >= self.source && num < self.source + self.length
    }

    fn in_destination_range(&self, num: i64) -> bool {
        num >= self.destination && num < self.destination + self.length
    }

    fn map(&self, num: i64) -> i64 {
        self.destination + (num - self.source)
    }

    fn unmap(&self, num: i64) -> i64 {
        self.source + (num - self.destination)
    }
}

/// One category-to-category mapping block. Unmapped values pass through.
#[derive(Debug, Default)]
struct Mapper {
    entries: Vec<MapperEntry>,
}

impl Mapper {
    fn map(&self, num: i64) -> i64 {
        self.entries
            .iter()
            .find(|e| e.in_source_range(num))
            .map_or(num, |e| e.map(num))
    }

    fn unmap(&self, num: i64) -> i64 {
        self.entries
            .iter()
            .find(|e| e.in_destination_range(num))
            .map_or(num, |e| e.unmap(num))
    }
}

pub struct Almanac {
    seeds: Vec<i64>,
    mappers: Vec<Mapper>,
}

impl Almanac {
    fn seed_to_location(&self, seed: i64) -> i64 {
        self.mappers.iter().fold(seed, |num, m| m.map(num))
    }

    fn location_to_seed(&self, location: i64) -> i64 {
        self.mappers.iter().rev().fold(location, |num, m| m.unmap(num))
    }

    /// Seed ranges for part 2: pairs of (start, length).
    fn seed_ranges(&self) -> impl Iterator<Item = (i64, i64)> {
        self.seeds.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Almanac;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_almanac(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_almanac(input: &str) -> Result<Almanac, anyhow::Error> {
    let mut lines = input.lines();
    let seeds_line = lines.next().context("missing seeds line")?;
    let seeds = seeds_line
        .strip_prefix("seeds:")
        .ok_or_else(|| anyhow!("expected seeds line, got {:?}", seeds_line))?
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<Vec<i64>, _>>()?;

    let mut mappers: Vec<Mapper> = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.as_bytes()[0].is_ascii_digit() {
            let nums = line
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<Vec<i64>, _>>()?;
            let [destination, source, length] = nums[..] else {
                return Err(anyhow!("expected 3 numbers in {:?}", line));
            };
            mappers
                .last_mut()
                .context("mapping entry before any map header")?
                .entries
                .push(MapperEntry {
                    source,
                    destination,
                    length,
                });
        } else {
            // "x-to-y map:" header starts a new block
            mappers.push(Mapper::default());
        }
    }

    Ok(Almanac { seeds, mappers })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .seeds
            .iter()
            .map(|seed| shared.seed_to_location(*seed))
            .min()
            .map(|min| min.to_string())
            .ok_or_else(|| SolveError::SolveFailed("no seeds in input".into()))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Walk candidate locations upward and unmap back to a seed; the first
        // location whose seed falls in any seed range is the minimum.
        let ranges: Vec<(i64, i64)> = shared.seed_ranges().collect();
        if ranges.is_empty() {
            return Err(SolveError::SolveFailed("no seed ranges in input".into()));
        }

        let location = (0i64..)
            .find(|location| {
                let seed = shared.location_to_seed(*location);
                ranges
                    .iter()
                    .any(|(start, length)| seed >= *start && seed < start + length)
            })
            .unwrap_or_default();
        Ok(location.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

    #[test]
    fn part_1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "35");
    }

    #[test]
    fn part_2_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "46");
    }

    #[test]
    fn map_and_unmap_are_inverse() {
        let shared = Solver::parse(SAMPLE).unwrap();
        for seed in [79, 14, 55, 13] {
            let location = shared.seed_to_location(seed);
            assert_eq!(shared.location_to_seed(location), seed);
        }
    }
}
