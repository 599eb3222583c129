//! Tests for the `AocSolver` derive: part dispatch to `PartSolver` impls

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError, Solver, SolverExt};
use aoc_solver_macros::AocSolver;

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct SumProduct;

impl AocParser for SumProduct {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .lines()
            .map(|line| {
                line.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat("Expected integer".into()))
            })
            .collect()
    }
}

impl PartSolver<1> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i64>().to_string())
    }
}

#[test]
fn dispatches_parts() {
    let mut shared = SumProduct::parse("1\n2\n3\n4").unwrap();
    assert_eq!(SumProduct::solve_part(&mut shared, 1).unwrap(), "10");
    assert_eq!(SumProduct::solve_part(&mut shared, 2).unwrap(), "24");
}

#[test]
fn parts_constant_matches_attribute() {
    assert_eq!(SumProduct::PARTS, 2);
}

#[test]
fn out_of_range_part_rejected() {
    let mut shared = SumProduct::parse("1").unwrap();
    assert!(matches!(
        SumProduct::solve_part_checked_range(&mut shared, 3),
        Err(SolveError::PartOutOfRange(3))
    ));
    assert!(matches!(
        SumProduct::solve_part_checked_range(&mut shared, 0),
        Err(SolveError::PartOutOfRange(0))
    ));
}
