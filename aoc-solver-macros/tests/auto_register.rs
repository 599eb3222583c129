//! Tests for the `AutoRegisterSolver` derive: plugin submission and discovery

use aoc_solver::{
    AocParser, ParseError, PartSolver, RegistryBuilder, SolveError, SolverPlugin,
};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2034, day = 25, tags = ["test", "register"])]
struct RegisteredSolver;

impl AocParser for RegisteredSolver {
    type SharedData<'a> = &'a str;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for RegisteredSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

#[test]
fn plugin_is_collected() {
    let plugin = aoc_solver::inventory::iter::<SolverPlugin>()
        .find(|p| p.year == 2034 && p.day == 25)
        .expect("plugin should be submitted");
    assert_eq!(plugin.tags, &["test", "register"]);
    assert_eq!(plugin.solver.parts(), 1);
}

#[test]
fn plugin_round_trips_through_registry() {
    let registry = RegistryBuilder::new()
        .register_solver_plugins(|p| p.year == 2034 && p.day == 25)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2034, 25, "abcde").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "5");
    assert_eq!(solver.parts(), 1);
}

#[test]
fn tag_filter_excludes_plugin() {
    let registry = RegistryBuilder::new()
        .register_solver_plugins(|p| p.tags.contains(&"no-such-tag"))
        .unwrap()
        .build();
    assert!(!registry.storage().contains(2034, 25));
}
