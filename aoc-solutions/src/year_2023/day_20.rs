use anyhow::{Context, anyhow};
use aoc_common::input::non_empty_lines;
use aoc_common::math::lcm;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 20, tags = ["simulation", "lcm"])]
pub struct Solver;

const BROADCASTER: &str = "broadcaster";
const FINAL_MODULE: &str = "rx";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pulse {
    Low,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModuleType {
    Broadcaster,
    FlipFlop,
    Conjunction,
    /// Named as a destination only; absorbs pulses.
    Sink,
}

/// A module in the machine, destinations resolved to arena indices.
#[derive(Debug)]
struct Module {
    name: String,
    module_type: ModuleType,
    destinations: Vec<usize>,
}

pub struct ModuleCollection {
    modules: Vec<Module>,
    broadcaster: usize,
}

/// Mutable pulse-propagation state, reset per part.
struct SimulationState {
    flip_flops_on: Vec<bool>,
    /// Conjunction memory: last pulse per input, keyed by input index.
    conjunction_memory: Vec<HashMap<usize, Pulse>>,
}

impl SimulationState {
    fn new(modules: &[Module]) -> Self {
        let mut conjunction_memory: Vec<HashMap<usize, Pulse>> =
            vec![HashMap::new(); modules.len()];
        for (idx, module) in modules.iter().enumerate() {
            for dest in &module.destinations {
                if modules[*dest].module_type == ModuleType::Conjunction {
                    conjunction_memory[*dest].insert(idx, Pulse::Low);
                }
            }
        }
        SimulationState {
            flip_flops_on: vec![false; modules.len()],
            conjunction_memory,
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = ModuleCollection;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_modules(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_modules(input: &str) -> Result<ModuleCollection, anyhow::Error> {
    // First pass assigns indices to declared modules.
    let mut modules: Vec<Module> = Vec::new();
    let mut indices: HashMap<String, usize> = HashMap::new();
    let mut destination_names: Vec<Vec<String>> = Vec::new();

    for line in non_empty_lines(input) {
        let (header, destinations) = line
            .split_once("->")
            .ok_or_else(|| anyhow!("missing '->' in {:?}", line))?;
        let header = header.trim();
        let (module_type, name) = match header.as_bytes().first() {
            Some(b'%') => (ModuleType::FlipFlop, &header[1..]),
            Some(b'&') => (ModuleType::Conjunction, &header[1..]),
            _ if header == BROADCASTER => (ModuleType::Broadcaster, header),
            _ => (ModuleType::Sink, header),
        };

        indices.insert(name.to_string(), modules.len());
        modules.push(Module {
            name: name.to_string(),
            module_type,
            destinations: Vec::new(),
        });
        destination_names.push(
            destinations
                .split(',')
                .map(|d| d.trim().to_string())
                .collect(),
        );
    }

    // Second pass resolves destinations, creating sinks for undeclared names.
    for (idx, names) in destination_names.into_iter().enumerate() {
        let destinations = names
            .into_iter()
            .map(|name| {
                *indices.entry(name.clone()).or_insert_with(|| {
                    modules.push(Module {
                        name,
                        module_type: ModuleType::Sink,
                        destinations: Vec::new(),
                    });
                    modules.len() - 1
                })
            })
            .collect();
        modules[idx].destinations = destinations;
    }

    let broadcaster = *indices
        .get(BROADCASTER)
        .context("missing broadcaster module")?;
    Ok(ModuleCollection {
        modules,
        broadcaster,
    })
}

impl ModuleCollection {
    fn index_of(&self, name: &str) -> Option<usize> {
        self.modules.iter().position(|m| m.name == name)
    }

    /// Presses the button once, invoking `on_send` for every pulse sent.
    fn press_button(
        &self,
        state: &mut SimulationState,
        mut on_send: impl FnMut(usize, usize, Pulse),
    ) {
        // (source, destination, pulse); the button press itself is the
        // initial low pulse into the broadcaster.
        let mut queue: VecDeque<(usize, usize, Pulse)> = VecDeque::new();
        queue.push_back((self.broadcaster, self.broadcaster, Pulse::Low));
        on_send(self.broadcaster, self.broadcaster, Pulse::Low);

        while let Some((source, target, pulse)) = queue.pop_front() {
            let module = &self.modules[target];
            let output = match module.module_type {
                ModuleType::Broadcaster => Some(pulse),
                ModuleType::FlipFlop => match pulse {
                    Pulse::High => None,
                    Pulse::Low => {
                        let on = &mut state.flip_flops_on[target];
                        *on = !*on;
                        Some(if *on { Pulse::High } else { Pulse::Low })
                    }
                },
                ModuleType::Conjunction => {
                    state.conjunction_memory[target].insert(source, pulse);
                    let all_high = state.conjunction_memory[target]
                        .values()
                        .all(|p| *p == Pulse::High);
                    Some(if all_high { Pulse::Low } else { Pulse::High })
                }
                ModuleType::Sink => None,
            };

            if let Some(output) = output {
                for dest in &module.destinations {
                    on_send(target, *dest, output);
                    queue.push_back((target, *dest, output));
                }
            }
        }
    }

    /// Product of total low and high pulses over `presses` button presses.
    fn pulse_product(&self, presses: u64) -> u64 {
        let mut state = SimulationState::new(&self.modules);
        let (mut low, mut high) = (0u64, 0u64);
        for _ in 0..presses {
            self.press_button(&mut state, |_, _, pulse| match pulse {
                Pulse::Low => low += 1,
                Pulse::High => high += 1,
            });
        }
        low * high
    }

    /// Button presses until "rx" receives a low pulse. The module feeding rx
    /// is a conjunction whose inputs each fire high on an independent cycle,
    /// so the answer is the least common multiple of those cycle lengths.
    fn rx_handled_count(&self) -> Result<i64, SolveError> {
        let rx = self
            .index_of(FINAL_MODULE)
            .ok_or_else(|| SolveError::SolveFailed("no rx module in input".into()))?;
        let feeder = self
            .modules
            .iter()
            .position(|m| m.destinations.contains(&rx))
            .ok_or_else(|| SolveError::SolveFailed("nothing feeds rx".into()))?;

        let mut first_high: HashMap<usize, i64> = self
            .modules
            .iter()
            .enumerate()
            .filter(|(_, m)| m.destinations.contains(&feeder))
            .map(|(idx, _)| (idx, 0))
            .collect();
        if first_high.is_empty() {
            return Err(SolveError::SolveFailed("rx feeder has no inputs".into()));
        }

        let mut state = SimulationState::new(&self.modules);
        let mut presses = 0i64;
        while first_high.values().any(|count| *count == 0) {
            presses += 1;
            self.press_button(&mut state, |source, target, pulse| {
                if target == feeder
                    && pulse == Pulse::High
                    && let Some(count) = first_high.get_mut(&source)
                    && *count == 0
                {
                    *count = presses;
                }
            });
        }

        Ok(first_high.values().fold(1, |acc, count| lcm(acc, *count)))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.pulse_product(1000).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.rx_handled_count().map(|count| count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SIMPLE_SAMPLE: &str = "\
broadcaster -> a, b, c
%a -> b
%b -> c
%c -> inv
&inv -> a
";

    const INTERESTING_SAMPLE: &str = "\
broadcaster -> a
%a -> inv, con
&inv -> b
%b -> con
&con -> output
";

    #[test]
    fn part_1_simple_sample() {
        let mut shared = Solver::parse(SIMPLE_SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "32000000");
    }

    #[test]
    fn part_1_interesting_sample() {
        let mut shared = Solver::parse(INTERESTING_SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "11687500");
    }

    #[test]
    fn part_2_without_rx_is_an_error() {
        let mut shared = Solver::parse(SIMPLE_SAMPLE).unwrap();
        assert!(Solver::solve_part(&mut shared, 2).is_err());
    }

    #[test]
    fn undeclared_destination_becomes_sink() {
        let shared = Solver::parse(INTERESTING_SAMPLE).unwrap();
        let output = shared.index_of("output").unwrap();
        assert_eq!(shared.modules[output].module_type, ModuleType::Sink);
    }
}
