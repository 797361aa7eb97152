use std::collections::{HashMap, HashSet};

use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use itertools::Itertools;
use tracing::debug;

use crate::utils::parse::split_blocks;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 24, tags = ["2024", "circuit"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    And,
    Or,
    Xor,
}

impl Op {
    fn apply(self, lhs: bool, rhs: bool) -> bool {
        match self {
            Op::And => lhs & rhs,
            Op::Or => lhs | rhs,
            Op::Xor => lhs ^ rhs,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Gate<'a> {
    lhs: &'a str,
    op: Op,
    rhs: &'a str,
    out: &'a str,
}

impl Gate<'_> {
    fn reads(&self, wire: &str) -> bool {
        self.lhs == wire || self.rhs == wire
    }

    fn reads_inputs(&self) -> bool {
        is_input(self.lhs) && is_input(self.rhs)
    }
}

#[derive(Debug)]
pub struct Circuit<'a> {
    initial: Vec<(&'a str, bool)>,
    gates: Vec<Gate<'a>>,
}

fn is_input(wire: &str) -> bool {
    wire.starts_with('x') || wire.starts_with('y')
}

impl AocParser for Solver {
    type SharedData<'a> = Circuit<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let blocks = split_blocks(input);
        let [wires, gates] = &blocks[..] else {
            return Err(ParseError::InvalidFormat(format!(
                "expected wire values and gates, got {} blocks",
                blocks.len()
            )));
        };

        let initial = wires
            .iter()
            .map(|&line| {
                let value = match line.split_once(": ") {
                    Some((wire, "0")) => (wire, false),
                    Some((wire, "1")) => (wire, true),
                    _ => {
                        return Err(ParseError::InvalidFormat(format!(
                            "expected `wire: 0|1`, got {line:?}"
                        )));
                    }
                };
                Ok(value)
            })
            .collect::<Result<_, _>>()?;

        let gates = gates
            .iter()
            .map(|&line| {
                let Some((lhs, op, rhs, "->", out)) = line.split_whitespace().collect_tuple()
                else {
                    return Err(ParseError::InvalidFormat(format!(
                        "expected `a OP b -> c`, got {line:?}"
                    )));
                };
                let op = match op {
                    "AND" => Op::And,
                    "OR" => Op::Or,
                    "XOR" => Op::Xor,
                    other => {
                        return Err(ParseError::InvalidFormat(format!("unknown gate {other:?}")));
                    }
                };
                Ok(Gate { lhs, op, rhs, out })
            })
            .collect::<Result<_, _>>()?;

        Ok(Circuit { initial, gates })
    }
}

impl Circuit<'_> {
    /// Settles every wire reachable from the initial values.
    fn simulate(&self) -> HashMap<&str, bool> {
        let mut values: HashMap<&str, bool> = self.initial.iter().copied().collect();
        let mut pending: Vec<&Gate> = self.gates.iter().collect();
        loop {
            let before = pending.len();
            pending.retain(|gate| {
                match (values.get(gate.lhs), values.get(gate.rhs)) {
                    (Some(&lhs), Some(&rhs)) => {
                        values.insert(gate.out, gate.op.apply(lhs, rhs));
                        false
                    }
                    _ => true,
                }
            });
            if pending.is_empty() || pending.len() == before {
                break;
            }
        }
        values
    }

    fn output(&self) -> Result<u64, SolveError> {
        let values = self.simulate();
        let mut z_wires: Vec<&str> = self
            .gates
            .iter()
            .map(|gate| gate.out)
            .filter(|wire| wire.starts_with('z'))
            .collect();
        z_wires.sort_unstable();

        z_wires.iter().rev().try_fold(0u64, |acc, wire| -> Result<u64, SolveError> {
            let bit = values.get(wire).ok_or_else(|| {
                SolveError::SolveFailed(format!("wire {wire} never settles").into())
            })?;
            Ok((acc << 1) | u64::from(*bit))
        })
    }

    /// Outputs that break the shape of a ripple-carry adder.
    fn miswired(&self) -> Vec<&str> {
        let highest_z = self
            .gates
            .iter()
            .map(|gate| gate.out)
            .filter(|wire| wire.starts_with('z'))
            .max();
        let feeds = |wire: &str, op: Op| {
            self.gates
                .iter()
                .any(|gate| gate.op == op && gate.reads(wire))
        };

        let mut wrong = HashSet::new();
        for gate in &self.gates {
            let is_z = gate.out.starts_with('z');
            let first_bit = gate.reads("x00");

            // sum bits come out of the second half adder
            if is_z && gate.op != Op::Xor && Some(gate.out) != highest_z {
                wrong.insert(gate.out);
            }
            // a carry XOR must land on a z wire
            if gate.op == Op::Xor && !gate.reads_inputs() && !is_z {
                wrong.insert(gate.out);
            }
            // x ^ y feeds the sum XOR
            if gate.op == Op::Xor && gate.reads_inputs() && !first_bit && !feeds(gate.out, Op::Xor) {
                wrong.insert(gate.out);
            }
            // every AND feeds the carry OR
            if gate.op == Op::And && !first_bit && !feeds(gate.out, Op::Or) {
                wrong.insert(gate.out);
            }
        }
        wrong.into_iter().sorted_unstable().collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.output().map(|z| z.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let wrong = shared.miswired();
        if wrong.len() != 8 {
            debug!(count = wrong.len(), "unexpected number of miswired outputs");
        }
        Ok(wrong.join(","))
    }
}
