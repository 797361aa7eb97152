use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use itertools::Itertools;
use thiserror::Error;
use tracing::trace;

use crate::utils::parse::numbers;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 17, tags = ["2024", "vm", "reverse-engineering"])]
pub struct Solver;

/// Instructions executed before a program is considered stuck.
const STEP_LIMIT: usize = 1_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VmError {
    #[error("combo operand 7 at instruction {0}")]
    ReservedOperand(usize),
    #[error("no halt within {} instructions", STEP_LIMIT)]
    StepLimit,
}

const A: usize = 0;
const B: usize = 1;
const C: usize = 2;

fn combo(operand: u8, reg: &[u64; 3], ip: usize) -> Result<u64, VmError> {
    match operand {
        0..=3 => Ok(u64::from(operand)),
        4..=6 => Ok(reg[usize::from(operand - 4)]),
        _ => Err(VmError::ReservedOperand(ip)),
    }
}

/// Division by a power of two; shifting by 64 or more leaves nothing.
fn shift(value: u64, by: u64) -> u64 {
    value.checked_shr(u32::try_from(by).unwrap_or(u32::MAX)).unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Computer {
    registers: [u64; 3],
    program: Vec<u8>,
}

impl Computer {
    /// Runs to completion with register A replaced by `a`, collecting `out` values.
    pub fn run(&self, a: u64) -> Result<Vec<u8>, VmError> {
        let mut reg = self.registers;
        reg[A] = a;
        let mut ip = 0;
        let mut out = Vec::new();

        for _ in 0..STEP_LIMIT {
            let (Some(&opcode), Some(&operand)) = (self.program.get(ip), self.program.get(ip + 1)) else {
                return Ok(out);
            };
            let literal = u64::from(operand);
            let mut next = ip + 2;
            match opcode {
                0 => reg[A] = shift(reg[A], combo(operand, &reg, ip)?),
                1 => reg[B] ^= literal,
                2 => reg[B] = combo(operand, &reg, ip)? & 7,
                3 if reg[A] != 0 => next = operand as usize,
                3 => {}
                4 => reg[B] ^= reg[C],
                5 => out.push((combo(operand, &reg, ip)? & 7) as u8),
                6 => reg[B] = shift(reg[A], combo(operand, &reg, ip)?),
                _ => reg[C] = shift(reg[A], combo(operand, &reg, ip)?),
            }
            ip = next;
        }
        Err(VmError::StepLimit)
    }

    /// Smallest A for which the program prints itself.
    ///
    /// Programs of this puzzle shift A right by 3 bits per output, so A is
    /// built one octal digit at a time from the last output backwards.
    pub fn quine(&self) -> Result<Option<u64>, VmError> {
        let mut candidates = vec![0u64];
        for start in (0..self.program.len()).rev() {
            let suffix = &self.program[start..];
            let mut next = Vec::new();
            for &prefix in &candidates {
                for digit in 0..8 {
                    let a = prefix << 3 | digit;
                    if self.run(a)? == suffix {
                        next.push(a);
                    }
                }
            }
            trace!(start, matches = next.len(), "octal digit search");
            candidates = next;
        }
        Ok(candidates.into_iter().min())
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Computer;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (registers, program) = input
            .split_once("Program:")
            .ok_or_else(|| ParseError::MissingData("no \"Program:\" line".into()))?;
        let registers: [u64; 3] = numbers::<u64>(registers)?
            .try_into()
            .map_err(|found: Vec<u64>| {
                ParseError::InvalidFormat(format!("expected 3 registers, found {}", found.len()))
            })?;
        let program = numbers::<u8>(program)?;
        if let Some(bad) = program.iter().find(|&&v| v > 7) {
            return Err(ParseError::InvalidFormat(format!("{bad} is not a 3-bit value")));
        }
        Ok(Computer { registers, program })
    }
}

fn vm_failure(e: VmError) -> SolveError {
    SolveError::SolveFailed(Box::new(e))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let out = shared.run(shared.registers[0]).map_err(vm_failure)?;
        Ok(out.iter().join(","))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .quine()
            .map_err(vm_failure)?
            .map(|a| a.to_string())
            .ok_or_else(|| SolveError::SolveFailed("no register A makes the program print itself".into()))
    }
}
