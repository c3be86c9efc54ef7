//! Built-in sample programs, kept as instruction text so they go through the same parser as
//! user input.

use crate::parser::{parse, parse_tape};
use crate::types::{Instruction, MachineError, Symbol};

/// A named program together with the configuration it is meant to start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub initial_state: &'static str,
    pub tape: &'static str,
    pub instructions: &'static str,
}

impl ProgramInfo {
    pub fn instructions(&self) -> Result<Vec<Instruction>, MachineError> {
        parse(self.instructions)
    }

    pub fn tape(&self) -> Result<Vec<Symbol>, MachineError> {
        parse_tape(self.tape)
    }
}

pub const PROGRAMS: &[ProgramInfo] = &[
    ProgramInfo {
        name: "flip-run",
        description: "Flips alternating cells while walking right, halts on the first blank",
        initial_state: "q1",
        tape: "1 0 1 b",
        instructions: "q1 1 0 R q2, q2 0 1 R q1, q2 b b H halt",
    },
    ProgramInfo {
        name: "binary-increment",
        description: "Adds one to a binary number, growing the tape to the left on overflow",
        initial_state: "right",
        tape: "1 0 1 1",
        instructions: "
            right 0 0 R right
            right 1 1 R right
            right b b L carry
            carry 1 0 L carry
            carry 0 1 H done
            carry b 1 H done
        ",
    },
    ProgramInfo {
        name: "unary-addition",
        description: "Joins two unary numbers separated by '+'",
        initial_state: "scan",
        tape: "1 1 + 1 1",
        instructions: "
            scan 1 1 R scan
            scan + 1 R scan
            scan b b L erase
            erase 1 b H done
        ",
    },
];

/// Looks a sample program up by name.
pub fn find(name: &str) -> Option<&'static ProgramInfo> {
    PROGRAMS.iter().find(|p| p.name == name)
}
