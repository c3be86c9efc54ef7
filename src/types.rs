//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator, including instructions, transition actions, execution results, snapshots and
//! error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::Rule;

/// An opaque token from the tape or state alphabet.
pub type Symbol = String;

/// The default blank symbol used on the Turing Machine tape.
pub const DEFAULT_BLANK_SYMBOL: &str = "b";
/// The maximum allowed size for an instruction file in bytes.
pub const MAX_PROGRAM_SIZE: usize = 65536; // 64KB
/// The default number of steps to execute before giving up on a run.
pub const MAX_EXECUTION_STEPS: usize = 10000;

/// A single five-tuple instruction: `(state, read, write, direction, next state)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    pub current_state: Symbol,
    pub current_symbol: Symbol,
    pub write_symbol: Symbol,
    pub direction: Direction,
    pub next_state: Symbol,
}

impl Instruction {
    pub fn new(
        current_state: impl Into<Symbol>,
        current_symbol: impl Into<Symbol>,
        write_symbol: impl Into<Symbol>,
        direction: Direction,
        next_state: impl Into<Symbol>,
    ) -> Self {
        Self {
            current_state: current_state.into(),
            current_symbol: current_symbol.into(),
            write_symbol: write_symbol.into(),
            direction,
            next_state: next_state.into(),
        }
    }

    /// Splits the instruction into its lookup key and the action stored for it.
    pub fn into_parts(self) -> ((Symbol, Symbol), Action) {
        (
            (self.current_state, self.current_symbol),
            Action {
                write: self.write_symbol,
                direction: self.direction,
                next_state: self.next_state,
            },
        )
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.current_state,
            self.current_symbol,
            self.write_symbol,
            self.direction,
            self.next_state
        )
    }
}

/// What the machine does once a `(state, symbol)` pair has matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The symbol written under the head.
    pub write: Symbol,
    /// Where the head moves after writing.
    pub direction: Direction,
    /// The state entered after the move. Ignored by halt transitions.
    pub next_state: Symbol,
}

/// Represents the possible moves of the Turing Machine head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Stop the machine after writing.
    Halt,
}

impl FromStr for Direction {
    type Err = String;

    /// Supports 'L' or '<' for Left, 'R' or '>' for Right, and 'H' for Halt.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L" | "<" => Ok(Direction::Left),
            "R" | ">" => Ok(Direction::Right),
            "H" => Ok(Direction::Halt),
            _ => Err(format!("Unsupported direction: {s}")),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Direction::Left => "L",
            Direction::Right => "R",
            Direction::Halt => "H",
        };
        f.write_str(c)
    }
}

/// Represents the outcome of a single Turing Machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The step was applied and the machine can keep going.
    Continue,
    /// The step applied a halt transition.
    Halted,
}

/// Represents the outcome of running a machine under a step budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A halt transition was applied.
    Halted,
    /// No rule matched the current configuration.
    Failed(MissingTransition),
    /// The step budget ran out before the machine halted.
    StepLimitExceeded,
}

impl RunOutcome {
    pub fn is_halted(&self) -> bool {
        matches!(self, RunOutcome::Halted)
    }

    /// Converts the outcome into a `Result`, treating anything but a halt as an error.
    ///
    /// `steps` is the number of steps the run applied and is what `Ok` carries.
    pub fn into_result(self, steps: usize) -> Result<usize, MachineError> {
        match self {
            RunOutcome::Halted => Ok(steps),
            RunOutcome::Failed(e) => Err(e.into()),
            RunOutcome::StepLimitExceeded => Err(MachineError::StepLimitExceeded(steps)),
        }
    }
}

/// A view of the machine taken right after a step was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot<'a> {
    /// Number of steps applied so far.
    pub step: usize,
    pub state: &'a str,
    pub tape: &'a [Symbol],
    pub head: usize,
}

impl Snapshot<'_> {
    /// Returns the tape as space separated symbols.
    pub fn tape_text(&self) -> String {
        self.tape.join(" ")
    }
}

impl fmt::Display for Snapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step {}: state={} head={} tape=[{}]",
            self.step,
            self.state,
            self.head,
            self.tape_text()
        )
    }
}

/// Settings for a machine that are independent of the transition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// The symbol read from every cell that was never materialized.
    pub blank: Symbol,
    /// The step budget used by `TapeMachine::run_to_completion`.
    pub max_steps: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            blank: DEFAULT_BLANK_SYMBOL.to_string(),
            max_steps: MAX_EXECUTION_STEPS,
        }
    }
}

/// Raised by a step when no rule exists for the current state and symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("No rule defined for state {state} and symbol {symbol}")]
pub struct MissingTransition {
    pub state: Symbol,
    pub symbol: Symbol,
}

/// Represents various errors that can occur during Turing Machine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    /// The instruction text does not split into whole five-tuples.
    #[error("Malformed instruction stream: {0} tokens is not a positive multiple of five")]
    MalformedInstructionStream(usize),
    /// Indicates an error during the parsing of instruction or tape text.
    #[error("Program parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// The machine reached a configuration without a matching rule.
    #[error(transparent)]
    MissingTransition(#[from] MissingTransition),
    /// The machine did not halt within the given number of steps.
    #[error("Step limit exceeded after {0} steps")]
    StepLimitExceeded(usize),
    /// A symbol is empty or contains a separator, so it cannot be written as text.
    #[error("Symbol {0:?} cannot be encoded")]
    UnencodableSymbol(String),
    /// Indicates an error related to reading instruction files.
    #[error("File error: {0}")]
    FileError(String),
}
