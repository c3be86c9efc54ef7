//! This crate provides the core logic for a single-tape Turing Machine simulator.
//! It includes modules for parsing five-tuple instructions, building transition tables,
//! executing machines on a lazily grown tape, and analyzing tables before a run.

pub mod analyzer;
pub mod encoder;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod table;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` function and `AnalysisWarning` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisWarning};
/// Re-exports the encoding functions from the encoder module.
pub use encoder::{encode, encode_table, encode_tape};
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `TapeMachine` struct from the machine module.
pub use machine::TapeMachine;
/// Re-exports the parsing functions from the parser module.
pub use parser::{parse, parse_tape};
/// Re-exports `ProgramInfo` and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, PROGRAMS};
/// Re-exports the `TransitionTable` struct from the table module.
pub use table::TransitionTable;
/// Re-exports the types describing instructions, execution results and errors.
pub use types::{
    Action, Direction, Instruction, MachineConfig, MachineError, MissingTransition, RunOutcome,
    Snapshot, StepResult, Symbol, DEFAULT_BLANK_SYMBOL, MAX_EXECUTION_STEPS, MAX_PROGRAM_SIZE,
};
