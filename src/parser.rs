//! This module provides the parser for five-tuple instruction text, utilizing the `pest` crate.
//! Tokens may be separated by spaces, commas or pipes, all of which are treated alike.
//!
//! ```text
//! q1 1 0 R q2, q2 0 1 L q1 | q1 b b H halt
//! ```

use crate::types::{Direction, Instruction, MachineError, Symbol};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;

/// Number of tokens that make up one instruction.
const TUPLE_SIZE: usize = 5;

/// Characters matched by `WHITESPACE` in `grammar.pest`.
const SEPARATORS: [char; 6] = [' ', '\t', '\r', '\n', ',', '|'];

/// Returns `true` if `symbol` parses back as exactly one token.
pub fn is_token(symbol: &str) -> bool {
    !symbol.is_empty() && !symbol.contains(SEPARATORS)
}

/// Derives a `PestParser` for the token grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct InstructionParser;

/// Parses the given input string into a list of `Instruction`s.
///
/// # Arguments
///
/// * `input` - A string slice containing five-tuple instructions.
///
/// # Returns
///
/// * `Ok(Vec<Instruction>)` if the input holds a positive multiple of five tokens and every
///   direction token is valid.
/// * `Err(MachineError::MalformedInstructionStream)` if the token count is wrong.
/// * `Err(MachineError::ParseError)` if a direction token is not recognized.
pub fn parse(input: &str) -> Result<Vec<Instruction>, MachineError> {
    let symbols = parse_symbols(input)?;

    if symbols.is_empty() || symbols.len() % TUPLE_SIZE != 0 {
        return Err(MachineError::MalformedInstructionStream(symbols.len()));
    }

    symbols
        .chunks_exact(TUPLE_SIZE)
        .map(parse_instruction)
        .collect()
}

/// Parses tape text into symbols, using the same separators as instructions.
///
/// An empty input yields an empty tape.
pub fn parse_tape(input: &str) -> Result<Vec<Symbol>, MachineError> {
    Ok(parse_symbols(input)?
        .into_iter()
        .map(|pair| pair.as_str().to_string())
        .collect())
}

/// Splits the input into `symbol` pairs, keeping their spans for error reporting.
fn parse_symbols(input: &str) -> Result<Vec<Pair<'_, Rule>>, MachineError> {
    let pairs = InstructionParser::parse(Rule::program, input)
        .map_err(|e| MachineError::ParseError(e.into()))?;

    Ok(pairs
        .flatten()
        .filter(|pair| pair.as_rule() == Rule::symbol)
        .collect())
}

/// Builds one `Instruction` from exactly five symbol pairs.
fn parse_instruction(tuple: &[Pair<'_, Rule>]) -> Result<Instruction, MachineError> {
    let text = |i: usize| tuple[i].as_str().to_string();

    Ok(Instruction {
        current_state: text(0),
        current_symbol: text(1),
        write_symbol: text(2),
        direction: parse_direction(&tuple[3])?,
        next_state: text(4),
    })
}

/// Parses a single direction from a `Pair<Rule::symbol>`.
fn parse_direction(pair: &Pair<'_, Rule>) -> Result<Direction, MachineError> {
    pair.as_str()
        .parse()
        .map_err(|msg: String| parse_error(&msg, pair.as_span()))
}

/// Creates a `MachineError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> MachineError {
    MachineError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}
