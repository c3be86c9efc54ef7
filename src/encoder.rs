//! This module provides encoding functionality for turning instructions and tapes back into
//! text that `parser::parse` and `parser::parse_tape` accept.

use crate::parser::is_token;
use crate::table::TransitionTable;
use crate::types::{Instruction, MachineError, Symbol};

/// Encodes instructions as pipe-separated transitions.
///
/// Format: `current_state,input,output,direction,next_state|...`
///
/// # Arguments
///
/// * `instructions` - The instructions to encode, in order.
///
/// # Returns
///
/// * `Ok(String)` - The encoded instructions. Parsing it yields `instructions` again.
/// * `Err(MachineError::UnencodableSymbol)` if a state or symbol is empty or contains a
///   separator, since the text would not parse back to the same instructions.
pub fn encode(instructions: &[Instruction]) -> Result<String, MachineError> {
    let rules = instructions
        .iter()
        .map(|i| -> Result<String, MachineError> {
            for symbol in [
                &i.current_state,
                &i.current_symbol,
                &i.write_symbol,
                &i.next_state,
            ] {
                check_token(symbol)?;
            }

            Ok(format!(
                "{},{},{},{},{}",
                i.current_state, i.current_symbol, i.write_symbol, i.direction, i.next_state
            ))
        })
        .collect::<Result<Vec<_>, MachineError>>()?;

    Ok(rules.join("|"))
}

/// Encodes every rule of a table, sorted by state and then by symbol.
///
/// Duplicates that were overwritten while building the table are not part of the output.
pub fn encode_table(table: &TransitionTable) -> Result<String, MachineError> {
    encode(&table.instructions())
}

/// Encodes a tape as comma-separated symbols.
pub fn encode_tape(tape: &[Symbol]) -> Result<String, MachineError> {
    for symbol in tape {
        check_token(symbol)?;
    }

    Ok(tape.join(","))
}

fn check_token(symbol: &str) -> Result<(), MachineError> {
    if is_token(symbol) {
        Ok(())
    } else {
        Err(MachineError::UnencodableSymbol(symbol.to_string()))
    }
}
