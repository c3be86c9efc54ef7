//! This module provides functions for analyzing a transition table before execution. Nothing
//! found here stops a machine from running: construction never rejects a table, so every
//! finding is reported as an `AnalysisWarning` for the caller to surface.

use crate::table::TransitionTable;
use crate::types::{Direction, Symbol};
use std::collections::HashSet;
use std::fmt;

/// Represents the suspicious constructs that can be found in a table.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisWarning {
    /// The start state has no rules, so the first step fails.
    UnknownInitialState(String),
    /// No rule ever halts, so the machine can only fail or run out of steps.
    NoHaltTransition,
    /// States entered by a left or right move that have no rules themselves.
    DeadEndStates(Vec<String>),
    /// States with rules that cannot be reached from the start state.
    UnreachableStates(Vec<String>),
    /// Symbols on the initial tape that no rule reads.
    UnhandledTapeSymbols(Vec<String>),
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisWarning::UnknownInitialState(state) => {
                write!(f, "Initial state {state} has no rules")
            }
            AnalysisWarning::NoHaltTransition => write!(f, "No rule halts the machine"),
            AnalysisWarning::DeadEndStates(states) => {
                write!(f, "States entered without any rules: {states:?}")
            }
            AnalysisWarning::UnreachableStates(states) => {
                write!(f, "Unreachable states detected: {states:?}")
            }
            AnalysisWarning::UnhandledTapeSymbols(symbols) => write!(
                f,
                "Initial tape contains symbols not handled by any rule: {symbols:?}"
            ),
        }
    }
}

/// Analyzes a table together with the configuration a machine would start from.
///
/// # Arguments
///
/// * `table` - The transition table to check.
/// * `initial_state` - The state the machine starts in.
/// * `tape` - The initial tape.
///
/// # Returns
///
/// * `Vec<AnalysisWarning>` - Every finding, empty when nothing looks wrong.
pub fn analyze(
    table: &TransitionTable,
    initial_state: &str,
    tape: &[Symbol],
) -> Vec<AnalysisWarning> {
    [
        check_initial_state(table, initial_state),
        check_halt_transition(table),
        check_dead_end_states(table),
        check_unreachable_states(table, initial_state),
        check_tape_symbols(table, tape),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn check_initial_state(table: &TransitionTable, initial_state: &str) -> Option<AnalysisWarning> {
    (!table.has_state(initial_state))
        .then(|| AnalysisWarning::UnknownInitialState(initial_state.to_string()))
}

fn check_halt_transition(table: &TransitionTable) -> Option<AnalysisWarning> {
    let halts = table
        .iter()
        .any(|(_, _, action)| action.direction == Direction::Halt);

    (!table.is_empty() && !halts).then_some(AnalysisWarning::NoHaltTransition)
}

/// Halt rules never enter their next state, so only moving rules are considered.
fn check_dead_end_states(table: &TransitionTable) -> Option<AnalysisWarning> {
    let mut dead_ends: Vec<String> = table
        .iter()
        .filter(|(_, _, action)| action.direction != Direction::Halt)
        .map(|(_, _, action)| action.next_state.as_str())
        .filter(|state| !table.has_state(state))
        .collect::<HashSet<_>>()
        .into_iter()
        .map(String::from)
        .collect();

    dead_ends.sort();
    (!dead_ends.is_empty()).then_some(AnalysisWarning::DeadEndStates(dead_ends))
}

/// Walks the moving rules from the initial state and reports every state with rules that
/// the walk never visits.
fn check_unreachable_states(
    table: &TransitionTable,
    initial_state: &str,
) -> Option<AnalysisWarning> {
    let mut visited = HashSet::new();
    let mut queue = vec![initial_state];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        for (from, _, action) in table.iter() {
            if from == state
                && action.direction != Direction::Halt
                && !visited.contains(action.next_state.as_str())
            {
                queue.push(action.next_state.as_str());
            }
        }
    }

    let unreachable: Vec<String> = table
        .states()
        .into_iter()
        .filter(|state| !visited.contains(state))
        .map(String::from)
        .collect();

    (!unreachable.is_empty()).then_some(AnalysisWarning::UnreachableStates(unreachable))
}

fn check_tape_symbols(table: &TransitionTable, tape: &[Symbol]) -> Option<AnalysisWarning> {
    let handled: HashSet<&str> = table.iter().map(|(_, symbol, _)| symbol).collect();

    let mut unhandled: Vec<String> = tape
        .iter()
        .map(String::as_str)
        .filter(|symbol| !handled.contains(symbol))
        .collect::<HashSet<_>>()
        .into_iter()
        .map(String::from)
        .collect();

    unhandled.sort();
    (!unhandled.is_empty()).then_some(AnalysisWarning::UnhandledTapeSymbols(unhandled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, parse_tape};

    fn table(text: &str) -> TransitionTable {
        TransitionTable::new(parse(text).unwrap())
    }

    #[test]
    fn test_clean_table() {
        let table = table("q1 1 0 R q2, q2 0 1 R q1, q2 b b H halt");
        let tape = parse_tape("1 0 1 b").unwrap();

        assert!(analyze(&table, "q1", &tape).is_empty());
    }

    #[test]
    fn test_unknown_initial_state() {
        let table = table("q1 1 0 H q1");
        let warnings = analyze(&table, "start", &[]);

        assert!(warnings.contains(&AnalysisWarning::UnknownInitialState("start".to_string())));
        assert!(warnings.contains(&AnalysisWarning::UnreachableStates(vec!["q1".to_string()])));
    }

    #[test]
    fn test_no_halt_transition() {
        let table = table("q1 b b R q1");
        assert_eq!(
            analyze(&table, "q1", &[]),
            vec![AnalysisWarning::NoHaltTransition]
        );
    }

    #[test]
    fn test_empty_table() {
        let table = TransitionTable::default();
        assert_eq!(
            analyze(&table, "q1", &[]),
            vec![AnalysisWarning::UnknownInitialState("q1".to_string())]
        );
    }

    #[test]
    fn test_dead_end_states() {
        let table = table("q1 1 0 R q3, q1 0 0 L q2, q1 b b H done");
        let warnings = analyze(&table, "q1", &[]);

        assert_eq!(
            warnings,
            vec![AnalysisWarning::DeadEndStates(vec![
                "q2".to_string(),
                "q3".to_string()
            ])]
        );
    }

    #[test]
    fn test_halt_next_state_is_not_followed() {
        let table = table("q1 1 1 H q2, q2 1 1 H q2");
        let warnings = analyze(&table, "q1", &[]);

        assert_eq!(
            warnings,
            vec![AnalysisWarning::UnreachableStates(vec!["q2".to_string()])]
        );
    }

    #[test]
    fn test_unhandled_tape_symbols() {
        let table = table("q1 1 1 H q1");
        let tape = parse_tape("1 x 1 y x").unwrap();

        let warnings = analyze(&table, "q1", &tape);
        assert_eq!(
            warnings,
            vec![AnalysisWarning::UnhandledTapeSymbols(vec![
                "x".to_string(),
                "y".to_string()
            ])]
        );
        assert!(warnings[0].to_string().contains("not handled"));
    }
}
