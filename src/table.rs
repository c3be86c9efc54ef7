//! This module defines the `TransitionTable`, the read-only rule set consulted by a
//! `TapeMachine` on every step.

use crate::types::{Action, Instruction, Symbol};
use std::collections::HashMap;
use tracing::debug;

/// A lookup from `(state, symbol)` to the `Action` the machine performs.
///
/// Rules are grouped by state so that a lookup can be done with borrowed strings.
/// The table is immutable once built and can be shared by any number of machines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionTable {
    rules: HashMap<Symbol, HashMap<Symbol, Action>>,
}

impl TransitionTable {
    /// Builds a table from instructions in order.
    ///
    /// When two instructions share the same `(state, symbol)` key the later one wins.
    pub fn new(instructions: impl IntoIterator<Item = Instruction>) -> Self {
        let mut rules: HashMap<Symbol, HashMap<Symbol, Action>> = HashMap::new();

        for instruction in instructions {
            let ((state, symbol), action) = instruction.into_parts();
            let by_symbol = rules.entry(state).or_default();

            if let Some(previous) = by_symbol.get(&symbol) {
                debug!(
                    symbol = %symbol,
                    ?previous,
                    replacement = ?action,
                    "overwriting duplicate rule"
                );
            }
            by_symbol.insert(symbol, action);
        }

        let table = Self { rules };
        debug!(rules = table.len(), states = table.rules.len(), "built transition table");
        table
    }

    /// Returns the action for `(state, symbol)`, if any.
    pub fn lookup(&self, state: &str, symbol: &str) -> Option<&Action> {
        self.rules.get(state)?.get(symbol)
    }

    /// Returns the total number of rules.
    pub fn len(&self) -> usize {
        self.rules.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if at least one rule starts from `state`.
    pub fn has_state(&self, state: &str) -> bool {
        self.rules.get(state).is_some_and(|r| !r.is_empty())
    }

    /// Returns the states that have at least one rule, sorted.
    pub fn states(&self) -> Vec<&str> {
        let mut states: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        states.sort_unstable();
        states
    }

    /// Iterates over every `(state, symbol, action)` triple in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Action)> {
        self.rules.iter().flat_map(|(state, by_symbol)| {
            by_symbol
                .iter()
                .map(move |(symbol, action)| (state.as_str(), symbol.as_str(), action))
        })
    }

    /// Returns the rules as instructions, sorted by state and then by symbol.
    pub fn instructions(&self) -> Vec<Instruction> {
        let mut instructions: Vec<Instruction> = self
            .iter()
            .map(|(state, symbol, action)| Instruction {
                current_state: state.to_string(),
                current_symbol: symbol.to_string(),
                write_symbol: action.write.clone(),
                direction: action.direction,
                next_state: action.next_state.clone(),
            })
            .collect();

        instructions.sort_by(|a, b| {
            (&a.current_state, &a.current_symbol).cmp(&(&b.current_state, &b.current_symbol))
        });
        instructions
    }
}

impl FromIterator<Instruction> for TransitionTable {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn flip_run() -> Vec<Instruction> {
        vec![
            Instruction::new("q1", "1", "0", Direction::Right, "q2"),
            Instruction::new("q2", "0", "1", Direction::Right, "q1"),
            Instruction::new("q2", "b", "b", Direction::Halt, "halt"),
        ]
    }

    #[test]
    fn test_build_and_lookup() {
        let table = TransitionTable::new(flip_run());

        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());

        let action = table.lookup("q1", "1").unwrap();
        assert_eq!(action.write, "0");
        assert_eq!(action.direction, Direction::Right);
        assert_eq!(action.next_state, "q2");

        assert!(table.lookup("q1", "0").is_none());
        assert!(table.lookup("halt", "b").is_none());
    }

    #[test]
    fn test_empty_table() {
        let table = TransitionTable::new(Vec::new());

        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.states().is_empty());
        assert!(table.lookup("q1", "b").is_none());
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let table: TransitionTable = vec![
            Instruction::new("q1", "1", "0", Direction::Right, "q2"),
            Instruction::new("q1", "1", "1", Direction::Left, "q3"),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.len(), 1);
        let action = table.lookup("q1", "1").unwrap();
        assert_eq!(action.write, "1");
        assert_eq!(action.direction, Direction::Left);
        assert_eq!(action.next_state, "q3");
    }

    #[test]
    fn test_lookup_does_not_mutate() {
        let table = TransitionTable::new(flip_run());
        let before = table.clone();

        let first = table.lookup("q2", "b").cloned();
        let second = table.lookup("q2", "b").cloned();

        assert_eq!(first, second);
        assert_eq!(table, before);
    }

    #[test]
    fn test_states_and_instructions_are_sorted() {
        let table = TransitionTable::new(flip_run().into_iter().rev());

        assert_eq!(table.states(), vec!["q1", "q2"]);
        assert!(table.has_state("q2"));
        assert!(!table.has_state("halt"));

        let instructions = table.instructions();
        assert_eq!(instructions.len(), 3);
        assert_eq!(instructions[0].to_string(), "q1 1 0 R q2");
        assert_eq!(instructions[1].to_string(), "q2 0 1 R q1");
        assert_eq!(instructions[2].to_string(), "q2 b b H halt");
    }
}
