//! This module defines the `TapeMachine` struct, which simulates a single-tape Turing Machine.
//! It handles the machine's state, the lazily grown tape, head movements, and execution of
//! transition rules looked up in a shared `TransitionTable`.

use crate::table::TransitionTable;
use crate::types::{
    Direction, MachineConfig, MissingTransition, RunOutcome, Snapshot, StepResult, Symbol,
    DEFAULT_BLANK_SYMBOL,
};
use tracing::{debug, trace};

/// Represents a single-tape Turing Machine.
///
/// The tape is conceptually infinite in both directions but only cells that were written
/// (or uncovered by moving left past the first cell) are materialized. Every other cell
/// reads as the blank symbol. The head always indexes into the materialized tape or sits
/// exactly one cell past its right end.
#[derive(Debug, Clone)]
pub struct TapeMachine<'t> {
    table: &'t TransitionTable,
    state: Symbol,
    tape: Vec<Symbol>,
    head: usize,
    blank: Symbol,
    step_count: usize,
    max_steps: usize,
    initial_state: Symbol,
    initial_tape: Vec<Symbol>,
}

impl<'t> TapeMachine<'t> {
    /// Creates a new machine using the default blank symbol.
    ///
    /// The initial state is not checked against the table: a machine whose state has no
    /// rules fails on its first step.
    pub fn new(
        table: &'t TransitionTable,
        tape: impl IntoIterator<Item = impl Into<Symbol>>,
        initial_state: impl Into<Symbol>,
    ) -> Self {
        Self::with_blank(table, tape, initial_state, DEFAULT_BLANK_SYMBOL)
    }

    /// Creates a new machine with an explicit blank symbol.
    pub fn with_blank(
        table: &'t TransitionTable,
        tape: impl IntoIterator<Item = impl Into<Symbol>>,
        initial_state: impl Into<Symbol>,
        blank: impl Into<Symbol>,
    ) -> Self {
        let config = MachineConfig {
            blank: blank.into(),
            ..MachineConfig::default()
        };
        Self::with_config(table, tape, initial_state, config)
    }

    /// Creates a new machine from a `MachineConfig`.
    pub fn with_config(
        table: &'t TransitionTable,
        tape: impl IntoIterator<Item = impl Into<Symbol>>,
        initial_state: impl Into<Symbol>,
        config: MachineConfig,
    ) -> Self {
        let tape: Vec<Symbol> = tape.into_iter().map(Into::into).collect();
        let state = initial_state.into();

        Self {
            table,
            state: state.clone(),
            tape: tape.clone(),
            head: 0,
            blank: config.blank,
            step_count: 0,
            max_steps: config.max_steps,
            initial_state: state,
            initial_tape: tape,
        }
    }

    /// Executes a single step of the machine.
    ///
    /// A step either applies completely (write, move, state update) or fails at the lookup
    /// before anything is touched.
    ///
    /// # Returns
    ///
    /// * `Ok(StepResult::Continue)` if a left or right move was applied.
    /// * `Ok(StepResult::Halted)` if a halt transition was applied.
    /// * `Err(MissingTransition)` if no rule matches the current state and symbol.
    pub fn step(&mut self) -> Result<StepResult, MissingTransition> {
        let action = match self.table.lookup(&self.state, self.symbol()) {
            Some(action) => action,
            None => {
                return Err(MissingTransition {
                    state: self.state.clone(),
                    symbol: self.symbol().to_string(),
                })
            }
        };

        // Only a write at one past the end grows the tape to the right
        if self.head < self.tape.len() {
            self.tape[self.head] = action.write.clone();
        } else {
            self.tape.push(action.write.clone());
        }
        self.step_count += 1;

        match action.direction {
            Direction::Left => {
                if self.head == 0 {
                    // Extend tape to the left, the head stays on the new first cell
                    self.tape.insert(0, self.blank.clone());
                } else {
                    self.head -= 1;
                }
            }
            Direction::Right => self.head += 1,
            Direction::Halt => {
                debug!(state = %self.state, steps = self.step_count, "machine halted");
                return Ok(StepResult::Halted);
            }
        }

        trace!(
            from = %self.state,
            to = %action.next_state,
            wrote = %action.write,
            head = self.head,
            "step applied"
        );
        self.state = action.next_state.clone();

        Ok(StepResult::Continue)
    }

    /// Runs the machine for at most `max_steps` steps.
    pub fn run(&mut self, max_steps: usize) -> RunOutcome {
        self.run_with(max_steps, |_| {})
    }

    /// Runs the machine for at most `max_steps` steps, handing a `Snapshot` to `observer`
    /// after every applied step, including the halting one.
    pub fn run_with<F>(&mut self, max_steps: usize, mut observer: F) -> RunOutcome
    where
        F: FnMut(&Snapshot<'_>),
    {
        for _ in 0..max_steps {
            match self.step() {
                Ok(StepResult::Continue) => observer(&self.snapshot()),
                Ok(StepResult::Halted) => {
                    observer(&self.snapshot());
                    return RunOutcome::Halted;
                }
                Err(missing) => {
                    debug!(%missing, steps = self.step_count, "machine failed");
                    return RunOutcome::Failed(missing);
                }
            }
        }

        debug!(max_steps, "step limit exceeded");
        RunOutcome::StepLimitExceeded
    }

    /// Runs the machine with the step budget it was configured with.
    pub fn run_to_completion(&mut self) -> RunOutcome {
        self.run(self.max_steps)
    }

    /// Returns a view of the current configuration.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            step: self.step_count,
            state: &self.state,
            tape: &self.tape,
            head: self.head,
        }
    }

    /// Resets the machine to its initial configuration.
    /// This includes resetting the state, tape, head position, and step count.
    pub fn reset(&mut self) {
        self.state = self.initial_state.clone();
        self.tape = self.initial_tape.clone();
        self.head = 0;
        self.step_count = 0;
    }

    /// Returns the symbol under the head.
    /// If the head is past the end of the materialized tape, the blank symbol is returned.
    ///
    /// | 1 | 0 |     tape
    ///   0   1   2   index
    ///
    /// head 2 returns the blank symbol without growing the tape.
    pub fn symbol(&self) -> &str {
        self.tape.get(self.head).unwrap_or(&self.blank)
    }

    /// Returns the current state of the machine.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the initial state of the machine.
    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    /// Returns the materialized tape.
    pub fn tape(&self) -> &[Symbol] {
        &self.tape
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn blank(&self) -> &str {
        &self.blank
    }

    /// Returns the total number of steps applied since construction or the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn table(&self) -> &'t TransitionTable {
        self.table
    }
}
