//! This module defines the `TuringMachine` struct, which simulates a single-tape deterministic
//! Turing Machine. It handles the machine's state, tape growth, head movements, halting
//! detection, and the bounded execution of transition rules.

use crate::tape::Tape;
use crate::types::{Halt, Rejection, Specification, StateId, Step, MAX_EXECUTION_STEPS};
use serde::Serialize;
use tracing::{debug, trace};

/// Represents a single-tape Turing Machine run.
///
/// The machine borrows an immutable `Specification` and owns everything a run mutates:
/// the tape, the current state and the step counter. Separate machines built from the
/// same specification are fully independent.
#[derive(Debug, Clone)]
pub struct TuringMachine<'a> {
    specification: &'a Specification,
    state: StateId,
    tape: Tape,
    step_count: usize,
    max_steps: usize,
    halt: Option<Halt>,
}

/// A view of the machine between steps, used for step traces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Number of steps executed so far.
    pub step: usize,
    pub state: StateId,
    /// Head position; may be `-1` or the tape length right after a move.
    pub head: isize,
    /// The untrimmed tape content.
    pub tape: String,
}

impl<'a> TuringMachine<'a> {
    /// Creates a new `TuringMachine` in the specification's initial state.
    ///
    /// # Arguments
    ///
    /// * `specification` - The machine definition and transition table.
    /// * `input` - Raw input text; surrounding whitespace is ignored.
    pub fn new(specification: &'a Specification, input: &str) -> Self {
        Self {
            specification,
            state: specification.initial_state().clone(),
            tape: Tape::new(input, specification.blank()),
            step_count: 0,
            max_steps: MAX_EXECUTION_STEPS,
            halt: None,
        }
    }

    /// Replaces the step ceiling.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Executes a single step of the Turing Machine's computation.
    ///
    /// The step counter is incremented before the tape is expanded and read, so the
    /// attempt that finds no applicable rule is counted too.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a transition was applied.
    /// * `Step::Halt(_)` once the machine accepted, found no rule, or hit the step ceiling.
    ///   Every later call returns the same halt without touching the machine.
    pub fn step(&mut self) -> Step {
        if let Some(halt) = &self.halt {
            return Step::Halt(halt.clone());
        }

        if let Some(halt) = self.check_halt() {
            return self.finish(halt);
        }

        self.step_count += 1;

        let index = self.tape.expand();
        let symbol = self.tape.symbol_at(index);

        let specification = self.specification;
        let Some(transition) = specification.table().lookup(&self.state, symbol) else {
            let rejection = Rejection::UndefinedTransition {
                state: self.state.clone(),
                symbol,
            };
            return self.finish(Halt::Reject(rejection));
        };

        trace!(
            step = self.step_count,
            from = %self.state,
            read = %symbol,
            to = %transition.to,
            write = %transition.write,
            dir = %transition.direction,
            "transition"
        );

        self.tape.write(transition.write);
        self.tape.shift(transition.direction);
        self.state = transition.to.clone();

        Step::Continue
    }

    /// Runs the Turing Machine until it halts. Always terminates within the step ceiling.
    pub fn run(&mut self) -> Halt {
        loop {
            if let Step::Halt(halt) = self.step() {
                return halt;
            }
        }
    }

    /// Loop guard: accept when in a final state, reject when the budget is spent.
    fn check_halt(&self) -> Option<Halt> {
        if self.specification.is_final(&self.state) {
            Some(Halt::Accept)
        } else if self.step_count >= self.max_steps {
            Some(Halt::Reject(Rejection::StepLimitExceeded {
                limit: self.max_steps,
            }))
        } else {
            None
        }
    }

    fn finish(&mut self, halt: Halt) -> Step {
        debug!(state = %self.state, steps = self.step_count, ?halt, "machine halted");
        self.halt = Some(halt.clone());
        Step::Halt(halt)
    }

    /// Returns the current state of the Turing Machine.
    pub fn state(&self) -> &StateId {
        &self.state
    }

    /// Returns the total number of steps attempted so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Returns the halt outcome, if the machine has stopped.
    pub fn halt(&self) -> Option<&Halt> {
        self.halt.as_ref()
    }

    pub fn is_halted(&self) -> bool {
        self.halt.is_some()
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn specification(&self) -> &'a Specification {
        self.specification
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            step: self.step_count,
            state: self.state.clone(),
            head: self.tape.head(),
            tape: self.tape.to_string(),
        }
    }
}
