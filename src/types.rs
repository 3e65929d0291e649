//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator, including state identifiers, transitions, run outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use thiserror::Error;

use crate::table::TransitionTable;

/// The maximum number of steps to execute before the machine is rejected as non-halting.
pub const MAX_EXECUTION_STEPS: usize = 5000;

/// Identifies a machine state.
///
/// Specifications may name states with any JSON scalar: integers, other numbers,
/// booleans or strings. Values of different kinds never compare equal, even when they
/// print the same (`0`, `0.0` and `"0"` are three different states).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateId {
    Number(i64),
    /// Non-integer numbers, compared bit for bit.
    Float(f64),
    Bool(bool),
    Name(String),
}

impl PartialEq for StateId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StateId::Number(a), StateId::Number(b)) => a == b,
            (StateId::Float(a), StateId::Float(b)) => a.to_bits() == b.to_bits(),
            (StateId::Bool(a), StateId::Bool(b)) => a == b,
            (StateId::Name(a), StateId::Name(b)) => a == b,
            _ => false,
        }
    }
}

// JSON has no NaN, so bitwise float equality is reflexive for every decodable id.
impl Eq for StateId {}

impl Hash for StateId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            StateId::Number(n) => n.hash(state),
            StateId::Float(x) => x.to_bits().hash(state),
            StateId::Bool(b) => b.hash(state),
            StateId::Name(name) => name.hash(state),
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateId::Number(n) => write!(f, "{n}"),
            StateId::Float(x) => write!(f, "{x}"),
            StateId::Bool(b) => write!(f, "{b}"),
            StateId::Name(name) => f.write_str(name),
        }
    }
}

impl From<i64> for StateId {
    fn from(n: i64) -> Self {
        StateId::Number(n)
    }
}

impl From<&str> for StateId {
    fn from(name: &str) -> Self {
        StateId::Name(name.to_string())
    }
}

impl From<String> for StateId {
    fn from(name: String) -> Self {
        StateId::Name(name)
    }
}

/// Represents the possible directions a Turing Machine head can move.
///
/// Only the literal codes `"L"` and `"R"` are accepted when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    #[serde(rename = "L")]
    Left,
    /// Move the head one position to the right.
    #[serde(rename = "R")]
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => f.write_str("L"),
            Direction::Right => f.write_str("R"),
        }
    }
}

/// Represents a single transition rule: `(from, read) -> (to, write, dir)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state this rule applies in.
    pub from: StateId,
    /// The state the machine moves to.
    pub to: StateId,
    /// The symbol that must be under the head.
    pub read: char,
    /// The symbol written over the read symbol.
    pub write: char,
    /// The head movement after writing.
    #[serde(rename = "dir")]
    pub direction: Direction,
}

/// A decoded machine specification together with its transition table.
///
/// Decoding goes through the raw wire shape so the table is always built from the
/// rule list in one pass; a `Specification` never exists without its table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawSpecification")]
pub struct Specification {
    initial_state: StateId,
    final_states: HashSet<StateId>,
    blank: char,
    transitions: Vec<Transition>,
    table: TransitionTable,
}

impl Specification {
    pub fn new(
        initial_state: StateId,
        final_states: impl IntoIterator<Item = StateId>,
        blank: char,
        transitions: Vec<Transition>,
    ) -> Self {
        let table = TransitionTable::from_transitions(&transitions);
        Self {
            initial_state,
            final_states: final_states.into_iter().collect(),
            blank,
            transitions,
            table,
        }
    }

    /// The state the machine starts in.
    pub fn initial_state(&self) -> &StateId {
        &self.initial_state
    }

    /// States in which the machine accepts.
    pub fn final_states(&self) -> &HashSet<StateId> {
        &self.final_states
    }

    /// The filler symbol for unvisited cells.
    pub fn blank(&self) -> char {
        self.blank
    }

    /// The rules in declaration order, duplicates included.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Returns the lookup table built from [`Specification::transitions`].
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Checks whether `state` is one of the final states.
    pub fn is_final(&self, state: &StateId) -> bool {
        self.final_states.contains(state)
    }
}

/// The on-the-wire shape of a specification.
#[derive(Debug, Deserialize)]
struct RawSpecification {
    initial: StateId,
    #[serde(rename = "final")]
    final_states: Vec<StateId>,
    white: char,
    transitions: Vec<Transition>,
}

impl From<RawSpecification> for Specification {
    fn from(raw: RawSpecification) -> Self {
        Specification::new(raw.initial, raw.final_states, raw.white, raw.transitions)
    }
}

/// Represents the outcome of a single Turing Machine step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The machine performed a transition and may continue.
    Continue,
    /// The machine stopped and will not move again.
    Halt(Halt),
}

/// Why a run stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Halt {
    /// The current state is one of the final states.
    Accept,
    /// The machine stopped outside of a final state.
    Reject(Rejection),
}

/// Details of a rejection outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Rejection {
    /// No rule matches the current state and the symbol under the head.
    UndefinedTransition { state: StateId, symbol: char },
    /// The step ceiling was reached without entering a final state.
    StepLimitExceeded { limit: usize },
}

/// The acceptance code reported for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum Acceptance {
    Rejected = 0,
    Accepted = 1,
}

impl Acceptance {
    /// Returns the numeric acceptance code, `1` for accepted and `0` for rejected.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<&Halt> for Acceptance {
    fn from(halt: &Halt) -> Self {
        match halt {
            Halt::Accept => Acceptance::Accepted,
            Halt::Reject(_) => Acceptance::Rejected,
        }
    }
}

/// Represents various errors that can occur during Turing Machine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// The specification text could not be decoded into a specification.
    #[error("Could not parse JSON specification: {0}")]
    MalformedSpecification(String),
    /// Indicates an error related to file system operations, such as reading specification files.
    #[error("File error: {0}")]
    FileError(String),
    /// No built-in program has the requested name.
    #[error("Program '{0}' not found")]
    ProgramNotFound(String),
}
