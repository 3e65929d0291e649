//! This crate provides the core logic for a single-tape Turing Machine simulator.
//! It includes modules for decoding JSON machine specifications, simulating their execution
//! on a growable tape, and reporting the trimmed tape together with an acceptance verdict.

pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod simulator;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the `SpecificationLoader` struct from the loader module.
pub use loader::SpecificationLoader;
/// Re-exports the `TuringMachine` struct and its `Snapshot` view from the machine module.
pub use machine::{Snapshot, TuringMachine};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports `ProgramInfo` and `ProgramManager` from the programs module.
pub use programs::{ProgramInfo, ProgramManager};
/// Re-exports the report-producing entry points from the simulator module.
pub use simulator::{simulate, Report, SimulationConfig, Simulator};
pub use table::TransitionTable;
pub use tape::Tape;
/// Re-exports various types related to machine definition and execution from the types module.
pub use types::{
    Acceptance, Direction, Halt, Rejection, Specification, StateId, Step, Transition,
    TuringMachineError, MAX_EXECUTION_STEPS,
};
