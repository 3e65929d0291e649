//! This module turns a specification and an input into a finished `Report`: the trimmed
//! tape, a status message, and an acceptance code. Every path, including a specification
//! that cannot be decoded, produces a well-formed report.

use crate::machine::{Snapshot, TuringMachine};
use crate::parser::parse;
use crate::types::{
    Acceptance, Halt, Rejection, Specification, StateId, Step, TuringMachineError,
    MAX_EXECUTION_STEPS,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Settings for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Steps attempted before the machine is rejected as non-halting.
    pub max_steps: usize,
    /// Record a snapshot before the first step and after every applied transition.
    pub trace: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_steps: MAX_EXECUTION_STEPS,
            trace: false,
        }
    }
}

/// The result of a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// The trimmed final tape, or `None` when the specification could not be decoded.
    pub tape: Option<String>,
    /// Human-readable verdict.
    pub message: String,
    pub acceptance: Acceptance,
    /// Steps attempted, zero when no simulation happened.
    pub steps: usize,
    pub final_state: Option<StateId>,
    pub halt: Option<Halt>,
    /// Empty unless tracing was enabled.
    pub trace: Vec<Snapshot>,
}

impl Report {
    /// Returns the numeric acceptance code, `1` or `0`.
    pub fn code(&self) -> u8 {
        self.acceptance.code()
    }

    fn malformed(error: &TuringMachineError) -> Self {
        Self {
            tape: None,
            message: format!("Error: {error}"),
            acceptance: Acceptance::Rejected,
            steps: 0,
            final_state: None,
            halt: None,
            trace: Vec::new(),
        }
    }
}

/// Runs specifications with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Decodes `specification` and runs it against `input`.
    ///
    /// A specification that fails to decode yields a report with no tape, an explanatory
    /// message and acceptance code 0; no steps are executed.
    pub fn simulate(&self, specification: &str, input: &str) -> Report {
        match parse(specification) {
            Ok(specification) => self.run(&specification, input),
            Err(e) => {
                warn!(error = %e, "rejecting malformed specification");
                Report::malformed(&e)
            }
        }
    }

    /// Runs an already decoded specification against `input`.
    pub fn run(&self, specification: &Specification, input: &str) -> Report {
        let mut machine =
            TuringMachine::new(specification, input).with_max_steps(self.config.max_steps);
        let mut trace = Vec::new();

        let halt = if self.config.trace {
            trace.push(machine.snapshot());
            loop {
                match machine.step() {
                    Step::Continue => trace.push(machine.snapshot()),
                    Step::Halt(halt) => break halt,
                }
            }
        } else {
            machine.run()
        };

        let message = describe(&halt, machine.state(), machine.step_count());
        debug!(steps = machine.step_count(), "{message}");

        Report {
            tape: Some(machine.tape().trimmed()),
            message,
            acceptance: Acceptance::from(&halt),
            steps: machine.step_count(),
            final_state: Some(machine.state().clone()),
            halt: Some(halt),
            trace,
        }
    }
}

/// Decodes `specification` and runs it against `input` with the default configuration.
pub fn simulate(specification: &str, input: &str) -> Report {
    Simulator::default().simulate(specification, input)
}

/// Builds the status message for a finished run.
pub fn describe(halt: &Halt, state: &StateId, steps: usize) -> String {
    match halt {
        Halt::Accept => {
            format!("ACCEPTED (1) - Reached final state {state} in {steps} steps.")
        }
        Halt::Reject(Rejection::StepLimitExceeded { limit }) => {
            format!("REJECTED (0) - Exceeded maximum step limit ({limit}).")
        }
        Halt::Reject(Rejection::UndefinedTransition { state, symbol }) => format!(
            "REJECTED (0) - Halted in non-final state {state} after {steps} steps \
             (no transition defined for reading '{symbol}')."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANBN: &str = include_str!("../programs/anbn.json");

    const LOOP: &str = r#"{"initial": "q", "final": ["f"], "white": "_",
        "transitions": [{"from": "q", "to": "q", "read": "_", "write": "_", "dir": "R"}]}"#;

    #[test]
    fn test_accepted_report() {
        let report = simulate(ANBN, "aabb");

        assert_eq!(report.tape.as_deref(), Some("AABB"));
        assert_eq!(report.code(), 1);
        assert_eq!(report.steps, 13);
        assert_eq!(report.final_state, Some(StateId::from(4)));
        assert_eq!(
            report.message,
            "ACCEPTED (1) - Reached final state 4 in 13 steps."
        );
        assert!(report.trace.is_empty());
    }

    #[test]
    fn test_undefined_transition_report() {
        let report = simulate(ANBN, "ba");

        assert_eq!(report.code(), 0);
        assert_eq!(report.tape.as_deref(), Some("ba"));
        assert_eq!(report.steps, 1);
        assert_eq!(
            report.message,
            "REJECTED (0) - Halted in non-final state 0 after 1 steps \
             (no transition defined for reading 'b')."
        );
    }

    #[test]
    fn test_step_limit_report() {
        let report = simulate(LOOP, "");

        assert_eq!(report.code(), 0);
        assert_eq!(report.steps, MAX_EXECUTION_STEPS);
        assert_eq!(report.tape.as_deref(), Some("_"));
        assert_eq!(
            report.message,
            "REJECTED (0) - Exceeded maximum step limit (5000)."
        );
    }

    #[test]
    fn test_malformed_report() {
        let report = simulate("{\"initial\": 0, \"final\": [", "aabb");

        assert_eq!(report.tape, None);
        assert_eq!(report.code(), 0);
        assert_eq!(report.steps, 0);
        assert_eq!(report.halt, None);
        assert!(report
            .message
            .starts_with("Error: Could not parse JSON specification: "));
    }

    #[test]
    fn test_configured_step_limit() {
        let simulator = Simulator::new(SimulationConfig {
            max_steps: 12,
            trace: false,
        });
        let report = simulator.simulate(LOOP, "");

        assert_eq!(report.steps, 12);
        assert_eq!(
            report.message,
            "REJECTED (0) - Exceeded maximum step limit (12)."
        );
    }

    #[test]
    fn test_missing_rule_on_the_last_budgeted_step() {
        let scan = r#"{"initial": 0, "final": [1], "white": "_",
            "transitions": [{"from": 0, "to": 0, "read": "a", "write": "a", "dir": "R"}]}"#;
        let with_budget = |max_steps| {
            Simulator::new(SimulationConfig {
                max_steps,
                trace: false,
            })
            .simulate(scan, "aaa")
        };

        // the fourth step reads the blank past the input and finds no rule
        let report = with_budget(4);
        assert_eq!(report.steps, 4);
        assert_eq!(
            report.halt,
            Some(Halt::Reject(Rejection::UndefinedTransition {
                state: StateId::from(0),
                symbol: '_',
            }))
        );
        assert_eq!(
            report.message,
            "REJECTED (0) - Halted in non-final state 0 after 4 steps \
             (no transition defined for reading '_')."
        );

        let report = with_budget(3);
        assert_eq!(report.steps, 3);
        assert_eq!(
            report.halt,
            Some(Halt::Reject(Rejection::StepLimitExceeded { limit: 3 }))
        );
        assert_eq!(
            report.message,
            "REJECTED (0) - Exceeded maximum step limit (3)."
        );
    }

    #[test]
    fn test_trace_records_every_step() {
        let simulator = Simulator::new(SimulationConfig {
            trace: true,
            ..SimulationConfig::default()
        });
        let report = simulator.simulate(ANBN, "ab");

        // initial snapshot plus one per applied transition
        assert_eq!(report.code(), 1);
        assert_eq!(report.trace.len(), report.steps + 1);
        assert_eq!(report.trace[0].step, 0);
        assert_eq!(report.trace[0].tape, "ab");
        assert_eq!(report.trace.last().unwrap().state, StateId::from(4));
    }

    #[test]
    fn test_config_deserialization_defaults() {
        let config: SimulationConfig = serde_json::from_str(r#"{"trace": true}"#).unwrap();

        assert_eq!(config.max_steps, MAX_EXECUTION_STEPS);
        assert!(config.trace);
    }
}
