//! This module embeds a small catalogue of ready-made machine specifications.

use crate::types::{Specification, StateId, TuringMachineError};
use std::collections::HashSet;

/// Embedded programs, as `(name, JSON specification)` pairs.
const PROGRAMS: [(&str, &str); 2] = [
    ("anbn", include_str!("../programs/anbn.json")),
    (
        "binary-increment",
        include_str!("../programs/binary-increment.json"),
    ),
];

/// Catalogue of the built-in specifications.
pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// List all program names
    pub fn list_program_names() -> Vec<&'static str> {
        PROGRAMS.iter().map(|(name, _)| *name).collect()
    }

    /// Get the JSON text of a program by its name
    pub fn get_program_text_by_name(name: &str) -> Result<&'static str, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|(program, _)| *program == name)
            .map(|(_, text)| *text)
            .ok_or_else(|| TuringMachineError::ProgramNotFound(name.to_string()))
    }

    /// Get a decoded program by its name
    pub fn get_program_by_name(name: &str) -> Result<Specification, TuringMachineError> {
        Self::get_program_text_by_name(name).and_then(crate::parser::parse)
    }

    /// Get information about a program by its name
    pub fn get_program_info(name: &str) -> Result<ProgramInfo, TuringMachineError> {
        let specification = Self::get_program_by_name(name)?;

        let mut states: HashSet<&StateId> = specification
            .transitions()
            .iter()
            .flat_map(|t| [&t.from, &t.to])
            .collect();
        states.insert(specification.initial_state());
        states.extend(specification.final_states().iter());

        Ok(ProgramInfo {
            name: name.to_string(),
            initial_state: specification.initial_state().to_string(),
            state_count: states.len(),
            transition_count: specification.table().len(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub name: String,
    pub initial_state: String,
    pub state_count: usize,
    pub transition_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::TuringMachine;
    use crate::types::Halt;

    #[test]
    fn test_all_programs_parse() {
        for name in ProgramManager::list_program_names() {
            assert!(
                ProgramManager::get_program_by_name(name).is_ok(),
                "Program '{}' is invalid",
                name
            );
        }
        assert_eq!(ProgramManager::get_program_count(), 2);
    }

    #[test]
    fn test_program_manager_get_program_by_name() {
        let program = ProgramManager::get_program_by_name("anbn");
        assert!(program.is_ok());

        let result = ProgramManager::get_program_by_name("Nonexistent");
        assert_eq!(
            result,
            Err(TuringMachineError::ProgramNotFound("Nonexistent".to_string()))
        );
    }

    #[test]
    fn test_binary_increment() {
        let program = ProgramManager::get_program_by_name("binary-increment").unwrap();

        for (input, expected) in [("1011", "1100"), ("111", "1000"), ("0", "1"), ("", "1")] {
            let mut machine = TuringMachine::new(&program, input);
            assert_eq!(machine.run(), Halt::Accept, "input {input:?}");
            assert_eq!(machine.tape().trimmed(), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_program_manager_get_program_info() {
        let info = ProgramManager::get_program_info("binary-increment").unwrap();

        assert_eq!(info.name, "binary-increment");
        assert_eq!(info.initial_state, "right");
        assert_eq!(info.state_count, 3);
        assert_eq!(info.transition_count, 6);

        let info = ProgramManager::get_program_info("anbn").unwrap();
        assert_eq!(info.state_count, 5);
        assert_eq!(info.transition_count, 10);

        assert!(ProgramManager::get_program_info("missing").is_err());
    }
}
