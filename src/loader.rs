//! This module provides the `SpecificationLoader` struct, responsible for loading Turing Machine
//! specifications and input tapes from files and strings.

use crate::parser::parse;
use crate::types::{Specification, TuringMachineError};
use std::fs;
use std::path::Path;

/// `SpecificationLoader` is a utility struct for loading Turing Machine specifications.
pub struct SpecificationLoader;

impl SpecificationLoader {
    /// Loads a single specification from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the JSON file to load.
    ///
    /// # Returns
    ///
    /// * `Ok(Specification)` if the file is successfully read and decoded.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * `Err(TuringMachineError::MalformedSpecification)` if the content is not a valid specification.
    pub fn load_specification(path: &Path) -> Result<Specification, TuringMachineError> {
        parse(&Self::read_text(path)?)
    }

    /// Loads a single specification from the provided string content.
    pub fn load_specification_from_string(
        content: &str,
    ) -> Result<Specification, TuringMachineError> {
        parse(content)
    }

    /// Reads a file into a string, mapping I/O failures to `TuringMachineError::FileError`.
    ///
    /// Used for both specification text and input tapes.
    pub fn read_text(path: &Path) -> Result<String, TuringMachineError> {
        fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })
    }
}
