//! This module provides the parser for Turing Machine specifications, utilizing `serde_json`.
//! A specification is a JSON object with `initial`, `final`, `white` and `transitions` fields.

use crate::types::{Specification, TuringMachineError};
use tracing::debug;

/// Parses the given input string into a `Specification`.
///
/// This is the main entry point for decoding specification text. The transition table is
/// built as part of decoding, so on success the returned specification is ready to run.
///
/// # Arguments
///
/// * `input` - A string slice containing the JSON specification.
///
/// # Returns
///
/// * `Ok(Specification)` if the input has the expected shape.
/// * `Err(TuringMachineError::MalformedSpecification)` for invalid JSON, missing fields,
///   symbols that are not exactly one character, or direction codes other than `L`/`R`.
pub fn parse(input: &str) -> Result<Specification, TuringMachineError> {
    let specification: Specification = serde_json::from_str(input)
        .map_err(|e| TuringMachineError::MalformedSpecification(e.to_string()))?;

    debug!(
        initial = %specification.initial_state(),
        final_states = specification.final_states().len(),
        blank = %specification.blank(),
        transitions = specification.transitions().len(),
        "parsed specification"
    );

    Ok(specification)
}
