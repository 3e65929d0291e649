//! The transition table: a lookup from `(state, symbol)` to the single rule that applies.

use crate::types::{StateId, Transition};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Maps `(state, symbol read)` pairs to transition rules.
///
/// Built once from a specification's rule list and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionTable {
    rules: HashMap<(StateId, char), Transition>,
}

impl TransitionTable {
    /// Builds a table from an ordered list of rules.
    ///
    /// When two rules share a `(from, read)` key the later one replaces the earlier one.
    pub fn from_transitions<'a, I>(transitions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transition>,
    {
        let mut rules = HashMap::new();

        for transition in transitions {
            let key = (transition.from.clone(), transition.read);
            if let Some(previous) = rules.insert(key, transition.clone()) {
                warn!(
                    state = %previous.from,
                    symbol = %previous.read,
                    "duplicate transition overwritten by a later rule"
                );
            }
        }

        debug!(rules = rules.len(), "built transition table");

        Self { rules }
    }

    /// Finds the rule for `state` reading `symbol`.
    pub fn lookup(&self, state: &StateId, symbol: char) -> Option<&Transition> {
        self.rules.get(&(state.clone(), symbol))
    }

    /// Returns the number of distinct `(state, symbol)` keys.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
