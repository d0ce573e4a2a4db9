use std::fmt;

use crate::config::constants::DEFAULT_MAX_COMPOSE_STATES;
use crate::fst::shortest_path::path_weight;
use crate::fst::{compose, shortest_path, Fst, FstError, TropicalWeight};
use crate::grammar::CardinalGrammar;

/// Why a numeral could not be read. Callers of [`NumberTransducer::apply`]
/// never see this; every variant means "leave the digits as they are".
#[derive(Debug, Clone, PartialEq)]
pub enum TransductionFailure {
    /// The grammar has no reading for this digit string (e.g. "1001")
    NoAcceptingPath,
    /// Composition could not be completed
    Composition(FstError),
    /// The best path could not be decoded into text
    Undecodable,
    /// The best path produced no output
    EmptyOutput,
}

impl fmt::Display for TransductionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransductionFailure::NoAcceptingPath => write!(f, "no accepting path"),
            TransductionFailure::Composition(e) => write!(f, "composition failed: {}", e),
            TransductionFailure::Undecodable => write!(f, "output path is not decodable"),
            TransductionFailure::EmptyOutput => write!(f, "output is empty"),
        }
    }
}

/// Reads digit strings through a cardinal grammar.
#[derive(Debug, Clone)]
pub struct NumberTransducer {
    grammar: CardinalGrammar,
    max_compose_states: usize,
}

impl NumberTransducer {
    pub fn new(grammar: CardinalGrammar) -> Self {
        Self {
            grammar,
            max_compose_states: DEFAULT_MAX_COMPOSE_STATES,
        }
    }

    pub fn with_max_compose_states(mut self, max_compose_states: usize) -> Self {
        self.max_compose_states = max_compose_states;
        self
    }

    pub fn grammar(&self) -> &CardinalGrammar {
        &self.grammar
    }

    /// Compose an acceptor for `digits` with the grammar and decode the
    /// cheapest output.
    pub fn transduce(&self, digits: &str) -> Result<String, TransductionFailure> {
        self.transduce_weighted(digits).map(|(words, _)| words)
    }

    /// Like [`transduce`](Self::transduce), also returning the cost of the
    /// chosen reading.
    pub fn transduce_weighted(
        &self,
        digits: &str,
    ) -> Result<(String, TropicalWeight), TransductionFailure> {
        let acceptor = Fst::acceptor(digits);
        let composed = compose(&acceptor, self.grammar.fst(), self.max_compose_states)
            .map_err(TransductionFailure::Composition)?;

        if composed.is_empty() {
            return Err(TransductionFailure::NoAcceptingPath);
        }

        let path = shortest_path(&composed);
        if path.is_empty() {
            return Err(TransductionFailure::NoAcceptingPath);
        }

        let weight = path_weight(&path).ok_or(TransductionFailure::NoAcceptingPath)?;
        let words = path
            .output_string()
            .ok_or(TransductionFailure::Undecodable)?;
        if words.is_empty() {
            return Err(TransductionFailure::EmptyOutput);
        }

        Ok((words, weight))
    }

    /// Word form of `digits`, or `None` when the grammar cannot read it.
    pub fn apply(&self, digits: &str) -> Option<String> {
        match self.transduce_weighted(digits) {
            Ok((words, weight)) => {
                tracing::trace!(digits, %weight, "Numeral read");
                Some(words)
            }
            Err(failure) => {
                tracing::debug!(
                    digits,
                    grammar = self.grammar.name(),
                    %failure,
                    "Numeral left unmodified"
                );
                None
            }
        }
    }
}
