//! Cardinal grammar resource: compilation, packaging and the shared handle
pub mod archive;
pub mod english;
pub mod paths;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::error::{NormalizerError, Result};
use crate::fst::Fst;

pub use archive::GrammarArchive;

/// How digit strings with leading zeros ("07", "007") are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadingZeros {
    /// Delete leading zeros before reading the value: "007" reads as "seven".
    #[default]
    Strip,
    /// Only canonical digit strings are accepted: "07" has no reading.
    Reject,
}

/// Preferred reading of the hundreds boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HundredsStyle {
    /// "five hundred nine"
    American,
    /// "five hundred and nine"
    #[default]
    British,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GrammarOptions {
    pub leading_zeros: LeadingZeros,
    pub style: HundredsStyle,
}

/// Read-only handle to a validated cardinal transducer.
///
/// Cloning is cheap; all clones share one machine. Build it once at startup
/// and hand clones to whatever needs to transduce.
#[derive(Debug, Clone)]
pub struct CardinalGrammar {
    name: Arc<str>,
    fst: Arc<Fst>,
}

impl CardinalGrammar {
    /// Wrap an externally supplied transducer after validating it.
    pub fn new(name: &str, fst: Fst) -> Result<Self> {
        fst.validate()?;
        if fst.is_empty() {
            return Err(NormalizerError::InvalidGrammar(format!(
                "transducer '{}' has no start state",
                name
            )));
        }

        Ok(Self {
            name: Arc::from(name),
            fst: Arc::new(fst),
        })
    }

    /// Compile the built-in English cardinal grammar (0 to 1000).
    pub fn english(options: &GrammarOptions) -> Self {
        Self {
            name: Arc::from(crate::config::constants::DEFAULT_GRAMMAR_NAME),
            fst: Arc::new(english::compile(options)),
        }
    }

    /// Load the named transducer from a grammar archive on disk.
    pub fn load(path: &Path, name: &str) -> Result<Self> {
        let grammar = GrammarArchive::load(path)?.into_grammar(name)?;
        tracing::info!(
            grammar = name,
            path = %path.display(),
            states = grammar.fst.num_states(),
            transitions = grammar.fst.num_transitions(),
            "Cardinal grammar loaded"
        );
        Ok(grammar)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fst(&self) -> &Fst {
        &self.fst
    }
}
