pub mod number_transducer;
pub mod numeral_scanner;
pub mod sentence_normalizer;

pub use number_transducer::{NumberTransducer, TransductionFailure};
pub use numeral_scanner::{NumeralMatch, NumeralScanner};
pub use sentence_normalizer::{
    normalize_sentence, NormalizationOutcome, SentenceNormalizer, Substitution,
};
