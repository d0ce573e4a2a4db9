/// Sentence-level cardinal normalization
///
/// Every numeral found by [`NumeralScanner`] is either replaced by its word
/// form or left exactly as written; text between numerals is copied through
/// byte for byte.
use serde::Serialize;

use super::number_transducer::NumberTransducer;
use super::numeral_scanner::{NumeralMatch, NumeralScanner};
use crate::grammar::CardinalGrammar;

/// What happened to one numeral. `start..end` is a byte range of the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub start: usize,
    pub end: usize,
    pub original: String,
    /// Word form, or `None` when the digits were preserved
    pub replacement: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationOutcome {
    pub normalized: String,
    pub substitutions: Vec<Substitution>,
}

impl NormalizationOutcome {
    pub fn replaced_count(&self) -> usize {
        self.substitutions
            .iter()
            .filter(|s| s.replacement.is_some())
            .count()
    }

    pub fn preserved_count(&self) -> usize {
        self.substitutions.len() - self.replaced_count()
    }
}

#[derive(Debug, Clone)]
pub struct SentenceNormalizer {
    transducer: NumberTransducer,
}

impl SentenceNormalizer {
    pub fn new(grammar: CardinalGrammar) -> Self {
        Self::with_transducer(NumberTransducer::new(grammar))
    }

    pub fn with_transducer(transducer: NumberTransducer) -> Self {
        Self { transducer }
    }

    pub fn transducer(&self) -> &NumberTransducer {
        &self.transducer
    }

    /// Replace each readable numeral in `text` with its word form.
    pub fn normalize(&self, text: &str) -> String {
        self.rewrite(text, |_, _| {})
    }

    /// Like [`normalize`](Self::normalize), also reporting every numeral seen.
    pub fn normalize_detailed(&self, text: &str) -> NormalizationOutcome {
        let mut substitutions = Vec::new();
        let normalized = self.rewrite(text, |numeral, replacement| {
            substitutions.push(Substitution {
                start: numeral.start,
                end: numeral.end,
                original: numeral.digits.to_string(),
                replacement: replacement.map(str::to_string),
            });
        });

        NormalizationOutcome {
            normalized,
            substitutions,
        }
    }

    fn rewrite<F>(&self, text: &str, mut on_numeral: F) -> String
    where
        F: FnMut(&NumeralMatch<'_>, Option<&str>),
    {
        let matches = NumeralScanner::scan(text);
        if matches.is_empty() {
            return text.to_string();
        }

        let mut output = String::with_capacity(text.len() * 2);
        let mut cursor = 0;

        for numeral in &matches {
            output.push_str(&text[cursor..numeral.start]);

            let words = self.transducer.apply(numeral.digits);
            match words.as_deref() {
                Some(words) => output.push_str(words),
                None => output.push_str(numeral.digits),
            }
            on_numeral(numeral, words.as_deref());

            cursor = numeral.end;
        }

        output.push_str(&text[cursor..]);
        output
    }
}

/// Normalize `text` with a one-off normalizer over `grammar`.
pub fn normalize_sentence(text: &str, grammar: &CardinalGrammar) -> String {
    SentenceNormalizer::new(grammar.clone()).normalize(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fst::Fst;
    use crate::grammar::{GrammarOptions, LeadingZeros};

    fn english() -> SentenceNormalizer {
        SentenceNormalizer::new(CardinalGrammar::english(&GrammarOptions::default()))
    }

    #[test]
    fn test_compound_tens_and_unit() {
        assert_eq!(
            english().normalize("I have 3 dogs and 21 cats."),
            "I have three dogs and twenty-one cats."
        );
    }

    #[test]
    fn test_exact_hundred_and_maximum() {
        assert_eq!(
            english().normalize("The total cost was 400 dollars, reaching 1000 at the end."),
            "The total cost was four hundred dollars, reaching one thousand at the end."
        );
    }

    #[test]
    fn test_out_of_range_preserved() {
        assert_eq!(
            english().normalize("We received 1001 boxes, but only 999 were counted."),
            "We received 1001 boxes, but only nine hundred and ninety-nine were counted."
        );
    }

    #[test]
    fn test_leading_zero_follows_grammar() {
        let text = "We started with 509 items and lost 07 in the process.";
        assert_eq!(
            english().normalize(text),
            "We started with five hundred and nine items and lost seven in the process."
        );

        let strict = SentenceNormalizer::new(CardinalGrammar::english(&GrammarOptions {
            leading_zeros: LeadingZeros::Reject,
            ..GrammarOptions::default()
        }));
        assert_eq!(
            strict.normalize(text),
            "We started with five hundred and nine items and lost 07 in the process."
        );
    }

    #[test]
    fn test_text_without_numerals_unchanged() {
        let text = "Nothing to see here, move along!";
        assert_eq!(english().normalize(text), text);
        assert_eq!(english().normalize(""), "");
    }

    #[test]
    fn test_long_digit_runs_untouched() {
        let text = "Call 5551234 or 12345.";
        assert_eq!(english().normalize(text), text);
    }

    #[test]
    fn test_detailed_outcome_reports_every_numeral() {
        let outcome = english().normalize_detailed("Take 2, not 2000.");
        assert_eq!(outcome.normalized, "Take two, not 2000.");
        assert_eq!(
            outcome.substitutions,
            vec![
                Substitution {
                    start: 5,
                    end: 6,
                    original: "2".to_string(),
                    replacement: Some("two".to_string()),
                },
                Substitution {
                    start: 12,
                    end: 16,
                    original: "2000".to_string(),
                    replacement: None,
                },
            ]
        );
        assert_eq!(outcome.replaced_count(), 1);
        assert_eq!(outcome.preserved_count(), 1);
    }

    #[test]
    fn test_mock_grammar_only_replaces_known_digits() {
        let grammar = CardinalGrammar::new("mock", Fst::string_map([("7", "SEVEN")])).unwrap();
        assert_eq!(
            normalize_sentence("7 and 8 and 7.", &grammar),
            "SEVEN and 8 and SEVEN."
        );
    }

    #[test]
    fn test_adjacent_numerals() {
        assert_eq!(english().normalize("1 2 3"), "one two three");
        assert_eq!(english().normalize("10/20"), "ten/twenty");
    }
}
