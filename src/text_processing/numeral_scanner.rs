/// Lexical scanner locating cardinal numerals in free text
///
/// A numeral is a run of 1 to `MAX_NUMERAL_DIGITS` ASCII digits standing as a
/// whole word: the characters on either side are not word characters
/// (Unicode alphanumerics or `_`), or are the ends of the text. Longer runs
/// and digits glued to letters are not numerals and produce no match.
use crate::config::constants::MAX_NUMERAL_DIGITS;

/// A located numeral. `start..end` is a byte range into the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumeralMatch<'a> {
    pub start: usize,
    pub end: usize,
    pub digits: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Digit,
    Word,
    Boundary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Last character was a boundary, or nothing has been read yet
    Boundary,
    /// Inside a word made only of ASCII digits so far
    Numeral { start: usize, digits: usize },
    /// Inside a word that can no longer be a numeral
    Word,
}

pub struct NumeralScanner;

impl NumeralScanner {
    /// Return every numeral in `text`, left to right, non-overlapping.
    pub fn scan(text: &str) -> Vec<NumeralMatch<'_>> {
        let mut matches = Vec::new();
        let mut state = ScanState::Boundary;

        for (idx, ch) in text.char_indices() {
            state = match (state, Self::classify_char(ch)) {
                (ScanState::Numeral { start, digits }, CharClass::Digit) => ScanState::Numeral {
                    start,
                    digits: digits + 1,
                },
                (ScanState::Numeral { start, digits }, CharClass::Boundary) => {
                    Self::push_numeral(text, start, idx, digits, &mut matches);
                    ScanState::Boundary
                }
                (ScanState::Numeral { .. }, CharClass::Word) => ScanState::Word,
                (ScanState::Boundary, CharClass::Digit) => ScanState::Numeral {
                    start: idx,
                    digits: 1,
                },
                (ScanState::Boundary, CharClass::Word) => ScanState::Word,
                (ScanState::Word, CharClass::Digit | CharClass::Word) => ScanState::Word,
                (_, CharClass::Boundary) => ScanState::Boundary,
            };
        }

        if let ScanState::Numeral { start, digits } = state {
            Self::push_numeral(text, start, text.len(), digits, &mut matches);
        }

        matches
    }

    fn push_numeral<'a>(
        text: &'a str,
        start: usize,
        end: usize,
        digits: usize,
        matches: &mut Vec<NumeralMatch<'a>>,
    ) {
        if digits <= MAX_NUMERAL_DIGITS {
            matches.push(NumeralMatch {
                start,
                end,
                digits: &text[start..end],
            });
        }
    }

    fn classify_char(ch: char) -> CharClass {
        if ch.is_ascii_digit() {
            CharClass::Digit
        } else if ch.is_alphanumeric() || ch == '_' {
            CharClass::Word
        } else {
            CharClass::Boundary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits_of(text: &str) -> Vec<&str> {
        NumeralScanner::scan(text).iter().map(|m| m.digits).collect()
    }

    #[test]
    fn test_scan_sentence() {
        let matches = NumeralScanner::scan("I have 3 dogs and 21 cats.");
        assert_eq!(
            matches,
            vec![
                NumeralMatch {
                    start: 7,
                    end: 8,
                    digits: "3"
                },
                NumeralMatch {
                    start: 18,
                    end: 20,
                    digits: "21"
                },
            ]
        );
    }

    #[test]
    fn test_scan_whole_text_numeral() {
        let matches = NumeralScanner::scan("1000");
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].start, matches[0].end), (0, 4));
    }

    #[test]
    fn test_five_digit_runs_are_skipped() {
        assert!(digits_of("12345").is_empty());
        assert_eq!(digits_of("12345 and 678"), vec!["678"]);
    }

    #[test]
    fn test_digits_glued_to_letters_are_skipped() {
        assert!(digits_of("abc123").is_empty());
        assert!(digits_of("123abc").is_empty());
        assert!(digits_of("12th").is_empty());
        assert!(digits_of("a1b2").is_empty());
    }

    #[test]
    fn test_underscore_is_a_word_character() {
        assert!(digits_of("_7").is_empty());
        assert!(digits_of("7_").is_empty());
        assert!(digits_of("var_12").is_empty());
    }

    #[test]
    fn test_punctuation_is_a_boundary() {
        assert_eq!(digits_of("3.14"), vec!["3", "14"]);
        assert_eq!(digits_of("1,000"), vec!["1", "000"]);
        assert_eq!(digits_of("(42)"), vec!["42"]);
        assert_eq!(digits_of("-5"), vec!["5"]);
        assert_eq!(digits_of("10-20"), vec!["10", "20"]);
    }

    #[test]
    fn test_leading_zeros_kept_literal() {
        assert_eq!(digits_of("lost 07 items"), vec!["07"]);
        assert_eq!(digits_of("0000"), vec!["0000"]);
    }

    #[test]
    fn test_unicode_neighbours() {
        // 'é' is a letter, so "é12" is one word.
        assert!(digits_of("é12").is_empty());
        // Byte offsets account for multi-byte characters before the match.
        let matches = NumeralScanner::scan("café 12");
        assert_eq!(matches[0].start, 6);
        assert_eq!(matches[0].digits, "12");
        // Non-ASCII digits are word characters, not numerals.
        assert!(digits_of("\u{0661}\u{0662}").is_empty());
        assert_eq!(digits_of("\u{201C}7\u{201D}"), vec!["7"]);
    }

    #[test]
    fn test_no_digits() {
        assert!(digits_of("").is_empty());
        assert!(digits_of("no numbers here").is_empty());
    }

    #[test]
    fn test_matches_are_ordered_and_disjoint() {
        let matches = NumeralScanner::scan("1 22 333 4444 55555 6");
        assert_eq!(
            matches.iter().map(|m| m.digits).collect::<Vec<_>>(),
            vec!["1", "22", "333", "4444", "6"]
        );
        for pair in matches.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }
}
