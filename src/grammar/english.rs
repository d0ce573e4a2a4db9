/// English cardinal grammar for the integers 0 to 1000
///
/// The grammar is assembled from small string maps with the FST operations
/// in `crate::fst`. Both hundreds separators (" " and " and ") are compiled
/// in; the non-preferred one carries `ALTERNATIVE_STYLE_COST`, so the reading
/// is chosen by shortest-path search rather than by grammar structure.
use super::{GrammarOptions, HundredsStyle, LeadingZeros};
use crate::fst::{Fst, TropicalWeight};

/// Extra cost of the separator the options do not prefer.
pub const ALTERNATIVE_STYLE_COST: f32 = 1.0;

const UNITS: [(&str, &str); 9] = [
    ("1", "one"),
    ("2", "two"),
    ("3", "three"),
    ("4", "four"),
    ("5", "five"),
    ("6", "six"),
    ("7", "seven"),
    ("8", "eight"),
    ("9", "nine"),
];

const TEENS: [(&str, &str); 10] = [
    ("10", "ten"),
    ("11", "eleven"),
    ("12", "twelve"),
    ("13", "thirteen"),
    ("14", "fourteen"),
    ("15", "fifteen"),
    ("16", "sixteen"),
    ("17", "seventeen"),
    ("18", "eighteen"),
    ("19", "nineteen"),
];

const TENS: [(&str, &str); 8] = [
    ("2", "twenty"),
    ("3", "thirty"),
    ("4", "forty"),
    ("5", "fifty"),
    ("6", "sixty"),
    ("7", "seventy"),
    ("8", "eighty"),
    ("9", "ninety"),
];

pub fn compile(options: &GrammarOptions) -> Fst {
    let one = TropicalWeight::one();

    let units = Fst::string_map(UNITS);
    let delete_zero = Fst::cross("0", "", one);

    // 20-99: "twenty", "twenty-one", ...
    let tens = Fst::string_map(TENS)
        .concat(&delete_zero.union(&Fst::cross("", "-", one).concat(&units)));

    // 10-99 without a leading zero
    let two_digits = Fst::string_map(TEENS).union(&tens);

    let (plain_cost, and_cost) = match options.style {
        HundredsStyle::American => (0.0, ALTERNATIVE_STYLE_COST),
        HundredsStyle::British => (ALTERNATIVE_STYLE_COST, 0.0),
    };
    let separator = Fst::cross("", " ", TropicalWeight(plain_cost))
        .union(&Fst::cross("", " and ", TropicalWeight(and_cost)));

    // 100-999: the two trailing digits are "00", "0d" or a two-digit value
    let remainder = Fst::cross("00", "", one)
        .union(&delete_zero.concat(&separator).concat(&units))
        .union(&separator.concat(&two_digits));
    let hundreds = units
        .concat(&Fst::cross("", " hundred", one))
        .concat(&remainder);

    let canonical = Fst::cross("0", "zero", one)
        .union(&units)
        .union(&two_digits)
        .union(&hundreds)
        .union(&Fst::cross("1000", "one thousand", one));

    let grammar = match options.leading_zeros {
        LeadingZeros::Strip => delete_zero.closure().concat(&canonical),
        LeadingZeros::Reject => canonical,
    };

    grammar.connect()
}
