/// Maximum allowed text length for normalization requests (in characters)
///
/// Requests exceeding this limit are rejected with an error.
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Longest digit run treated as a numeral; longer runs are left as text.
pub const MAX_NUMERAL_DIGITS: usize = 4;

/// Key of the cardinal transducer inside a grammar archive
pub const DEFAULT_GRAMMAR_NAME: &str = "cardinal_0_to_1000";

/// File name searched for when no archive path is configured
pub const DEFAULT_ARCHIVE_FILE: &str = "cardinal_normalization.far.json";

/// Upper bound on states built while composing a numeral with the grammar
pub const DEFAULT_MAX_COMPOSE_STATES: usize = 4096;

/// Default HTTP request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
