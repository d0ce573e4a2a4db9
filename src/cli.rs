/// CLI argument parsing and help text
use cardinal_normalizer::grammar::{GrammarOptions, HundredsStyle, LeadingZeros};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;

pub const DEMO_HEADER: &str = "--- Final Text Normalization System (0-1000) ---";

/// Sentences printed by `--demo`
pub const DEMO_SENTENCES: [&str; 4] = [
    "I have 3 dogs and 21 cats.",
    "The total cost was 400 dollars, reaching 1000 at the end.",
    "We started with 509 items and lost 07 in the process.",
    "We received 1001 boxes, but only 999 were counted.",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub help: bool,
    pub version: bool,
    pub demo: bool,
    pub server: bool,
    pub port: u16,
    pub grammar_path: Option<PathBuf>,
    pub builtin_grammar: bool,
    /// Compile options for `--builtin-grammar`
    pub grammar_options: GrammarOptions,
    /// Positional words, joined with spaces to form the input text
    pub text: Vec<String>,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            help: false,
            version: false,
            demo: false,
            server: false,
            port: DEFAULT_PORT,
            grammar_path: None,
            builtin_grammar: false,
            grammar_options: GrammarOptions::default(),
            text: Vec::new(),
        }
    }
}

impl CliArgs {
    /// Input text given on the command line, if any
    pub fn input_text(&self) -> Option<String> {
        if self.text.is_empty() {
            None
        } else {
            Some(self.text.join(" "))
        }
    }
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();
    let mut grammar_option_flag = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "-v" | "--version" => parsed.version = true,
            "--demo" => parsed.demo = true,
            "--server" => parsed.server = true,
            "--builtin-grammar" => parsed.builtin_grammar = true,
            "--american" => {
                parsed.grammar_options.style = HundredsStyle::American;
                grammar_option_flag = Some(arg);
            }
            "--british" => {
                parsed.grammar_options.style = HundredsStyle::British;
                grammar_option_flag = Some(arg);
            }
            "--reject-leading-zeros" => {
                parsed.grammar_options.leading_zeros = LeadingZeros::Reject;
                grammar_option_flag = Some(arg);
            }
            "--port" => {
                let value = args.next().ok_or("--port requires a value")?;
                parsed.port = value
                    .parse::<u16>()
                    .map_err(|_| format!("Invalid port: {}", value))?;
            }
            "--grammar" => {
                let value = args.next().ok_or("--grammar requires a path")?;
                parsed.grammar_path = Some(PathBuf::from(value));
            }
            // Everything after "--" is text, even if it looks like a flag
            "--" => parsed.text.extend(args.by_ref()),
            flag if flag.starts_with("--") => return Err(format!("Unknown option: {}", flag)),
            _ => parsed.text.push(arg),
        }
    }

    if parsed.builtin_grammar && parsed.grammar_path.is_some() {
        return Err("--grammar and --builtin-grammar cannot be used together".to_string());
    }

    // A loaded archive was compiled with its own options
    if let Some(flag) = grammar_option_flag {
        if !parsed.builtin_grammar {
            return Err(format!("{} requires --builtin-grammar", flag));
        }
    }

    Ok(parsed)
}

pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!("Cardinal Normalizer v{}", version);
    println!("Rewrites cardinal numerals (0-1000) in English text as words");
    println!();
    println!("USAGE:");
    println!("    cardinal_normalizer [OPTIONS] [TEXT]");
    println!();
    println!("OPTIONS:");
    println!("    --demo                Normalize the built-in demonstration sentences");
    println!("    --grammar <PATH>      Grammar archive to load (.json or .json.gz)");
    println!("    --builtin-grammar     Compile the English grammar in process");
    println!("    --american            With --builtin-grammar: \"five hundred nine\"");
    println!("    --british             With --builtin-grammar: \"five hundred and nine\" (default)");
    println!("    --reject-leading-zeros");
    println!("                          With --builtin-grammar: leave \"07\" unchanged");
    println!("    --server              Start HTTP server mode");
    println!("    --port <PORT>         Server port (default: {})", DEFAULT_PORT);
    println!("    -h, --help            Print this help message");
    println!("    -v, --version         Print version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Normalize one sentence");
    println!("    cardinal_normalizer \"I have 3 dogs and 21 cats.\"");
    println!();
    println!("    # Normalize a file line by line");
    println!("    cardinal_normalizer < input.txt");
    println!();
    println!("    # Build a grammar archive, then serve it on port 8080");
    println!("    compile_grammar grammars/cardinal_normalization.far.json");
    println!("    cardinal_normalizer --server --port 8080");
    println!();
    println!("SERVER ENDPOINTS:");
    println!("    POST   /normalize    - Normalize numerals in text");
    println!("    GET    /grammar      - Loaded grammar summary");
    println!("    GET    /health       - Health check");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    CARDINAL_GRAMMAR_PATH            - Grammar archive path");
    println!("    CARDINAL_GRAMMAR_DIR             - Extra directory searched for archives");
    println!("    CARDINAL_GRAMMAR_NAME            - Transducer key inside the archive");
    println!("    CARDINAL_MAX_COMPOSE_STATES      - Composition state budget (default: 4096)");
    println!("    REQUEST_TIMEOUT_SECONDS          - Request timeout in seconds (default: 30)");
    println!("    CARDINAL_LOG_DIR                 - Write JSON log files to this directory");
    println!("    LOG_FORMAT                       - Console log format (compact/pretty/json)");
    println!("    RUST_LOG                         - Log level (error/warn/info/debug/trace)");
    println!();
    println!("CONFIGURATION:");
    println!("    Settings can also be placed in a .env file in the working directory");
}

pub fn print_version() {
    println!("Cardinal Normalizer v{}", env!("CARGO_PKG_VERSION"));
}
