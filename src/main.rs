mod cli;

use cardinal_normalizer::config::NormalizerConfig;
use cardinal_normalizer::error::{NormalizerError, Result};
use cardinal_normalizer::grammar::{paths::get_archive_path, CardinalGrammar};
use cardinal_normalizer::logging::{self, LogConfig};
use cardinal_normalizer::server::{create_router, AppState};
use cardinal_normalizer::text_processing::{NumberTransducer, SentenceNormalizer};
use cli::CliArgs;
use std::env;
use std::io::{self, BufRead, Write};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if it doesn't)
    let _ = dotenvy::dotenv();

    let args = match cli::parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("Run with --help for usage.");
            std::process::exit(2);
        }
    };

    if args.help {
        cli::print_help();
        return Ok(());
    }

    if args.version {
        cli::print_version();
        return Ok(());
    }

    let log_config = LogConfig::from_env();
    // Hold the guard until exit so buffered file logs are flushed
    let _log_guard = match logging::init_logging(&log_config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let config = NormalizerConfig::from_env();
    let grammar = load_grammar(&args, &config)?;

    let transducer =
        NumberTransducer::new(grammar).with_max_compose_states(config.max_compose_states);
    let normalizer = SentenceNormalizer::with_transducer(transducer);

    if args.server {
        logging::log_platform_info();
        run_server(normalizer, &args, &config, &log_config).await
    } else if args.demo {
        write_demo(&normalizer, &mut io::stdout().lock())?;
        Ok(())
    } else if let Some(text) = args.input_text() {
        println!("{}", normalizer.normalize(&text));
        Ok(())
    } else {
        run_batch(&normalizer)
    }
}

/// Resolve the grammar from the command line, then the environment, then
/// the archive search path.
fn load_grammar(args: &CliArgs, config: &NormalizerConfig) -> Result<CardinalGrammar> {
    if args.builtin_grammar {
        tracing::info!(
            leading_zeros = ?args.grammar_options.leading_zeros,
            style = ?args.grammar_options.style,
            "Compiling built-in English cardinal grammar"
        );
        return Ok(CardinalGrammar::english(&args.grammar_options));
    }

    let path = args
        .grammar_path
        .clone()
        .or_else(|| config.grammar_path.clone())
        .unwrap_or_else(get_archive_path);

    CardinalGrammar::load(&path, &config.grammar_name).map_err(|e| {
        if let NormalizerError::GrammarNotFound(_) = e {
            eprintln!("Build an archive with `compile_grammar`, or pass --builtin-grammar.");
        }
        e
    })
}

async fn run_server(
    normalizer: SentenceNormalizer,
    args: &CliArgs,
    config: &NormalizerConfig,
    log_config: &LogConfig,
) -> Result<()> {
    let grammar = normalizer.transducer().grammar();
    println!("Cardinal Normalizer v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "Grammar: {} ({} states, {} transitions)",
        grammar.name(),
        grammar.fst().num_states(),
        grammar.fst().num_transitions()
    );

    let mut state = AppState::new(normalizer);
    state.request_timeout = config.request_timeout;
    state.slow_request_threshold = Duration::from_millis(log_config.slow_request_threshold_ms);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!("\nServer listening on http://{}", addr);
    println!("\nAvailable endpoints:");
    println!("  POST   /normalize    - Normalize numerals in text");
    println!("  GET    /grammar      - Loaded grammar summary");
    println!("  GET    /health       - Health check");
    println!("\nRequest Timeout:");
    if config.request_timeout.is_zero() {
        println!("  Timeout: disabled");
    } else {
        println!("  Timeout: {} seconds", config.request_timeout.as_secs());
    }
    println!("  Configure: REQUEST_TIMEOUT_SECONDS (default: 30)");

    tracing::info!(port = args.port, "HTTP server started");

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}

/// Print the demonstration sentences with their normalized form
fn write_demo<W: Write>(normalizer: &SentenceNormalizer, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", cli::DEMO_HEADER)?;
    for sentence in cli::DEMO_SENTENCES {
        writeln!(out, "Input:  '{}'", sentence)?;
        writeln!(out, "Output: '{}'", normalizer.normalize(sentence))?;
    }
    out.flush()
}

#[derive(Debug, Default, PartialEq, Eq)]
struct BatchSummary {
    lines: usize,
    /// Lines that were not valid UTF-8 and were copied through unchanged
    passed_through: usize,
}

/// Normalize stdin line by line until EOF
fn run_batch(normalizer: &SentenceNormalizer) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let summary = normalize_lines(normalizer, stdin.lock(), &mut out)?;
    out.flush()?;

    tracing::debug!(
        lines = summary.lines,
        passed_through = summary.passed_through,
        "Batch normalization finished"
    );
    Ok(())
}

/// Copy `input` to `output`, normalizing each line.
///
/// Line terminators (`\n` or `\r\n`) are written back exactly as read, and a
/// missing final newline stays missing. A line that is not valid UTF-8 is
/// copied through untouched and the batch continues.
fn normalize_lines<R: BufRead, W: Write>(
    normalizer: &SentenceNormalizer,
    mut input: R,
    output: &mut W,
) -> io::Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        summary.lines += 1;

        let (content, terminator) = split_line_terminator(&buf);
        match std::str::from_utf8(content) {
            Ok(line) => output.write_all(normalizer.normalize(line).as_bytes())?,
            Err(e) => {
                tracing::warn!(
                    line = summary.lines,
                    error = %e,
                    "Line is not valid UTF-8, copied unchanged"
                );
                summary.passed_through += 1;
                output.write_all(content)?;
            }
        }
        output.write_all(terminator)?;
    }

    Ok(summary)
}

fn split_line_terminator(line: &[u8]) -> (&[u8], &[u8]) {
    let content_len = if line.ends_with(b"\r\n") {
        line.len() - 2
    } else if line.ends_with(b"\n") {
        line.len() - 1
    } else {
        line.len()
    };
    line.split_at(content_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardinal_normalizer::grammar::GrammarOptions;

    fn normalizer() -> SentenceNormalizer {
        SentenceNormalizer::new(CardinalGrammar::english(&GrammarOptions::default()))
    }

    fn run_lines(input: &[u8]) -> (Vec<u8>, BatchSummary) {
        let mut output = Vec::new();
        let summary = normalize_lines(&normalizer(), input, &mut output).unwrap();
        (output, summary)
    }

    #[test]
    fn test_batch_keeps_crlf_and_missing_final_newline() {
        let (output, summary) = run_lines(b"a 3\r\nb 7");
        assert_eq!(output, b"a three\r\nb seven");
        assert_eq!(summary.lines, 2);
    }

    #[test]
    fn test_batch_keeps_lf_and_blank_lines() {
        let (output, _) = run_lines(b"I have 3 dogs\n\nand 21 cats\n");
        assert_eq!(output, b"I have three dogs\n\nand twenty-one cats\n");
    }

    #[test]
    fn test_batch_passes_invalid_utf8_through() {
        let (output, summary) = run_lines(b"x 5 \xff\ny 6\n");
        assert_eq!(output, b"x 5 \xff\ny six\n");
        assert_eq!(
            summary,
            BatchSummary {
                lines: 2,
                passed_through: 1,
            }
        );
    }

    #[test]
    fn test_batch_empty_input() {
        let (output, summary) = run_lines(b"");
        assert!(output.is_empty());
        assert_eq!(summary, BatchSummary::default());
    }

    #[test]
    fn test_split_line_terminator() {
        assert_eq!(split_line_terminator(b"ab\r\n"), (&b"ab"[..], &b"\r\n"[..]));
        assert_eq!(split_line_terminator(b"ab\n"), (&b"ab"[..], &b"\n"[..]));
        assert_eq!(split_line_terminator(b"ab"), (&b"ab"[..], &b""[..]));
        assert_eq!(split_line_terminator(b"\r"), (&b"\r"[..], &b""[..]));
    }

    #[test]
    fn test_demo_output() {
        let mut output = Vec::new();
        write_demo(&normalizer(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "--- Final Text Normalization System (0-1000) ---");
        assert_eq!(lines[1], "Input:  'I have 3 dogs and 21 cats.'");
        assert_eq!(lines[2], "Output: 'I have three dogs and twenty-one cats.'");
        assert_eq!(
            lines[6],
            "Output: 'We started with five hundred and nine items and lost seven in the process.'"
        );
        assert_eq!(
            lines[8],
            "Output: 'We received 1001 boxes, but only nine hundred and ninety-nine were counted.'"
        );
    }
}
