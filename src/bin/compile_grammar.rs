use cardinal_normalizer::config::constants::{DEFAULT_ARCHIVE_FILE, DEFAULT_GRAMMAR_NAME};
use cardinal_normalizer::grammar::{
    archive::GrammarArchive, english, CardinalGrammar, GrammarOptions, HundredsStyle, LeadingZeros,
};
use cardinal_normalizer::text_processing::SentenceNormalizer;
use std::path::PathBuf;

const SAMPLE_TEXT: &str = "We started with 509 items and lost 07 in the process.";

fn print_usage() {
    println!("USAGE:");
    println!("    compile_grammar [OPTIONS] [OUTPUT]");
    println!();
    println!("Writes the English cardinal grammar to OUTPUT");
    println!("(default: grammars/{}). A .gz suffix compresses it.", DEFAULT_ARCHIVE_FILE);
    println!();
    println!("OPTIONS:");
    println!("    --american                Prefer \"five hundred nine\"");
    println!("    --british                 Prefer \"five hundred and nine\" (default)");
    println!("    --reject-leading-zeros    Leave numerals such as \"07\" unchanged");
    println!("    --name <NAME>             Transducer key (default: {})", DEFAULT_GRAMMAR_NAME);
    println!("    -h, --help                Print this help message");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut options = GrammarOptions::default();
    let mut name = DEFAULT_GRAMMAR_NAME.to_string();
    let mut output = PathBuf::from("grammars").join(DEFAULT_ARCHIVE_FILE);

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            "--american" => options.style = HundredsStyle::American,
            "--british" => options.style = HundredsStyle::British,
            "--reject-leading-zeros" => options.leading_zeros = LeadingZeros::Reject,
            "--name" => name = args.next().ok_or("--name requires a value")?,
            flag if flag.starts_with("--") => {
                return Err(format!("Unknown option: {}", flag).into());
            }
            _ => output = PathBuf::from(arg),
        }
    }

    println!("Compiling English cardinal grammar...");
    println!("  Leading zeros: {:?}", options.leading_zeros);
    println!("  Hundreds style: {:?}", options.style);

    let fst = english::compile(&options);
    println!(
        "  {} states, {} transitions",
        fst.num_states(),
        fst.num_transitions()
    );

    let mut archive = GrammarArchive::with_options(options);
    archive.insert(&name, fst);
    archive.save(&output)?;

    // Read it back the way the normalizer will
    let grammar = CardinalGrammar::load(&output, &name)?;
    let size = std::fs::metadata(&output)?.len();
    println!("\n✓ Wrote '{}' to {} ({} KB)", name, output.display(), size / 1024);

    let normalizer = SentenceNormalizer::new(grammar);
    println!("\nSample:");
    println!("  Input:  {}", SAMPLE_TEXT);
    println!("  Output: {}", normalizer.normalize(SAMPLE_TEXT));

    Ok(())
}
