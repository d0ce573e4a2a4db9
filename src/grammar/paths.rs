use std::env;
use std::path::PathBuf;

use crate::config::constants::DEFAULT_ARCHIVE_FILE;

/// Directories searched for grammar archives, highest priority first.
pub fn grammar_search_paths() -> Vec<PathBuf> {
    let search_paths = vec![
        // 1. Environment variable (highest priority)
        env::var("CARDINAL_GRAMMAR_DIR").ok().map(PathBuf::from),
        // 2. System-wide installation paths
        Some(PathBuf::from("/usr/local/share/cardinal-normalizer/grammars")),
        Some(PathBuf::from("/opt/cardinal-normalizer/grammars")),
        // 3. User home directory
        dirs::home_dir().map(|h| h.join(".cardinal-normalizer/grammars")),
        // 4. Current directory (for local development)
        Some(PathBuf::from("grammars")),
        // 5. Relative to executable (for dev builds in target/release/)
        env::current_exe()
            .ok()
            .and_then(|path| path.parent().map(|p| p.join("../../grammars"))),
    ];

    search_paths.into_iter().flatten().collect()
}

/// Find a grammar file in the search paths.
///
/// Falls back to `grammars/<filename>` even if it does not exist, so the
/// loader reports a not-found error naming a concrete path.
pub fn find_grammar_file(filename: &str) -> PathBuf {
    for base_path in grammar_search_paths() {
        let candidate = base_path.join(filename);
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from("grammars").join(filename)
}

pub fn get_archive_path() -> PathBuf {
    find_grammar_file(DEFAULT_ARCHIVE_FILE)
}
