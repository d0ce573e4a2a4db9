use std::env;
use std::fs;
use std::path::PathBuf;

/// Get the log directory
///
/// Resolution order:
/// 1. Custom directory from parameter (if provided)
/// 2. CARDINAL_LOG_DIR environment variable
/// 3. Per-user data directory
/// 4. Temp directory as last resort
pub fn get_log_directory(custom_dir: Option<&str>) -> Result<PathBuf, std::io::Error> {
    if let Some(dir) = custom_dir {
        return ensure_directory_exists(PathBuf::from(dir));
    }

    if let Ok(dir) = env::var("CARDINAL_LOG_DIR") {
        return ensure_directory_exists(PathBuf::from(dir));
    }

    if let Some(data_dir) = dirs::data_local_dir() {
        let path = data_dir.join("cardinal-normalizer").join("logs");
        if let Ok(path) = ensure_directory_exists(path) {
            return Ok(path);
        }
    }

    ensure_directory_exists(env::temp_dir().join("cardinal-normalizer").join("logs"))
}

fn ensure_directory_exists(path: PathBuf) -> Result<PathBuf, std::io::Error> {
    if !path.exists() {
        fs::create_dir_all(&path)?;
    }
    Ok(path)
}
