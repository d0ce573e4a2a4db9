/// Grammar archive: a container of named transducers stored as JSON
///
/// Archives whose file name ends in `.gz` are gzip-compressed. Every
/// transducer is validated on load, so a corrupt archive fails at startup
/// instead of producing an unusable grammar.
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::{CardinalGrammar, GrammarOptions};
use crate::error::{NormalizerError, Result};
use crate::fst::Fst;

pub const ARCHIVE_FORMAT: &str = "cardinal-fst-archive";
pub const ARCHIVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarArchive {
    format: String,
    version: u32,
    /// Options the grammars were compiled with, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    compiled_with: Option<GrammarOptions>,
    transducers: BTreeMap<String, Fst>,
}

impl Default for GrammarArchive {
    fn default() -> Self {
        Self {
            format: ARCHIVE_FORMAT.to_string(),
            version: ARCHIVE_VERSION,
            compiled_with: None,
            transducers: BTreeMap::new(),
        }
    }
}

impl GrammarArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GrammarOptions) -> Self {
        Self {
            compiled_with: Some(options),
            ..Self::default()
        }
    }

    pub fn insert(&mut self, name: &str, fst: Fst) {
        self.transducers.insert(name.to_string(), fst);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.transducers.keys().map(String::as_str)
    }

    pub fn compiled_with(&self) -> Option<&GrammarOptions> {
        self.compiled_with.as_ref()
    }

    /// Take the named transducer out of the archive as a grammar handle.
    pub fn into_grammar(mut self, name: &str) -> Result<CardinalGrammar> {
        let fst = self
            .transducers
            .remove(name)
            .ok_or_else(|| NormalizerError::TransducerNotFound(name.to_string()))?;
        CardinalGrammar::new(name, fst)
    }

    /// Read and validate an archive from disk.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NormalizerError::GrammarNotFound(
                path.display().to_string(),
            ));
        }

        let file = BufReader::new(File::open(path)?);
        if is_gzip(path) {
            Self::from_reader(GzDecoder::new(file))
        } else {
            Self::from_reader(file)
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let archive: GrammarArchive = serde_json::from_reader(reader)?;

        if archive.format != ARCHIVE_FORMAT {
            return Err(NormalizerError::UnsupportedArchive(format!(
                "unknown format '{}'",
                archive.format
            )));
        }
        if archive.version != ARCHIVE_VERSION {
            return Err(NormalizerError::UnsupportedArchive(format!(
                "version {} (expected {})",
                archive.version, ARCHIVE_VERSION
            )));
        }

        for (name, fst) in &archive.transducers {
            fst.validate().map_err(|e| {
                NormalizerError::InvalidGrammar(format!("transducer '{}': {}", name, e))
            })?;
        }

        Ok(archive)
    }

    /// Write the archive, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = BufWriter::new(File::create(path)?);
        if is_gzip(path) {
            let mut encoder = GzEncoder::new(file, Compression::default());
            serde_json::to_writer(&mut encoder, self)?;
            encoder.finish()?.flush()?;
        } else {
            let mut writer = file;
            serde_json::to_writer(&mut writer, self)?;
            writer.flush()?;
        }

        Ok(())
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("gz")
}
