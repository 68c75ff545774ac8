// File: src/deck.rs
use crate::core::types::WordEntry;
use crate::error::DeckError;
use log::info;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// The vocabulary shipped with the binary.
const BUILTIN_VOCABULARY: &str = include_str!("../data/vocabulary.json");

/// The fixed, read-only word collection. Cloning shares the same entries.
#[derive(Debug, Clone)]
pub struct Deck {
    entries: Arc<[WordEntry]>,
}

impl Deck {
    /// Builds a deck, rejecting duplicate ids.
    pub fn from_entries(entries: Vec<WordEntry>) -> Result<Self, DeckError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id) {
                return Err(DeckError::DuplicateId(entry.id));
            }
        }
        Ok(Self { entries: entries.into() })
    }

    pub fn builtin() -> Result<Self, DeckError> {
        let entries: Vec<WordEntry> = serde_json::from_str(BUILTIN_VOCABULARY)?;
        Self::from_entries(entries)
    }

    /// Loads a `.json` or `.bin` deck depending on the file extension.
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let format = DeckFormat::from_path(path)?;
        let reader = BufReader::new(File::open(path)?);
        let entries: Vec<WordEntry> = match format {
            DeckFormat::Json => serde_json::from_reader(reader)?,
            DeckFormat::Binary => bincode::deserialize_from(reader)?,
        };
        info!("loaded {} entries from {}", entries.len(), path.display());
        Self::from_entries(entries)
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the deck in its compact binary form, atomically.
    pub fn compile_to(&self, path: &Path) -> Result<(), DeckError> {
        let parent_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        let mut writer = BufWriter::new(&temp_file);
        bincode::serialize_into(&mut writer, self.entries())?;
        writer.flush()?;
        drop(writer);
        temp_file.persist(path)?;
        info!("compiled {} entries to {}", self.len(), path.display());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeckFormat {
    Json,
    Binary,
}

impl DeckFormat {
    fn from_path(path: &Path) -> Result<Self, DeckError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(DeckFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("bin") => Ok(DeckFormat::Binary),
            _ => Err(DeckError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}
