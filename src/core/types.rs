// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stable identifier for a vocabulary entry.
pub type EntryId = u32;

/// One source-language/target-language word pair.
/// Entries are loaded once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub id: EntryId,
    /// The term in the source language (English in the bundled deck).
    #[serde(rename = "source", alias = "english")]
    pub source_text: String,
    /// Its translation (Bahasa Indonesia in the bundled deck).
    #[serde(rename = "target", alias = "indonesian")]
    pub target_text: String,
}

impl WordEntry {
    pub fn new(id: EntryId, source_text: impl Into<String>, target_text: impl Into<String>) -> Self {
        Self {
            id,
            source_text: source_text.into(),
            target_text: target_text.into(),
        }
    }
}

impl AsRef<WordEntry> for WordEntry {
    fn as_ref(&self) -> &WordEntry {
        self
    }
}

/// How the filtered entries are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderMode {
    #[default]
    #[serde(alias = "alpha")]
    Alphabetical,
    #[serde(alias = "shuffle")]
    Randomized,
}

impl OrderMode {
    pub fn toggled(self) -> Self {
        match self {
            OrderMode::Alphabetical => OrderMode::Randomized,
            OrderMode::Randomized => OrderMode::Alphabetical,
        }
    }

    /// Short label used by the front-ends.
    pub fn label(self) -> &'static str {
        match self {
            OrderMode::Alphabetical => "A → Z",
            OrderMode::Randomized => "Shuffle",
        }
    }
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderMode::Alphabetical => f.write_str("alphabetical"),
            OrderMode::Randomized => f.write_str("randomized"),
        }
    }
}

impl FromStr for OrderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alpha" | "alphabetical" | "az" => Ok(OrderMode::Alphabetical),
            "shuffle" | "random" | "randomized" => Ok(OrderMode::Randomized),
            other => Err(format!("unknown ordering mode '{}'", other)),
        }
    }
}

/// Which half of an entry a request refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "source" | "english" | "en" => Ok(Side::Source),
            "target" | "indonesian" | "id" => Ok(Side::Target),
            other => Err(format!("unknown side '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_english_indonesian_shape() {
        let entry: WordEntry =
            serde_json::from_str(r#"{"id": 7, "english": "learn", "indonesian": "belajar"}"#).unwrap();
        assert_eq!(entry, WordEntry::new(7, "learn", "belajar"));
    }

    #[test]
    fn serializes_with_neutral_field_names() {
        let json = serde_json::to_string(&WordEntry::new(1, "a", "b")).unwrap();
        assert_eq!(json, r#"{"id":1,"source":"a","target":"b"}"#);
    }

    #[test]
    fn order_mode_parses_aliases() {
        assert_eq!("alpha".parse::<OrderMode>(), Ok(OrderMode::Alphabetical));
        assert_eq!("Shuffle".parse::<OrderMode>(), Ok(OrderMode::Randomized));
        assert!("sideways".parse::<OrderMode>().is_err());
        assert_eq!(OrderMode::Alphabetical.toggled(), OrderMode::Randomized);
    }
}
