use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One reported typo.
///
/// Serializes as a bare string when suggestions were not requested, and as a
/// single-key map `{word: [suggestions]}` when they were.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypoEntry {
    pub word: String,
    pub suggestions: Option<Vec<String>>,
}

impl TypoEntry {
    pub fn bare(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            suggestions: None,
        }
    }

    pub fn with_suggestions(word: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            word: word.into(),
            suggestions: Some(suggestions),
        }
    }

    pub fn best_suggestion(&self) -> Option<&str> {
        self.suggestions
            .as_ref()
            .and_then(|s| s.first())
            .map(String::as_str)
    }
}

impl Serialize for TypoEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.suggestions {
            None => serializer.serialize_str(&self.word),
            Some(suggestions) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(&self.word, suggestions)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for TypoEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bare(String),
            WithSuggestions(BTreeMap<String, Vec<String>>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Bare(word) => Ok(TypoEntry::bare(word)),
            Repr::WithSuggestions(map) => {
                if map.len() != 1 {
                    return Err(de::Error::invalid_length(
                        map.len(),
                        &"a single word mapped to its suggestions",
                    ));
                }
                let (word, suggestions) = map.into_iter().next().ok_or_else(|| {
                    de::Error::custom("empty typo entry")
                })?;
                Ok(TypoEntry::with_suggestions(word, suggestions))
            }
        }
    }
}

/// Typos per file, in first-seen order within each file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypoRecord {
    files: BTreeMap<PathBuf, Vec<TypoEntry>>,
}

impl TypoRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the typos of one file; files without typos are left out.
    pub fn insert(&mut self, path: PathBuf, entries: Vec<TypoEntry>) {
        if !entries.is_empty() {
            self.files.insert(path, entries);
        }
    }

    pub fn get(&self, path: &Path) -> Option<&[TypoEntry]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[TypoEntry])> {
        self.files
            .iter()
            .map(|(path, entries)| (path.as_path(), entries.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of files with typos
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn typo_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    /// Distinct typos across all files, sorted case-insensitively.
    pub fn typo_list(&self) -> Vec<String> {
        let mut words: Vec<String> = self
            .files
            .values()
            .flatten()
            .map(|entry| entry.word.clone())
            .collect();
        words.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
        words.dedup();
        words
    }
}

/// A file the scan could not read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub record: TypoRecord,
    pub skipped: Vec<SkippedFile>,
    pub files_scanned: usize,
}

impl ScanReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// A correction written back to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedFix {
    pub path: PathBuf,
    pub typo: String,
    pub replacement: String,
    pub occurrences: usize,
}
