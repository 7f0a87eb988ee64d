use crate::error::{Result, TypoError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// User changes layered over a base dictionary, stored as JSON per language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalWords {
    /// Words accepted in addition to the base dictionary
    #[serde(default)]
    pub added: BTreeSet<String>,
    /// Base dictionary words the user wants reported anyway
    #[serde(default)]
    pub removed: BTreeSet<String>,
    /// Preferred correction per misspelling
    #[serde(default)]
    pub replacements: BTreeMap<String, String>,
}

impl PersonalWords {
    /// Load from `path`; a missing file is an empty list.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            TypoError::dictionary(format!(
                "Failed to read personal dictionary {}: {}",
                path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(&content).map_err(|e| {
            TypoError::dictionary(format!(
                "Failed to parse personal dictionary {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TypoError::dictionary(format!(
                    "Failed to create personal dictionary directory: {}",
                    e
                ))
            })?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| TypoError::dictionary(e.to_string()))?;

        fs::write(path, json).map_err(|e| {
            TypoError::dictionary(format!(
                "Failed to write personal dictionary {}: {}",
                path.display(),
                e
            ))
        })
    }
}
