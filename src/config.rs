use crate::checker::exclusions::ExclusionSet;
use crate::error::{Result, TypoError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_LANGUAGE: &str = "en_US";
pub const DEFAULT_EXTENSION: &str = "py";
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;
pub const LOCAL_CONFIG_FILE: &str = ".typoscope.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub language: String,
    /// Comment marker; `None` picks one from the extension
    pub marker: Option<String>,
    pub extension: String,
    pub recursive: bool,
    pub suggestions: bool,
    pub max_suggestions: usize,
    pub exclude_words: Vec<String>,
    pub exclude_files: Vec<PathBuf>,
    pub exclude_word_file: Option<PathBuf>,
    pub ignore_patterns: Vec<String>,
    pub data_dir: Option<PathBuf>,
    pub personal_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            marker: None,
            extension: DEFAULT_EXTENSION.to_string(),
            recursive: false,
            suggestions: false,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            exclude_words: Vec::new(),
            exclude_files: Vec::new(),
            exclude_word_file: None,
            ignore_patterns: vec![
                r"https?://\S+".to_string(),         // URLs
                r"\b[a-fA-F0-9]{32,}\b".to_string(), // Hashes
                r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}".to_string(), // Emails
            ],
            data_dir: None,
            personal_dir: None,
        }
    }
}

/// Contents of a single config file, every key optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    language: Option<String>,
    marker: Option<String>,
    extension: Option<String>,
    recursive: Option<bool>,
    suggestions: Option<bool>,
    max_suggestions: Option<usize>,
    exclude_words: Vec<String>,
    exclude_files: Vec<PathBuf>,
    exclude_word_file: Option<PathBuf>,
    ignore_patterns: Option<Vec<String>>,
    data_dir: Option<PathBuf>,
    personal_dir: Option<PathBuf>,
}

impl ConfigFile {
    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            TypoError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&contents).map_err(|e| {
            TypoError::configuration(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    #[cfg(test)]
    fn parse(contents: &str) -> Self {
        toml::from_str(contents).unwrap()
    }
}

/// Command line values that override file configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub language: Option<String>,
    pub marker: Option<String>,
    pub extension: Option<String>,
    pub recursive: bool,
    pub suggestions: bool,
    pub exclude_words: Vec<String>,
    pub exclude_files: Vec<PathBuf>,
    pub exclude_word_file: Option<PathBuf>,
    pub ignore_patterns: Vec<String>,
    pub data_dir: Option<PathBuf>,
    pub personal_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config = config.layer(ConfigFile::read(&global_path)?);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            config = config.layer(ConfigFile::read(&local_path)?);
        }

        Ok(config.with_overrides(overrides))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::default().layer(ConfigFile::read(path)?))
    }

    /// Apply one config file on top of `self`. Keys the file leaves out
    /// keep their current value; word and file exclusions accumulate.
    fn layer(mut self, file: ConfigFile) -> Self {
        if let Some(language) = file.language {
            self.language = language;
        }
        if file.marker.is_some() {
            self.marker = file.marker;
        }
        if let Some(extension) = file.extension {
            self.extension = extension;
        }
        if let Some(recursive) = file.recursive {
            self.recursive = recursive;
        }
        if let Some(suggestions) = file.suggestions {
            self.suggestions = suggestions;
        }
        if let Some(max) = file.max_suggestions {
            self.max_suggestions = max;
        }
        self.exclude_words.extend(file.exclude_words);
        self.exclude_files.extend(file.exclude_files);
        if file.exclude_word_file.is_some() {
            self.exclude_word_file = file.exclude_word_file;
        }
        if let Some(patterns) = file.ignore_patterns {
            self.ignore_patterns = patterns;
        }
        if file.data_dir.is_some() {
            self.data_dir = file.data_dir;
        }
        if file.personal_dir.is_some() {
            self.personal_dir = file.personal_dir;
        }
        self
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(language) = overrides.language {
            self.language = language;
        }
        if overrides.marker.is_some() {
            self.marker = overrides.marker;
        }
        if let Some(extension) = overrides.extension {
            self.extension = extension;
        }
        self.recursive |= overrides.recursive;
        self.suggestions |= overrides.suggestions;
        self.exclude_words.extend(overrides.exclude_words);
        self.exclude_files.extend(overrides.exclude_files);
        if overrides.exclude_word_file.is_some() {
            self.exclude_word_file = overrides.exclude_word_file;
        }
        self.ignore_patterns.extend(overrides.ignore_patterns);
        if overrides.data_dir.is_some() {
            self.data_dir = overrides.data_dir;
        }
        if overrides.personal_dir.is_some() {
            self.personal_dir = overrides.personal_dir;
        }
        self
    }

    /// Marker to scan with: explicit one, else the extension's convention.
    pub fn resolve_marker(&self) -> Result<String> {
        if let Some(marker) = &self.marker {
            return Ok(marker.clone());
        }
        crate::parser::default_marker(&self.extension)
            .map(|m| m.to_string())
            .ok_or_else(|| {
                TypoError::configuration(format!(
                    "No default comment marker for '.{}' files, pass one explicitly",
                    self.extension
                ))
            })
    }

    pub fn exclusions(&self) -> Result<ExclusionSet> {
        ExclusionSet::build(
            &self.exclude_words,
            &self.exclude_files,
            self.exclude_word_file.as_deref(),
        )?
        .with_patterns(&self.ignore_patterns)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_personal_dir() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("personal"))
    }

    pub fn default_data_dir() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "typoscope")
}
