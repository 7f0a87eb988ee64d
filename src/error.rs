use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypoError {
    /// Bad exclusion file, invalid marker, unparsable config or pattern.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Dictionary for language '{language}' is not installed")]
    DictionaryUnavailable { language: String },

    /// Per-file read failure. Scans record these and keep going.
    #[error("Failed to read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Write failure while fixing. `fixed` lists the files already rewritten.
    #[error("Failed to write {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        fixed: Vec<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// Backend failure: corrupt FST, personal word list I/O.
    #[error("Dictionary error: {0}")]
    Dictionary(String),
}

impl TypoError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        TypoError::Configuration(msg.into())
    }

    pub fn dictionary(msg: impl Into<String>) -> Self {
        TypoError::Dictionary(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, TypoError>;
