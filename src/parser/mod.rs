pub mod comments;

pub use comments::{extract_comments, CommentSpan, Comments};

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Prose documents, checked as a whole
    Text,
    /// Languages with `#` line comments
    Hash,
    /// Languages with `//` line comments
    Slash,
    /// Languages with `--` line comments
    DoubleDash,
    /// Lisp family
    Semicolon,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_lowercase();

        match ext.as_str() {
            "md" | "mdx" | "markdown" | "rst" | "txt" | "adoc" => Some(FileType::Text),
            "py" | "pyw" | "sh" | "bash" | "zsh" | "rb" | "pl" | "r" | "toml" | "yaml"
            | "yml" | "cfg" | "ini" | "conf" | "mk" => Some(FileType::Hash),
            "rs" | "js" | "mjs" | "cjs" | "ts" | "mts" | "cts" | "jsx" | "tsx" | "go"
            | "java" | "kt" | "scala" | "swift" | "c" | "h" | "cpp" | "cc" | "cxx" | "hpp"
            | "hh" | "cs" | "dart" | "zig" => Some(FileType::Slash),
            "sql" | "lua" | "hs" | "elm" | "ada" => Some(FileType::DoubleDash),
            "lisp" | "el" | "clj" | "scm" | "asm" | "s" => Some(FileType::Semicolon),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn marker(self) -> &'static str {
        match self {
            FileType::Text => "",
            FileType::Hash => "#",
            FileType::Slash => "//",
            FileType::DoubleDash => "--",
            FileType::Semicolon => ";",
        }
    }
}

/// Comment marker conventionally used for files with extension `ext`.
pub fn default_marker(ext: &str) -> Option<&'static str> {
    FileType::from_extension(ext).map(FileType::marker)
}
