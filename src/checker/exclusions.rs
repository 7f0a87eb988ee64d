use crate::error::{Result, TypoError};
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Words and files skipped during a scan, regardless of dictionary results.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    words: HashSet<String>,
    files: HashSet<String>,
    patterns: Vec<Regex>,
}

impl ExclusionSet {
    /// Merge explicit word and file lists with an optional one-word-per-line file.
    pub fn build<W, F>(words: W, files: F, word_file: Option<&Path>) -> Result<Self>
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<Path>,
    {
        let mut set = Self::default();
        set.add_words(words);
        set.files = files
            .into_iter()
            .map(|f| normalize_path(f.as_ref()))
            .collect();

        if let Some(path) = word_file {
            let content = fs::read_to_string(path).map_err(|e| {
                TypoError::configuration(format!(
                    "Failed to read exclusion file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            set.add_words(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|w| !w.is_empty() && !w.starts_with('#')),
            );
        }

        Ok(set)
    }

    /// Compile regex ignore patterns; matching text is masked before tokenizing.
    pub fn with_patterns<P>(mut self, patterns: P) -> Result<Self>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let re = Regex::new(pattern).map_err(|e| {
                TypoError::configuration(format!("Invalid ignore pattern '{}': {}", pattern, e))
            })?;
            self.patterns.push(re);
        }
        Ok(self)
    }

    pub fn add_words<W>(&mut self, words: W)
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn contains_file(&self, path: &Path) -> bool {
        self.files.contains(&normalize_path(path))
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Blank out every ignore-pattern match with spaces, keeping byte offsets.
    pub fn mask<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.patterns.is_empty() {
            return Cow::Borrowed(text);
        }

        let mut ranges: Vec<(usize, usize)> = self
            .patterns
            .iter()
            .flat_map(|re| re.find_iter(text).map(|m| (m.start(), m.end())))
            .collect();

        if ranges.is_empty() {
            return Cow::Borrowed(text);
        }
        ranges.sort_unstable();

        let mut masked = String::with_capacity(text.len());
        let mut pos = 0;
        for (start, end) in ranges {
            if end <= pos {
                continue;
            }
            let start = start.max(pos);
            masked.push_str(&text[pos..start]);
            masked.extend(std::iter::repeat(' ').take(end - start));
            pos = end;
        }
        masked.push_str(&text[pos..]);

        Cow::Owned(masked)
    }
}

/// Separator-normalized form used to compare file paths.
pub fn normalize_path(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    let mut path = path.as_str();
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    path.to_string()
}
