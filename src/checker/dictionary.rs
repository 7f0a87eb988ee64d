use crate::checker::personal::PersonalWords;
use crate::checker::suggestions;
use crate::config::Config;
use crate::error::{Result, TypoError};
use dashmap::DashMap;
use fst::{Automaton, IntoStreamer, Set, SetBuilder, Streamer};
use std::collections::{BTreeSet, HashSet};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DICT_EXTENSION: &str = "dict";

/// A spelling dictionary for one language.
///
/// Checks are read-only and may run from several threads at once. Mutations
/// take `&mut self`, so a dictionary sees at most one at a time.
pub trait Dictionary: Send + Sync {
    fn language(&self) -> &str;

    /// True if the word is known. Case-insensitive.
    fn exists(&self, word: &str) -> bool;

    /// Ranked corrections for `word`, possibly empty.
    fn suggest(&self, word: &str) -> Vec<String>;

    /// Accept words permanently (personal word list).
    fn add(&mut self, words: &[String]) -> Result<()>;

    /// Accept words for the lifetime of this value only.
    fn add_to_session(&mut self, words: &[String]);

    /// Undo `add`. Base dictionary words are marked as removed; unknown words
    /// are ignored.
    fn remove(&mut self, words: &[String]) -> Result<()>;

    /// Remove `old` and make `new` its preferred suggestion.
    fn replace(&mut self, old: &str, new: &str) -> Result<()>;

    /// Language codes installed on this host.
    fn available_languages(&self) -> BTreeSet<String>;
}

/// Immutable lowercase word set backed by an FST.
pub struct WordSet {
    set: Set<Vec<u8>>,
}

impl WordSet {
    /// Load a word set from a `.dict` file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| {
            TypoError::dictionary(format!(
                "Failed to open dictionary {}: {}",
                path.display(),
                e
            ))
        })?;

        let set = Set::new(bytes).map_err(|e| {
            TypoError::dictionary(format!(
                "Failed to parse dictionary {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self { set })
    }

    /// Build an in-memory word set
    pub fn from_words<I>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let sorted = normalize_words(words);
        let set = Set::from_iter(sorted).map_err(|e| TypoError::dictionary(e.to_string()))?;
        Ok(Self { set })
    }

    /// Write a word list as an installable `.dict` file
    pub fn build_from_words<I>(words: I, output_path: &Path) -> Result<usize>
    where
        I: IntoIterator<Item = String>,
    {
        let sorted = normalize_words(words);
        let count = sorted.len();

        let file = File::create(output_path).map_err(|e| {
            TypoError::dictionary(format!(
                "Failed to create dictionary {}: {}",
                output_path.display(),
                e
            ))
        })?;

        let writer = BufWriter::new(file);
        let mut builder = SetBuilder::new(writer)
            .map_err(|e| TypoError::dictionary(format!("Failed to create FST builder: {}", e)))?;

        for word in sorted {
            builder.insert(word.as_bytes()).map_err(|e| {
                TypoError::dictionary(format!("Failed to insert word into dictionary: {}", e))
            })?;
        }

        builder
            .finish()
            .map_err(|e| TypoError::dictionary(format!("Failed to finalize dictionary: {}", e)))?;

        Ok(count)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.as_bytes())
    }

    /// Get all words with a given prefix
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        let mut stream = self
            .set
            .search(fst::automaton::Str::new(prefix).starts_with())
            .into_stream();

        while let Some(key) = stream.next() {
            if let Ok(word) = String::from_utf8(key.to_vec()) {
                results.push(word);
            }
        }

        results
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

fn normalize_words<I>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut sorted: Vec<String> = words
        .into_iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();
    sorted.sort();
    sorted.dedup();
    sorted
}

/// Locates installed `<language>.dict` files and the personal word lists.
#[derive(Debug, Clone)]
pub struct DictionaryStore {
    data_dir: PathBuf,
    personal_dir: Option<PathBuf>,
    max_suggestions: usize,
}

impl DictionaryStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            personal_dir: None,
            max_suggestions: crate::config::DEFAULT_MAX_SUGGESTIONS,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let data_dir = config
            .data_dir
            .clone()
            .or_else(Config::default_data_dir)
            .ok_or_else(|| TypoError::configuration("Failed to determine the data directory"))?;

        let personal_dir = config
            .personal_dir
            .clone()
            .or_else(Config::default_personal_dir);

        Ok(Self {
            data_dir,
            personal_dir,
            max_suggestions: config.max_suggestions,
        })
    }

    pub fn with_personal_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.personal_dir = Some(dir.into());
        self
    }

    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn dictionary_path(&self, language: &str) -> PathBuf {
        self.data_dir.join(format!("{}.{}", language, DICT_EXTENSION))
    }

    pub fn personal_path(&self, language: &str) -> Option<PathBuf> {
        self.personal_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.json", language)))
    }

    pub fn available_languages(&self) -> BTreeSet<String> {
        list_languages(&self.data_dir)
    }

    /// Open the dictionary for `language`. Never falls back to another one.
    pub fn open(&self, language: &str) -> Result<FstDictionary> {
        let valid = !language.is_empty()
            && language
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        let path = self.dictionary_path(language);

        if !valid || !path.is_file() {
            return Err(TypoError::DictionaryUnavailable {
                language: language.to_string(),
            });
        }

        let words = WordSet::load_from_path(&path)?;
        debug!("Loaded {} words for {} from {}", words.len(), language, path.display());

        let personal_path = self.personal_path(language);
        let personal = match &personal_path {
            Some(p) => PersonalWords::load(p)?,
            None => PersonalWords::default(),
        };

        Ok(FstDictionary {
            language: language.to_string(),
            words,
            personal,
            personal_path,
            data_dir: Some(self.data_dir.clone()),
            session: HashSet::new(),
            max_suggestions: self.max_suggestions,
            cache: DashMap::new(),
        })
    }

    /// Build and install `<language>.dict` from a word list.
    pub fn install<I>(&self, language: &str, words: I) -> Result<usize>
    where
        I: IntoIterator<Item = String>,
    {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            TypoError::dictionary(format!("Failed to create data directory: {}", e))
        })?;
        let count = WordSet::build_from_words(words, &self.dictionary_path(language))?;
        info!("Installed {} dictionary with {} words", language, count);
        Ok(count)
    }
}

fn list_languages(data_dir: &Path) -> BTreeSet<String> {
    let Ok(entries) = fs::read_dir(data_dir) else {
        return BTreeSet::new();
    };

    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some(DICT_EXTENSION))
        .filter_map(|path| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string())
        })
        .collect()
}

/// FST word set plus the user's personal word list.
pub struct FstDictionary {
    language: String,
    words: WordSet,
    personal: PersonalWords,
    personal_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    session: HashSet<String>,
    max_suggestions: usize,
    cache: DashMap<String, Vec<String>>,
}

impl FstDictionary {
    /// In-memory dictionary with no persistence; changes last for the session.
    pub fn from_words<I>(language: &str, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        Ok(Self {
            language: language.to_string(),
            words: WordSet::from_words(words)?,
            personal: PersonalWords::default(),
            personal_path: None,
            data_dir: None,
            session: HashSet::new(),
            max_suggestions: crate::config::DEFAULT_MAX_SUGGESTIONS,
            cache: DashMap::new(),
        })
    }

    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self.cache.clear();
        self
    }

    pub fn personal(&self) -> &PersonalWords {
        &self.personal
    }

    fn persist(&mut self) -> Result<()> {
        self.cache.clear();
        match &self.personal_path {
            Some(path) => self.personal.save(path),
            None => Ok(()),
        }
    }

    fn compute_suggestions(&self, word: &str) -> Vec<String> {
        let mut candidates: Vec<(usize, String)> =
            suggestions::generate(word, &self.words, self.max_suggestions)
                .into_iter()
                .map(|w| (suggestions::edit_distance(word, &w), w))
                .collect();

        for extra in self.personal.added.iter().chain(self.session.iter()) {
            let distance = suggestions::edit_distance(word, extra);
            if distance > 0 && distance <= 2 {
                candidates.push((distance, extra.clone()));
            }
        }

        candidates.retain(|(_, w)| !self.personal.removed.contains(w));

        let mut ranked = suggestions::rank(candidates, self.max_suggestions);

        if let Some(preferred) = self.personal.replacements.get(word) {
            ranked.retain(|w| w != preferred);
            ranked.insert(0, preferred.clone());
            ranked.truncate(self.max_suggestions.max(1));
        }

        ranked
    }
}

impl Dictionary for FstDictionary {
    fn language(&self) -> &str {
        &self.language
    }

    fn exists(&self, word: &str) -> bool {
        let word = word.to_lowercase();

        if self.session.contains(&word) {
            return true;
        }
        if self.personal.removed.contains(&word) {
            return false;
        }
        self.personal.added.contains(&word) || self.words.contains(&word)
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        let lower = word.to_lowercase();

        let cached = self.cache.get(&lower).map(|entry| entry.value().clone());
        let ranked = match cached {
            Some(ranked) => ranked,
            None => {
                let computed = self.compute_suggestions(&lower);
                self.cache.insert(lower, computed.clone());
                computed
            }
        };

        ranked
            .iter()
            .map(|s| suggestions::match_case(word, s))
            .collect()
    }

    fn add(&mut self, words: &[String]) -> Result<()> {
        let mut added = 0;
        for word in words {
            let word = word.trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            self.personal.removed.remove(&word);
            if self.personal.added.insert(word) {
                added += 1;
            }
        }
        info!("Added {} words to the {} personal dictionary", added, self.language);
        self.persist()
    }

    fn add_to_session(&mut self, words: &[String]) {
        let before = self.session.len();
        self.session
            .extend(words.iter().map(|w| w.trim().to_lowercase()).filter(|w| !w.is_empty()));
        self.cache.clear();
        info!("Added {} words to the current session", self.session.len() - before);
    }

    fn remove(&mut self, words: &[String]) -> Result<()> {
        let mut changed = false;

        for word in words {
            let word = word.trim().to_lowercase();
            changed |= self.personal.added.remove(&word);
            changed |= self.session.remove(&word);
            if self.words.contains(&word) {
                changed |= self.personal.removed.insert(word);
            }
        }

        if !changed {
            return Ok(());
        }
        info!("Removed words from the {} dictionary", self.language);
        self.persist()
    }

    fn replace(&mut self, old: &str, new: &str) -> Result<()> {
        let old = old.trim().to_lowercase();
        self.remove(std::slice::from_ref(&old))?;
        self.personal
            .replacements
            .insert(old, new.trim().to_string());
        info!("Stored replacement for {}", new);
        self.persist()
    }

    fn available_languages(&self) -> BTreeSet<String> {
        let mut languages = match &self.data_dir {
            Some(dir) => list_languages(dir),
            None => BTreeSet::new(),
        };
        languages.insert(self.language.clone());
        languages
    }
}
