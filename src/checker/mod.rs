pub mod dictionary;
pub mod exclusions;
pub mod fix;
pub mod personal;
pub mod suggestions;
pub mod tokenizer;

use crate::error::{Result, TypoError};
use crate::parser::extract_comments;
use crate::report::{AppliedFix, ScanReport, SkippedFile, TypoEntry, TypoRecord};
use crate::Config;
use dictionary::{Dictionary, DictionaryStore};
use exclusions::ExclusionSet;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tokenizer::tokenize;
use tracing::{debug, info, warn};

pub use fix::fix_typos;

/// A marker is matched within single lines, so it cannot span one.
pub fn validate_marker(marker: &str) -> Result<()> {
    if marker.contains(['\n', '\r']) {
        return Err(TypoError::configuration(format!(
            "Invalid comment marker {:?}: markers cannot contain line breaks",
            marker
        )));
    }
    Ok(())
}

/// Scan `files` for typos in their comments.
///
/// Excluded files are skipped silently, unreadable ones are listed in
/// `ScanReport::skipped`. Suggestions are looked up only when asked for.
pub fn find_typos(
    files: &[PathBuf],
    marker: &str,
    exclusions: &ExclusionSet,
    dictionary: &dyn Dictionary,
    suggestions: bool,
) -> Result<ScanReport> {
    validate_marker(marker)?;

    let results: Vec<(&PathBuf, Result<Vec<TypoEntry>>)> = files
        .par_iter()
        .filter(|path| {
            let excluded = exclusions.contains_file(path);
            if excluded {
                debug!("Excluded {}", path.display());
            }
            !excluded
        })
        .map(|path| {
            (
                path,
                check_file(path, marker, exclusions, dictionary, suggestions),
            )
        })
        .collect();

    let mut report = ScanReport::default();

    for (path, result) in results {
        report.files_scanned += 1;
        match result {
            Ok(entries) => report.record.insert(path.clone(), entries),
            Err(e) => {
                warn!("Skipping {}", e);
                report.skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    if report.record.is_empty() {
        info!("No typos were found");
    } else {
        info!(
            "Possible typos found: {} in {} files",
            report.record.typo_count(),
            report.record.file_count()
        );
    }

    Ok(report)
}

fn check_file(
    path: &Path,
    marker: &str,
    exclusions: &ExclusionSet,
    dictionary: &dyn Dictionary,
    suggestions: bool,
) -> Result<Vec<TypoEntry>> {
    let content = fs::read_to_string(path).map_err(|source| TypoError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Checking {}", path.display());
    Ok(check_text(&content, marker, exclusions, dictionary, suggestions))
}

/// Typos in the comments of `content`, each word reported once, in order.
pub fn check_text(
    content: &str,
    marker: &str,
    exclusions: &ExclusionSet,
    dictionary: &dyn Dictionary,
    suggestions: bool,
) -> Vec<TypoEntry> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut entries = Vec::new();

    for span in extract_comments(content, marker) {
        let masked = exclusions.mask(span.text);

        for token in tokenize(&masked) {
            if seen.contains(token.text) || exclusions.contains_word(token.text) {
                continue;
            }
            if dictionary.exists(token.text) {
                continue;
            }

            seen.insert(token.text.to_string());
            entries.push(if suggestions {
                TypoEntry::with_suggestions(token.text, dictionary.suggest(token.text))
            } else {
                TypoEntry::bare(token.text)
            });
        }
    }

    entries
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning,
    Done,
}

/// Session context: the dictionary and exclusions used by successive scans.
pub struct TypoEngine {
    dictionary: Box<dyn Dictionary>,
    exclusions: ExclusionSet,
    state: ScanState,
    marker: String,
    report: Option<ScanReport>,
}

impl TypoEngine {
    pub fn new(dictionary: Box<dyn Dictionary>, exclusions: ExclusionSet) -> Self {
        Self {
            dictionary,
            exclusions,
            state: ScanState::Idle,
            marker: String::new(),
            report: None,
        }
    }

    /// Open the configured dictionary and build the exclusion set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = DictionaryStore::from_config(config)?;
        let dictionary = store.open(&config.language)?;
        let exclusions = config.exclusions()?;
        Ok(Self::new(Box::new(dictionary), exclusions))
    }

    pub fn dictionary(&self) -> &dyn Dictionary {
        self.dictionary.as_ref()
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn last_report(&self) -> Option<&ScanReport> {
        self.report.as_ref()
    }

    /// Run a fresh scan, replacing the previous report.
    pub fn find_typos(
        &mut self,
        files: &[PathBuf],
        marker: &str,
        suggestions: bool,
    ) -> Result<&ScanReport> {
        self.state = ScanState::Scanning;
        self.report = None;

        match find_typos(
            files,
            marker,
            &self.exclusions,
            self.dictionary.as_ref(),
            suggestions,
        ) {
            Ok(report) => {
                self.state = ScanState::Done;
                self.marker = marker.to_string();
                Ok(self.report.insert(report))
            }
            Err(e) => {
                self.state = ScanState::Idle;
                Err(e)
            }
        }
    }

    /// Fix the typos of the last scan in place.
    pub fn fix_typos(&self) -> Result<Vec<AppliedFix>> {
        match &self.report {
            Some(report) => fix_typos(&report.record, &self.marker, self.dictionary.as_ref()),
            None => {
                info!("No typos to fix");
                Ok(Vec::new())
            }
        }
    }

    pub fn record(&self) -> Option<&TypoRecord> {
        self.report.as_ref().map(|r| &r.record)
    }

    pub fn add_to_dictionary(&mut self, words: &[String]) -> Result<()> {
        self.dictionary.add(words)
    }

    pub fn add_to_session(&mut self, words: &[String]) {
        self.dictionary.add_to_session(words)
    }

    pub fn remove_from_dictionary(&mut self, words: &[String]) -> Result<()> {
        self.dictionary.remove(words)
    }

    pub fn add_to_exclusions(&mut self, words: &[String]) {
        self.exclusions.add_words(words);
        info!("Word list added to exclusions");
    }

    pub fn replace_word(&mut self, old: &str, new: &str) -> Result<()> {
        self.dictionary.replace(old, new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Overrides;
    use super::dictionary::FstDictionary;
    use std::collections::BTreeSet;
    use tempfile::{tempdir, TempDir};

    const WORDS: &[&str] = &[
        "this", "is", "simple", "bug", "comment", "comet", "another", "code", "properly", "the",
        "and", "more", "here", "file", "print", "hello", "world", "push", "to",
    ];

    fn dictionary() -> FstDictionary {
        FstDictionary::from_words("en_US", WORDS.iter().map(|w| w.to_string())).unwrap()
    }

    fn engine() -> TypoEngine {
        TypoEngine::new(Box::new(dictionary()), ExclusionSet::default())
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_simple_bug_scenario() {
        let dir = tempdir().unwrap();
        let file = write(&dir, "file.py", "# This is a smple bug");
        let files = vec![file.clone()];
        let mut engine = engine();

        let report = engine.find_typos(&files, "#", false).unwrap();
        assert_eq!(report.record.get(&file).unwrap(), &[TypoEntry::bare("smple")]);

        let report = engine.find_typos(&files, "#", true).unwrap();
        assert_eq!(
            report.record.get(&file).unwrap(),
            &[TypoEntry::with_suggestions("smple", vec!["simple".to_string()])]
        );

        let applied = engine.fix_typos().unwrap();
        assert_eq!(applied.len(), 1);
        assert_eq!(fs::read_to_string(&file).unwrap(), "# This is a simple bug");
    }

    #[test]
    fn test_known_words_are_never_reported() {
        let dir = tempdir().unwrap();
        let text = format!("# {}\n", WORDS.join(" "));
        let file = write(&dir, "known.py", &text);

        let report = find_typos(
            &[file],
            "#",
            &ExclusionSet::default(),
            &dictionary(),
            false,
        )
        .unwrap();
        assert!(report.record.is_empty());
    }

    #[test]
    fn test_code_outside_comments_is_ignored() {
        let dict = dictionary();
        let entries = check_text(
            "def smple():  # the commetn\n    retrn 1\n",
            "#",
            &ExclusionSet::default(),
            &dict,
            false,
        );
        assert_eq!(entries, vec![TypoEntry::bare("commetn")]);
    }

    #[test]
    fn test_excluded_words_are_never_reported() {
        let exclusions = ExclusionSet::build(["GitHub"], Vec::<&str>::new(), None).unwrap();
        let entries = check_text(
            "# push to GitHub and github and GITHUB\n",
            "#",
            &exclusions,
            &dictionary(),
            true,
        );
        assert!(entries.is_empty());
    }

    #[test]
    fn test_duplicates_reported_once_in_order() {
        let entries = check_text(
            "# zzword yyword\n# zzword xxword yyword\n",
            "#",
            &ExclusionSet::default(),
            &dictionary(),
            false,
        );
        assert_eq!(
            entries,
            vec![
                TypoEntry::bare("zzword"),
                TypoEntry::bare("yyword"),
                TypoEntry::bare("xxword"),
            ]
        );
    }

    #[test]
    fn test_suggestions_do_not_change_reported_tokens() {
        let text = "# commetn anothr smple zzqx\n# cdoe proply commetn\n";
        let dict = dictionary();
        let plain = check_text(text, "#", &ExclusionSet::default(), &dict, false);
        let suggested = check_text(text, "#", &ExclusionSet::default(), &dict, true);

        let plain_words: Vec<_> = plain.iter().map(|e| e.word.as_str()).collect();
        let suggested_words: Vec<_> = suggested.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(plain_words, suggested_words);
        assert!(plain.iter().all(|e| e.suggestions.is_none()));
        assert!(suggested.iter().all(|e| e.suggestions.is_some()));
    }

    #[test]
    fn test_empty_marker_checks_whole_file() {
        let dir = tempdir().unwrap();
        let file = write(&dir, "foo.rst", "Title\n=====\n\nThe cdoe is proply here\n");
        let exclusions = ExclusionSet::build(["Title"], Vec::<&str>::new(), None).unwrap();

        let report = find_typos(&[file.clone()], "", &exclusions, &dictionary(), false).unwrap();
        assert_eq!(
            report.record.get(&file).unwrap(),
            &[TypoEntry::bare("cdoe"), TypoEntry::bare("proply")]
        );
    }

    #[test]
    fn test_excluded_files_are_skipped() {
        let dir = tempdir().unwrap();
        let skipped = write(&dir, "UPDATE.py", "# zzword\n");
        let checked = write(&dir, "main.py", "# yyword\n");
        let exclusions =
            ExclusionSet::build(Vec::<&str>::new(), [skipped.clone()], None).unwrap();

        let report = find_typos(
            &[skipped.clone(), checked.clone()],
            "#",
            &exclusions,
            &dictionary(),
            false,
        )
        .unwrap();
        assert!(report.record.get(&skipped).is_none());
        assert!(report.record.get(&checked).is_some());
        assert_eq!(report.files_scanned, 1);
    }

    #[test]
    fn test_unreadable_files_are_counted() {
        let dir = tempdir().unwrap();
        let good = write(&dir, "good.py", "# zzword\n");
        let missing = dir.path().join("missing.py");
        let binary = dir.path().join("binary.py");
        fs::write(&binary, [0xff, 0xfe, 0x23, 0x00]).unwrap();

        let report = find_typos(
            &[missing.clone(), good.clone(), binary.clone()],
            "#",
            &ExclusionSet::default(),
            &dictionary(),
            false,
        )
        .unwrap();

        assert_eq!(report.skipped_count(), 2);
        assert_eq!(report.skipped[0].path, missing);
        assert_eq!(report.skipped[1].path, binary);
        assert!(report.record.get(&good).is_some());
    }

    #[test]
    fn test_invalid_marker_fails_before_scanning() {
        let mut engine = engine();
        let err = engine.find_typos(&[PathBuf::from("x.py")], "#\n", false).unwrap_err();
        assert!(matches!(err, TypoError::Configuration(_)));
        assert_eq!(engine.state(), ScanState::Idle);
        assert!(engine.last_report().is_none());
    }

    #[test]
    fn test_rescan_overwrites_previous_results() {
        let dir = tempdir().unwrap();
        let first = write(&dir, "first.py", "# zzword\n");
        let second = write(&dir, "second.py", "# the code\n");
        let mut engine = engine();
        assert_eq!(engine.state(), ScanState::Idle);

        engine.find_typos(&[first.clone()], "#", false).unwrap();
        assert_eq!(engine.state(), ScanState::Done);
        assert_eq!(engine.record().unwrap().file_count(), 1);

        engine.find_typos(&[second], "#", false).unwrap();
        assert!(engine.record().unwrap().is_empty());
        assert_eq!(engine.state(), ScanState::Done);
    }

    #[test]
    fn test_session_updates_affect_later_scans() {
        let dir = tempdir().unwrap();
        let file = write(&dir, "file.py", "# serde tokio recieve\n");
        let files = vec![file.clone()];
        let mut engine = engine();

        assert_eq!(engine.find_typos(&files, "#", false).unwrap().record.typo_count(), 3);

        engine.add_to_dictionary(&strings(&["serde"])).unwrap();
        engine.add_to_exclusions(&strings(&["Tokio"]));
        let report = engine.find_typos(&files, "#", false).unwrap();
        assert_eq!(report.record.get(&file).unwrap(), &[TypoEntry::bare("recieve")]);

        engine.replace_word("recieve", "receive").unwrap();
        let report = engine.find_typos(&files, "#", true).unwrap();
        assert_eq!(
            report.record.get(&file).unwrap()[0].best_suggestion(),
            Some("receive")
        );

        engine.remove_from_dictionary(&strings(&["serde"])).unwrap();
        assert_eq!(engine.find_typos(&files, "#", false).unwrap().record.typo_count(), 2);
    }

    #[test]
    fn test_fix_without_scan_is_a_no_op() {
        assert!(engine().fix_typos().unwrap().is_empty());
    }

    #[test]
    fn test_unavailable_dictionary_fails_before_scanning() {
        let dir = tempdir().unwrap();
        let config = Config::default().with_overrides(Overrides {
            language: Some("xx".to_string()),
            data_dir: Some(dir.path().to_path_buf()),
            personal_dir: Some(dir.path().join("personal")),
            ..Default::default()
        });

        let err = TypoEngine::from_config(&config).err().unwrap();
        assert!(matches!(err, TypoError::DictionaryUnavailable { language } if language == "xx"));
    }

    #[test]
    fn test_from_config() {
        let dir = tempdir().unwrap();
        let store = DictionaryStore::new(dir.path());
        store.install("fr", strings(&["bonjour", "le", "monde"])).unwrap();

        let config = Config::default().with_overrides(Overrides {
            language: Some("fr".to_string()),
            data_dir: Some(dir.path().to_path_buf()),
            personal_dir: Some(dir.path().join("personal")),
            exclude_words: strings(&["GitHub"]),
            ..Default::default()
        });

        let engine = TypoEngine::from_config(&config).unwrap();
        assert_eq!(engine.dictionary().language(), "fr");
        assert!(engine.dictionary().exists("Bonjour"));
        assert!(engine.exclusions().contains_word("github"));
        assert_eq!(
            engine.dictionary().available_languages(),
            BTreeSet::from(["fr".to_string()])
        );
    }
}
