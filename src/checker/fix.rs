use crate::checker::dictionary::Dictionary;
use crate::checker::validate_marker;
use crate::error::{Result, TypoError};
use crate::parser::extract_comments;
use crate::report::{AppliedFix, TypoRecord};
use std::collections::HashMap;
use std::fs;
use tracing::{debug, info, warn};

/// Replace every typo in `record` with its best suggestion.
///
/// The replacement is the first suggestion stored in the record, or the
/// dictionary's first suggestion when the record has none. Only comment text
/// is touched, and only whole whitespace-separated words, so a typo glued to
/// punctuation is left alone. A failed write stops the run; the error lists
/// the files already rewritten.
pub fn fix_typos(
    record: &TypoRecord,
    marker: &str,
    dictionary: &dyn Dictionary,
) -> Result<Vec<AppliedFix>> {
    validate_marker(marker)?;

    let mut applied = Vec::new();
    let mut fixed_files = Vec::new();

    for (path, entries) in record.iter() {
        let mut replacements: HashMap<&str, String> = HashMap::new();
        for entry in entries {
            let replacement = match entry.best_suggestion() {
                Some(best) => Some(best.to_string()),
                None => dictionary.suggest(&entry.word).into_iter().next(),
            };
            match replacement {
                Some(r) if !r.is_empty() && r != entry.word => {
                    replacements.insert(entry.word.as_str(), r);
                }
                _ => debug!("No replacement for {} in {}", entry.word, path.display()),
            }
        }

        if replacements.is_empty() {
            continue;
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping fix for {}: {}", path.display(), e);
                continue;
            }
        };

        let (new_content, counts) = rewrite_comments(&content, marker, &replacements);
        if counts.is_empty() {
            continue;
        }

        if let Err(source) = fs::write(path, new_content) {
            return Err(TypoError::FileWrite {
                path: path.to_path_buf(),
                fixed: fixed_files,
                source,
            });
        }

        for entry in entries {
            if let Some(&occurrences) = counts.get(entry.word.as_str()) {
                applied.push(AppliedFix {
                    path: path.to_path_buf(),
                    typo: entry.word.clone(),
                    replacement: replacements[entry.word.as_str()].clone(),
                    occurrences,
                });
            }
        }
        fixed_files.push(path.to_path_buf());
    }

    if applied.is_empty() {
        info!("No typos to fix");
    } else {
        info!(
            "Fixed {} typos in {} files with the most likely replacement",
            applied.len(),
            fixed_files.len()
        );
    }

    Ok(applied)
}

/// Apply `replacements` inside the comment spans of `content`.
/// Returns the new text and how often each typo was replaced.
pub fn rewrite_comments<'r>(
    content: &str,
    marker: &str,
    replacements: &HashMap<&'r str, String>,
) -> (String, HashMap<&'r str, usize>) {
    let mut out = String::with_capacity(content.len());
    let mut counts = HashMap::new();
    let mut pos = 0;

    for span in extract_comments(content, marker) {
        out.push_str(&content[pos..span.start]);
        rewrite_span(span.text, replacements, &mut out, &mut counts);
        pos = span.start + span.text.len();
    }
    out.push_str(&content[pos..]);

    (out, counts)
}

fn rewrite_span<'r>(
    text: &str,
    replacements: &HashMap<&'r str, String>,
    out: &mut String,
    counts: &mut HashMap<&'r str, usize>,
) {
    let mut piece_start = None;

    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(start) = piece_start.take() {
                push_piece(&text[start..i], replacements, out, counts);
            }
            out.push(ch);
        } else if piece_start.is_none() {
            piece_start = Some(i);
        }
    }

    if let Some(start) = piece_start {
        push_piece(&text[start..], replacements, out, counts);
    }
}

fn push_piece<'r>(
    piece: &str,
    replacements: &HashMap<&'r str, String>,
    out: &mut String,
    counts: &mut HashMap<&'r str, usize>,
) {
    match replacements.get_key_value(piece) {
        Some((&typo, replacement)) => {
            out.push_str(replacement);
            *counts.entry(typo).or_insert(0) += 1;
        }
        None => out.push_str(piece),
    }
}
