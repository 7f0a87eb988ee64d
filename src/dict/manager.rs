use crate::checker::dictionary::{Dictionary, DictionaryStore};
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;

pub fn list_dictionaries(store: &DictionaryStore) -> Result<()> {
    let languages = store.available_languages();

    if languages.is_empty() {
        println!("{}", "No dictionaries installed.".yellow());
        println!(
            "Run {} to install one from a word list.",
            "typoscope dict build en_US words.txt".cyan()
        );
        return Ok(());
    }

    println!("{}", "Installed dictionaries:".bold());
    println!();

    for language in &languages {
        let path = store.dictionary_path(language);
        let size_kb = fs::metadata(&path).map(|m| m.len() / 1024).unwrap_or(0);

        println!(
            "  {} {} ({})",
            "✓".green(),
            language.cyan().bold(),
            format!("{}KB", size_kb).dimmed()
        );
    }

    println!();
    println!(
        "Data directory: {}",
        store.data_dir().display().to_string().dimmed()
    );

    Ok(())
}

/// Install `<language>.dict` from a plain word list, one word per line.
pub fn build_dictionary(store: &DictionaryStore, language: &str, wordlist: &Path) -> Result<()> {
    println!(
        "{} dictionary for {} from {}...",
        "Building".cyan().bold(),
        language.yellow(),
        wordlist.display().to_string().dimmed()
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .context("Invalid progress template")?,
    );
    pb.set_message("Reading word list...");

    let content = fs::read_to_string(wordlist)
        .with_context(|| format!("Failed to read word list: {}", wordlist.display()))?;

    let words: Vec<String> = content
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    pb.set_message(format!("Indexing {} words...", words.len()));
    let count = store.install(language, words)?;
    pb.finish_with_message("Build complete");

    println!(
        "{} Dictionary installed: {} ({} words)",
        "✓".green().bold(),
        store.dictionary_path(language).display().to_string().cyan(),
        count.to_string().yellow()
    );

    Ok(())
}

pub fn show_info(store: &DictionaryStore, language: &str) -> Result<()> {
    let dict_path = store.dictionary_path(language);

    if !dict_path.exists() {
        println!(
            "{} Dictionary for {} not found.",
            "✗".red().bold(),
            language.yellow()
        );
        println!(
            "Run {} to install it.",
            format!("typoscope dict build {} <wordlist>", language).cyan()
        );
        return Ok(());
    }

    let metadata = fs::metadata(&dict_path)?;
    let dictionary = store.open(language)?;
    let personal = dictionary.personal();

    println!("{}", format!("Dictionary: {}", dictionary.language()).bold());
    println!("  Path: {}", dict_path.display());
    println!("  Size: {} KB", metadata.len() / 1024);
    println!("  Format: FST (Finite State Transducer)");
    if let Some(personal_path) = store.personal_path(language) {
        println!("  Personal list: {}", personal_path.display());
    }
    println!("  Added words: {}", personal.added.len());
    println!("  Removed words: {}", personal.removed.len());
    println!("  Replacements: {}", personal.replacements.len());

    Ok(())
}
