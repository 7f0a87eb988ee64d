use crate::report::{AppliedFix, ScanReport, SkippedFile, TypoRecord};
use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    files_checked: usize,
    total_typos: usize,
    typos: &'a TypoRecord,
    typo_list: Vec<String>,
    skipped: &'a [SkippedFile],
}

pub fn print_report(report: &ScanReport, colored_output: bool, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            print_text_report(report, colored_output);
            Ok(())
        }
        OutputFormat::Json => print_json_report(report),
    }
}

fn print_text_report(report: &ScanReport, colored_output: bool) {
    for (path, entries) in report.record.iter() {
        let file_name = path.display().to_string();

        if colored_output {
            println!("\n{}", file_name.bold().underline());
        } else {
            println!("\n{}", file_name);
        }

        for entry in entries {
            let suggestions = entry
                .suggestions
                .as_deref()
                .filter(|s| !s.is_empty());

            if colored_output {
                match suggestions {
                    Some(list) => {
                        let list = list
                            .iter()
                            .map(|s| s.green().to_string())
                            .collect::<Vec<_>>()
                            .join(&", ".dimmed().to_string());
                        println!("  {} {} {}", entry.word.red().bold(), "→".dimmed(), list);
                    }
                    None => println!("  {}", entry.word.red().bold()),
                }
            } else {
                match suggestions {
                    Some(list) => println!("  {} → {}", entry.word, list.join(", ")),
                    None => println!("  {}", entry.word),
                }
            }
        }
    }

    for skipped in &report.skipped {
        if colored_output {
            eprintln!("{} {}", "warning:".yellow().bold(), skipped.reason);
        } else {
            eprintln!("warning: {}", skipped.reason);
        }
    }
}

fn print_json_report(report: &ScanReport) -> Result<()> {
    let output = JsonOutput {
        files_checked: report.files_scanned,
        total_typos: report.record.typo_count(),
        typos: &report.record,
        typo_list: report.record.typo_list(),
        skipped: &report.skipped,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_check_summary(report: &ScanReport, colored: bool) {
    let total_typos = report.record.typo_count();
    let files = report.record.file_count();

    println!();
    if total_typos == 0 {
        if colored {
            println!("{}", "✓ No typos found!".green().bold());
        } else {
            println!("✓ No typos found!");
        }
    } else {
        let typo_word = if total_typos == 1 { "typo" } else { "typos" };
        let file_word = if files == 1 { "file" } else { "files" };
        if colored {
            println!(
                "{} {} possible {} found in {} {}",
                "✗".red().bold(),
                total_typos.to_string().red().bold(),
                typo_word,
                files,
                file_word
            );
        } else {
            println!(
                "✗ {} possible {} found in {} {}",
                total_typos, typo_word, files, file_word
            );
        }
    }

    if report.skipped_count() > 0 {
        let skipped = format!("{} unreadable files skipped", report.skipped_count());
        if colored {
            println!("{}", skipped.yellow());
        } else {
            println!("{}", skipped);
        }
    }
}

pub fn print_fix_summary(applied: &[AppliedFix], colored: bool) {
    println!();
    if applied.is_empty() {
        if colored {
            println!("{}", "No corrections needed!".green().bold());
        } else {
            println!("No corrections needed!");
        }
        return;
    }

    for fix in applied {
        if colored {
            println!(
                "  {} {} {} {}",
                fix.path.display().to_string().dimmed(),
                fix.typo.red(),
                "→".dimmed(),
                fix.replacement.green()
            );
        } else {
            println!("  {} {} → {}", fix.path.display(), fix.typo, fix.replacement);
        }
    }

    let total: usize = applied.iter().map(|f| f.occurrences).sum();
    let mut files: Vec<_> = applied.iter().map(|f| &f.path).collect();
    files.dedup();
    let fix_word = if total == 1 { "correction" } else { "corrections" };
    let file_word = if files.len() == 1 { "file" } else { "files" };

    if colored {
        println!(
            "{} {} {} applied to {} {}",
            "✓".green().bold(),
            total.to_string().green().bold(),
            fix_word,
            files.len(),
            file_word
        );
    } else {
        println!(
            "✓ {} {} applied to {} {}",
            total,
            fix_word,
            files.len(),
            file_word
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
