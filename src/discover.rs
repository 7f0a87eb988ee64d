use crate::error::{Result, TypoError};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Resolve `target` into the files to scan.
///
/// A file is returned as is. For a directory, files ending in `.extension`
/// are collected from its top level, or from the whole tree when `recursive`
/// is set. Results are sorted so scans are reproducible.
pub fn find_files(target: &Path, extension: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    if target.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }

    if !target.is_dir() {
        return Err(TypoError::configuration(format!(
            "No such file or directory: {}",
            target.display()
        )));
    }

    let extension = extension.trim_start_matches('.');
    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut files: Vec<PathBuf> = WalkDir::new(target)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(extension))
        .collect();

    files.sort();
    debug!("Found {} .{} files under {}", files.len(), extension, target.display());
    Ok(files)
}
