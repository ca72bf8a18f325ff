//! Input file discovery and format checks.

use std::path::{Path, PathBuf};

use chem_model::FileOptions;

use crate::error::{IngestError, Result};

/// Lower-cased extension of a path, if it has one.
pub fn file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Whether the batch accepts this file by extension.
pub fn is_supported(path: &Path, options: &FileOptions) -> bool {
    file_extension(path).is_some_and(|ext| options.accepts(&ext))
}

/// Lists all supported files in a directory.
///
/// Returns files sorted by filename.
pub fn list_input_files(dir: &Path, options: &FileOptions) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        // Spreadsheet lock files left by office suites
        let is_lock_file = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("~$"));
        if is_lock_file {
            continue;
        }
        if is_supported(&path, options) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Expands command-line inputs into the ordered list of files to process.
///
/// Directories contribute their supported files; anything else is kept as
/// given so the batch reports unsupported or unreadable files per file.
pub fn expand_inputs(inputs: &[PathBuf], options: &FileOptions) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(list_input_files(input, options)?);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}
