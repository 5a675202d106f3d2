//! Typedef/data file discovery
//!
//! Every `<name>.typedef.json` under a root directory is paired with the
//! sibling `<name>.json` when that file exists.

use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

use crate::error::{Result, TypedefError};

/// A typedef file and the data document it describes
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FilePair {
    pub typedef: PathBuf,
    pub data: PathBuf,
}

fn typedef_pattern() -> Result<Regex> {
    Regex::new(r"^.+\.typedef\.json$").map_err(|e| TypedefError::Discovery(e.to_string()))
}

/// Recursively find typedef files under `root`, sorted by path
pub fn find_typedef_files(root: &Path) -> Result<Vec<PathBuf>> {
    let pattern = typedef_pattern()?;
    let mut found = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| TypedefError::Discovery(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if pattern.is_match(&name) {
            found.push(entry.into_path());
        }
    }

    found.sort();
    Ok(found)
}

/// Path of the data document a typedef file describes
pub fn data_file_for(typedef: &Path) -> Result<PathBuf> {
    let invalid = || TypedefError::InvalidPath(typedef.display().to_string());

    // `user.typedef.json` -> `user.typedef` -> `user`
    let inner = typedef
        .file_stem()
        .filter(|_| typedef.extension().is_some_and(|ext| ext == "json"))
        .map(Path::new)
        .ok_or_else(invalid)?;
    let stem = inner
        .file_stem()
        .filter(|_| inner.extension().is_some_and(|ext| ext == "typedef"))
        .ok_or_else(invalid)?;

    let mut name = stem.to_os_string();
    name.push(".json");
    Ok(typedef.with_file_name(name))
}

/// Find every typedef under `root` that has a sibling data document
pub fn discover_pairs(root: &Path) -> Result<Vec<FilePair>> {
    let mut pairs = Vec::new();

    for typedef in find_typedef_files(root)? {
        let data = data_file_for(&typedef)?;
        if data.is_file() {
            pairs.push(FilePair { typedef, data });
        } else {
            tracing::debug!(typedef = %typedef.display(), "no data document next to typedef, skipping");
        }
    }

    tracing::debug!(root = %root.display(), pairs = pairs.len(), "discovery complete");
    Ok(pairs)
}
