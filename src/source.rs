//! Regex source resolution: literal patterns or files of patterns

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Expand a regex source into the patterns it stands for
///
/// A regular file yields one pattern per non-empty (trimmed) line; any
/// other string is itself the pattern.
pub fn resolve(source: &str) -> Result<Vec<String>> {
    let path = Path::new(source);
    if !path.is_file() {
        return Ok(vec![source.to_string()]);
    }

    let text = fs::read_to_string(path).map_err(|err| Error::ReadSource {
        path: path.to_path_buf(),
        source: err,
    })?;

    let patterns: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    if patterns.is_empty() {
        log::warn!("regex file {} contains no patterns", path.display());
    } else {
        log::debug!("read {} patterns from {}", patterns.len(), path.display());
    }

    Ok(patterns)
}

/// Text form of a partial pattern: a full match of it means "contains a
/// match of `pattern` somewhere"
pub fn partial_pattern(pattern: &str) -> String {
    format!(".*({}).*", pattern)
}
