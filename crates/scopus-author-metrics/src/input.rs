//! Name loading from a text file or the command line.

use std::path::Path;

use crate::error::{AppError, AppResult};

/// Split text into names: one per line, trimmed, blank lines dropped.
#[must_use]
pub fn parse_names(text: &str) -> Vec<String> {
    text.lines().map(str::trim).filter(|line| !line.is_empty()).map(str::to_string).collect()
}

/// Load names from a `.txt` file.
///
/// # Errors
///
/// Fails on any other extension (before touching the file) or on read errors.
pub fn load_names(path: &Path) -> AppResult<Vec<String>> {
    let is_text = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));

    if !is_text {
        return Err(AppError::unsupported_input(path));
    }

    let text = std::fs::read_to_string(path)?;
    Ok(parse_names(&text))
}

/// Names to resolve: explicit names when given, otherwise the input file.
///
/// # Errors
///
/// Returns [`AppError::NoNames`] when nothing usable remains.
pub fn collect_names(input: &Path, explicit: &[String]) -> AppResult<Vec<String>> {
    let names = if explicit.is_empty() {
        load_names(input)?
    } else {
        explicit.iter().map(|n| n.trim()).filter(|n| !n.is_empty()).map(str::to_string).collect()
    };

    if names.is_empty() {
        return Err(AppError::NoNames);
    }

    tracing::debug!(count = names.len(), "Loaded author names");
    Ok(names)
}
