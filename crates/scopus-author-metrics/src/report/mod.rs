//! Spreadsheet report of resolved records.
//!
//! One sheet, header row plus one row per record. The ambiguity flag is not
//! a visible column; flagged rows are filled instead. Existing files are never
//! overwritten: `name.xlsx` becomes `name(1).xlsx`, `name(2).xlsx`, ...

pub mod xlsx;

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::output;
use crate::error::AppResult;
use crate::models::ResolvedRecord;

pub use xlsx::{Cell, Worksheet};

/// Visible columns, in order.
pub const COLUMNS: [&str; 10] = [
    "query",
    "surname",
    "givenname",
    "affiliation",
    "city",
    "country",
    "scopus_link",
    "h_index",
    "document_count",
    "citation_count",
];

/// Cells for one record, aligned with [`COLUMNS`].
#[must_use]
pub fn record_cells(record: &ResolvedRecord) -> Vec<Cell> {
    vec![
        Cell::Text(record.query.clone()),
        record.surname.as_deref().into(),
        record.given_name.as_deref().into(),
        record.affiliation.as_deref().into(),
        record.city.as_deref().into(),
        record.country.as_deref().into(),
        record.profile_link.as_deref().into(),
        record.h_index.into(),
        record.document_count.into(),
        record.citation_count.into(),
    ]
}

/// Build the worksheet for a batch of records.
#[must_use]
pub fn build_worksheet(records: &[ResolvedRecord], sheet_name: &str) -> Worksheet {
    let mut sheet = Worksheet::new(sheet_name, &COLUMNS, output::FLAG_FILL_RGB);
    for record in records {
        sheet.push_row(record_cells(record), record.ambiguous);
    }
    sheet
}

/// `path` for `n == 0`, otherwise `stem(n).ext` next to it.
#[must_use]
pub fn numbered_path(path: &Path, n: usize) -> PathBuf {
    if n == 0 {
        return path.to_path_buf();
    }

    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}({n}).{}", ext.to_string_lossy()),
        None => format!("{stem}({n})"),
    };
    path.with_file_name(name)
}

/// Create the first free numbered variant of `path`.
fn create_unique(path: &Path) -> AppResult<(File, PathBuf)> {
    let mut n = 0;
    loop {
        let candidate = numbered_path(path, n);
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(file) => return Ok((file, candidate)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!(path = %candidate.display(), "Output exists, trying next name");
                n += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Create the first free numbered variant of `path` and fill it with `write`.
///
/// On failure the incomplete file is removed, leaving the name free.
fn write_new_file<F>(path: &Path, write: F) -> AppResult<PathBuf>
where
    F: FnOnce(File) -> AppResult<()>,
{
    let (file, path) = create_unique(path)?;

    if let Err(e) = write(file) {
        if let Err(cleanup) = std::fs::remove_file(&path) {
            tracing::warn!(path = %path.display(), error = %cleanup, "Failed to remove incomplete report");
        }
        return Err(e);
    }

    Ok(path)
}

/// Write the report, returning the path actually used.
///
/// # Errors
///
/// Returns error on filesystem or packaging failure.
pub fn write_report(
    records: &[ResolvedRecord],
    output: &Path,
    sheet_name: &str,
) -> AppResult<PathBuf> {
    let sheet = build_worksheet(records, sheet_name);
    if sheet.is_empty() {
        tracing::warn!("No records to report, writing header only");
    }

    let path = write_new_file(output, |file| {
        let mut writer = sheet.write_to(BufWriter::new(file))?;
        writer.flush()?;
        Ok(())
    })?;

    let flagged = records.iter().filter(|r| r.ambiguous).count();
    tracing::info!(
        path = %path.display(),
        sheet = sheet.name(),
        rows = sheet.len(),
        flagged,
        "Report written"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_numbered_path() {
        let path = Path::new("out/author_metrics.xlsx");
        assert_eq!(numbered_path(path, 0), PathBuf::from("out/author_metrics.xlsx"));
        assert_eq!(numbered_path(path, 1), PathBuf::from("out/author_metrics(1).xlsx"));
        assert_eq!(numbered_path(path, 12), PathBuf::from("out/author_metrics(12).xlsx"));
        assert_eq!(numbered_path(Path::new("report"), 2), PathBuf::from("report(2)"));
    }

    #[test]
    fn test_failed_write_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("report.xlsx");

        let err = write_new_file(&output, |mut file| {
            file.write_all(b"PK")?;
            Err(std::io::Error::other("disk full").into())
        })
        .unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert!(!output.exists());

        // The name is still free for the next attempt.
        let path = write_new_file(&output, |_| Ok(())).unwrap();
        assert_eq!(path, output);
    }

    #[test]
    fn test_record_cells_align_with_columns() {
        let cells = record_cells(&ResolvedRecord::unresolved("X"));
        assert_eq!(cells.len(), COLUMNS.len());
        assert_eq!(cells[0], Cell::Text("X".to_string()));
        assert!(cells[1..].iter().all(|c| *c == Cell::Empty));
    }
}
