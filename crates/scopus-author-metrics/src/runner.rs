//! End-to-end run: names in, workbook out.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::AppResult;
use crate::report;
use crate::resolver::AuthorResolver;

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct RunOptions<'a> {
    /// Requested output path (renamed on collision).
    pub output: &'a Path,

    /// Worksheet name.
    pub sheet_name: &'a str,

    /// Maximum resolutions in flight.
    pub concurrency: usize,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Records with a profile link.
    pub found: usize,

    /// Records written.
    pub total: usize,

    /// Path actually written.
    pub output: PathBuf,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Found {} / {} authors to {}", self.found, self.total, self.output.display())
    }
}

/// Resolve every name and write the report.
///
/// Nothing is written when a remote call fails.
///
/// # Errors
///
/// Returns the first API failure, or a filesystem/packaging error.
pub async fn run(
    resolver: &AuthorResolver,
    names: &[String],
    options: &RunOptions<'_>,
) -> AppResult<RunSummary> {
    let records = resolver.resolve_all(names, options.concurrency).await?;
    let output = report::write_report(&records, options.output, options.sheet_name)?;

    Ok(RunSummary {
        found: records.iter().filter(|r| r.has_profile()).count(),
        total: records.len(),
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line() {
        let summary =
            RunSummary { found: 3, total: 5, output: PathBuf::from("author_metrics(1).xlsx") };
        assert_eq!(summary.to_string(), "Found 3 / 5 authors to author_metrics(1).xlsx");
    }
}
