//! End-of-run summary text and JSON export.

use super::RunReport;
use crate::error::CoreResult;
use crate::processing::necessity::SkipReason;
use crate::utils::{format_elapsed, plural_suffix};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Lines summarizing `report`, in display order.
///
/// Discovery runs list every flagged file; normal runs list counts only.
pub fn summary_lines(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::new();

    if report.discovery {
        let checked = report.total_processed as u64;
        let found = report.discovery_entries.len() as u64;
        lines.push(format!("{checked} file{} checked", plural_suffix(checked)));
        lines.push(format!(
            "Found {found} file{} requiring transcoding",
            plural_suffix(found)
        ));
        lines.extend(report.discovery_entries.iter().map(ToString::to_string));
    } else {
        let transcoded = report.transcoded_count as u64;
        lines.push(format!("Transcoded {transcoded} video{}", plural_suffix(transcoded)));
        if report.copied_count > 0 {
            lines.push(format!("Copied {} compliant file(s)", report.copied_count));
        }
        for reason in [SkipReason::ExcludedExtension, SkipReason::NotProbeableMedia] {
            let count = report.skipped_for(reason);
            if count > 0 {
                lines.push(format!("Skipped {count} file(s): {reason}"));
            }
        }
        if report.has_failures() {
            lines.push(format!("Failed {} file(s):", report.failures.len()));
            lines.extend(
                report
                    .failures
                    .iter()
                    .map(|f| format!("  {}: {}", f.path.display(), f.detail)),
            );
        }
    }

    lines.push(format!("Elapsed: {}", format_elapsed(report.elapsed_secs)));
    lines
}

/// Writes `report` to `path` as pretty-printed JSON.
pub fn write_json(report: &RunReport, path: &Path) -> CoreResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;
    log::debug!("Run report written to {}", path.display());
    Ok(())
}
