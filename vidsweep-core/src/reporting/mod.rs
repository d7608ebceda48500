// ============================================================================
// vidsweep-core/src/reporting/mod.rs
// ============================================================================
//
// REPORTING: Per-file Outcomes and Run Totals
//
// Every discovered file produces exactly one `Outcome`. The engine folds
// outcomes into a `RunReport`, which only ever grows during a run and is
// handed back to the caller for display or serialization at the end.
//
// KEY COMPONENTS:
// - Outcome: What happened to one file
// - RunReport: Counters, failures, and the discovery list
// - summary: Human-readable summary lines and JSON export

pub mod summary;

pub use summary::{summary_lines, write_json};

use crate::processing::necessity::SkipReason;

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skipped(SkipReason),
    /// Already compliant. `destination` is the copy in dedicated-output mode
    /// and `None` in place, where the file is left untouched.
    CopiedOnly { destination: Option<PathBuf> },
    Transcoded { destination: PathBuf },
    TranscodeFailed(String),
    CopyFailed(String),
    /// Discovery mode: would be transcoded for the given reason.
    DiscoveryFlagged(String),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::TranscodeFailed(_) | Outcome::CopyFailed(_))
    }
}

/// A file discovery mode found to need transcoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryEntry {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for DiscoveryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "File {} {}", self.path.display(), self.reason)
    }
}

/// A file whose copy or transcode failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub path: PathBuf,
    pub detail: String,
}

/// Totals for one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub discovery: bool,
    pub started_at: DateTime<Local>,
    pub elapsed_secs: u64,
    /// Every discovered file, excluded and non-media files included.
    pub total_processed: usize,
    /// Successful transcodes only.
    pub transcoded_count: usize,
    pub copied_count: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
    pub failures: Vec<FailureRecord>,
    pub discovery_entries: Vec<DiscoveryEntry>,
}

impl RunReport {
    pub fn new(discovery: bool) -> Self {
        Self {
            discovery,
            started_at: Local::now(),
            elapsed_secs: 0,
            total_processed: 0,
            transcoded_count: 0,
            copied_count: 0,
            skipped: BTreeMap::new(),
            failures: Vec::new(),
            discovery_entries: Vec::new(),
        }
    }

    /// Folds the outcome for `source` into the totals.
    pub fn record(&mut self, source: &Path, outcome: &Outcome) {
        self.total_processed += 1;
        match outcome {
            Outcome::Skipped(reason) => *self.skipped.entry(*reason).or_insert(0) += 1,
            Outcome::CopiedOnly { .. } => self.copied_count += 1,
            Outcome::Transcoded { .. } => self.transcoded_count += 1,
            Outcome::TranscodeFailed(detail) | Outcome::CopyFailed(detail) => {
                self.failures.push(FailureRecord {
                    path: source.to_path_buf(),
                    detail: detail.clone(),
                });
            }
            Outcome::DiscoveryFlagged(reason) => self.discovery_entries.push(DiscoveryEntry {
                path: source.to_path_buf(),
                reason: reason.clone(),
            }),
        }
    }

    /// Stores the run time rounded to the nearest second.
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed_secs = elapsed.as_secs_f64().round() as u64;
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
