// ============================================================================
// vidsweep-core/src/processing/mod.rs
// ============================================================================
//
// PROCESSING: The Per-file Engine Loop
//
// Files are handled strictly one at a time: classify, then (unless in
// discovery mode) copy or transcode, then record the outcome before moving
// on. Per-file problems become outcomes; only setup problems abort a run.
//
// KEY COMPONENTS:
// - necessity: Pure classification of a probed file
// - output: Collision-free destination paths
// - orchestrator: ffmpeg invocation and in-place finalization
// - process_file / process_tree: The engine itself

pub mod necessity;
pub mod orchestrator;
pub mod output;

pub use necessity::{ComplianceIssue, Decision, SkipReason, classify};
pub use orchestrator::{FfmpegTranscoder, TranscodeResult, Transcoder, finalize_in_place};

use crate::config::{OutputMode, TranscodeConfig};
use crate::discovery::PathCatalog;
use crate::error::{CoreError, CoreResult};
use crate::external::{EncodeTargets, MediaProbe};
use crate::media::{CodecProfile, FileTask, StreamActionPlan};
use crate::reporting::{Outcome, RunReport};

use std::fs;
use std::time::Instant;

/// Runs one file through classification and whatever action it calls for.
///
/// Excluded extensions are rejected before the probe runs. A probe error is
/// treated the same as a file with no streams.
pub fn process_file<P, T>(config: &TranscodeConfig, probe: &P, transcoder: &T, task: &FileTask) -> Outcome
where
    P: MediaProbe + ?Sized,
    T: Transcoder + ?Sized,
{
    if config.is_excluded(task.extension()) {
        log::debug!("Skipping {}: excluded extension", task.source_path().display());
        return Outcome::Skipped(SkipReason::ExcludedExtension);
    }

    let profile = match probe.probe_codecs(task.source_path()) {
        Ok(profile) => profile,
        Err(err) => {
            log::debug!("Probe failed for {}: {err}", task.source_path().display());
            CodecProfile::default()
        }
    };

    match classify(task, &profile, config) {
        Decision::Skip(SkipReason::NotProbeableMedia) => {
            log::debug!("Skipping: {}", CoreError::NotMedia(task.source_path().to_path_buf()));
            Outcome::Skipped(SkipReason::NotProbeableMedia)
        }
        Decision::Skip(reason) => {
            log::debug!("Skipping {}: {reason}", task.source_path().display());
            Outcome::Skipped(reason)
        }
        Decision::Flag { reason, .. } => {
            log::debug!("File {} {reason}", task.source_path().display());
            Outcome::DiscoveryFlagged(reason)
        }
        Decision::CopyOnly => copy_compliant(config, task),
        Decision::Transcode { plan, issues } => {
            log::info!(
                "Transcoding {}: {}",
                task.source_path().display(),
                necessity::describe_issues(&issues)
            );
            transcode(config, transcoder, task, &plan)
        }
    }
}

fn copy_compliant(config: &TranscodeConfig, task: &FileTask) -> Outcome {
    let OutputMode::Dedicated(output_root) = config.output_mode() else {
        log::debug!("{} is already compliant", task.source_path().display());
        return Outcome::CopiedOnly { destination: None };
    };

    let destination = output::resolve_copy_destination(output_root, task.base_name(), task.extension());
    match fs::copy(task.source_path(), &destination) {
        Ok(_) => {
            log::info!(
                "Copied compliant {} to {}",
                task.source_path().display(),
                destination.display()
            );
            Outcome::CopiedOnly {
                destination: Some(destination),
            }
        }
        Err(err) => {
            log::warn!("Failed to copy {}: {err}", task.source_path().display());
            Outcome::CopyFailed(format!("copy to {} failed: {err}", destination.display()))
        }
    }
}

fn transcode<T>(config: &TranscodeConfig, transcoder: &T, task: &FileTask, plan: &StreamActionPlan) -> Outcome
where
    T: Transcoder + ?Sized,
{
    let destination = output::resolve_destination(task.directory(), task.base_name(), config);
    let targets = EncodeTargets::from_config(config);

    match transcoder.transcode(task.source_path(), &destination, plan, &targets) {
        TranscodeResult::Success(written) => {
            if !config.in_place() {
                log::info!("Wrote {}", written.display());
                return Outcome::Transcoded { destination: written };
            }
            let final_path = output::in_place_final_path(task.directory(), task.base_name(), config.container());
            match finalize_in_place(task.source_path(), &written, &final_path, config.swap_strategy()) {
                Ok(()) => {
                    log::info!("Replaced {} with {}", task.source_path().display(), final_path.display());
                    Outcome::Transcoded { destination: final_path }
                }
                Err(err) => {
                    log::error!("In-place replacement of {} failed: {err}", task.source_path().display());
                    Outcome::TranscodeFailed(err.to_string())
                }
            }
        }
        TranscodeResult::Conflict(path) => {
            let err = CoreError::TranscodeConflict(path);
            log::warn!("Not transcoding {}: {err}", task.source_path().display());
            Outcome::TranscodeFailed(err.to_string())
        }
        TranscodeResult::EngineFailure(detail) => {
            log::warn!("Transcode of {} failed: {detail}", task.source_path().display());
            Outcome::TranscodeFailed(detail)
        }
    }
}

/// Walks the configured input tree and processes every file in it.
///
/// `observer` sees each file's outcome as soon as it is known. Fails only if
/// the input root is missing or the output root cannot be created.
pub fn process_tree<P, T, F>(
    config: &TranscodeConfig,
    probe: &P,
    transcoder: &T,
    mut observer: F,
) -> CoreResult<RunReport>
where
    P: MediaProbe + ?Sized,
    T: Transcoder + ?Sized,
    F: FnMut(&FileTask, &Outcome),
{
    if !config.input_dir().is_dir() {
        return Err(CoreError::InputNotFound(config.input_dir().to_path_buf()));
    }

    if let OutputMode::Dedicated(output_root) = config.output_mode() {
        fs::create_dir_all(output_root)?;
    }

    let start = Instant::now();
    let mut report = RunReport::new(config.discovery());

    for entry in PathCatalog::for_config(config) {
        for file_name in &entry.file_names {
            let task = FileTask::new(&entry.directory, file_name);
            let outcome = process_file(config, probe, transcoder, &task);
            report.record(task.source_path(), &outcome);
            observer(&task, &outcome);
        }
    }

    report.set_elapsed(start.elapsed());
    log::debug!(
        "Run finished: {} processed, {} transcoded",
        report.total_processed,
        report.transcoded_count
    );
    Ok(report)
}
