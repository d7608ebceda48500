// ============================================================================
// vidsweep-core/src/processing/orchestrator.rs
// ============================================================================
//
// TRANSCODE ORCHESTRATION: Running ffmpeg and Finalizing Outputs
//
// This module turns a transcode decision into an ffmpeg run and, for in-place
// mode, swaps the finished output in for its source. Failures are classified
// into a `TranscodeResult` instead of being raised, so the engine can record
// them and move on to the next file.
//
// KEY COMPONENTS:
// - Transcoder: Boundary trait over the conversion engine
// - FfmpegTranscoder: Implementation driving ffmpeg through an FfmpegSpawner
// - finalize_in_place: Source replacement after a successful in-place run

use crate::config::SwapStrategy;
use crate::error::{CoreError, CoreResult};
use crate::external::{EncodeTargets, FfmpegProcess, FfmpegSpawner, build_transcode_command};
use crate::media::StreamActionPlan;
use crate::processing::output::is_occupied;

use std::fs;
use std::path::{Path, PathBuf};

/// Classified result of one conversion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscodeResult {
    /// The output was written to this path.
    Success(PathBuf),
    /// The destination already existed; nothing was written.
    Conflict(PathBuf),
    /// The engine failed for another reason.
    EngineFailure(String),
}

/// Converts one file into another following a stream plan.
///
/// Implementations must never overwrite an existing destination.
pub trait Transcoder {
    fn transcode(
        &self,
        source: &Path,
        destination: &Path,
        plan: &StreamActionPlan,
        targets: &EncodeTargets,
    ) -> TranscodeResult;
}

/// [`Transcoder`] that runs ffmpeg.
#[derive(Debug, Clone, Default)]
pub struct FfmpegTranscoder<S: FfmpegSpawner> {
    spawner: S,
}

impl<S: FfmpegSpawner> FfmpegTranscoder<S> {
    pub fn new(spawner: S) -> Self {
        Self { spawner }
    }

    fn run(
        &self,
        source: &Path,
        destination: &Path,
        plan: &StreamActionPlan,
        targets: &EncodeTargets,
    ) -> CoreResult<TranscodeResult> {
        let cmd = build_transcode_command(source, destination, plan, targets);
        let run = self.spawner.spawn(cmd)?.finish()?;

        if run.succeeded() {
            if !destination.exists() {
                return Ok(TranscodeResult::EngineFailure(format!(
                    "ffmpeg exited successfully but {} was not written",
                    destination.display()
                )));
            }
            return Ok(TranscodeResult::Success(destination.to_path_buf()));
        }

        if run.refused_existing_output() {
            return Ok(TranscodeResult::Conflict(destination.to_path_buf()));
        }
        Ok(TranscodeResult::EngineFailure(run.failure_detail()))
    }
}

impl<S: FfmpegSpawner> Transcoder for FfmpegTranscoder<S> {
    fn transcode(
        &self,
        source: &Path,
        destination: &Path,
        plan: &StreamActionPlan,
        targets: &EncodeTargets,
    ) -> TranscodeResult {
        if is_occupied(destination) {
            return TranscodeResult::Conflict(destination.to_path_buf());
        }

        log::debug!(
            "Transcoding {} -> {} (video: {}, audio: {})",
            source.display(),
            destination.display(),
            plan.video.codec_arg(&targets.video_codec),
            plan.audio.codec_arg(&targets.audio_codec)
        );

        match self.run(source, destination, plan, targets) {
            Ok(result) => result,
            Err(err) => TranscodeResult::EngineFailure(err.to_string()),
        }
    }
}

/// Replaces `source` with the finished `temp_output`, which ends up at `final_path`.
pub fn finalize_in_place(
    source: &Path,
    temp_output: &Path,
    final_path: &Path,
    strategy: SwapStrategy,
) -> CoreResult<()> {
    match strategy {
        SwapStrategy::DeleteThenRename => {
            fs::remove_file(source).map_err(|e| swap_error(source, "remove source", e))?;
            fs::rename(temp_output, final_path)
                .map_err(|e| swap_error(temp_output, "rename output", e))?;
        }
        SwapStrategy::RenameThenDelete => {
            fs::rename(temp_output, final_path)
                .map_err(|e| swap_error(temp_output, "rename output", e))?;
            if source != final_path {
                fs::remove_file(source).map_err(|e| swap_error(source, "remove source", e))?;
            }
        }
    }
    Ok(())
}

fn swap_error(path: &Path, step: &'static str, source: std::io::Error) -> CoreError {
    CoreError::InPlaceSwap {
        path: path.to_path_buf(),
        step,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::MockFfmpegSpawner;
    use crate::media::StreamAction;
    use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
    use std::fs::File;
    use tempfile::tempdir;

    fn targets() -> EncodeTargets {
        EncodeTargets {
            video_codec: "h264".to_string(),
            audio_codec: "aac".to_string(),
            log_level: "quiet".to_string(),
        }
    }

    fn convert_video() -> StreamActionPlan {
        StreamActionPlan {
            video: StreamAction::Convert,
            audio: StreamAction::Copy,
        }
    }

    #[test]
    fn test_success_writes_destination() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("movie.mkv");
        let destination = dir.path().join("movie.mp4");
        File::create(&source).unwrap();

        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("movie.mp4", vec![], true);
        let transcoder = FfmpegTranscoder::new(spawner.clone());

        let result = transcoder.transcode(&source, &destination, &convert_video(), &targets());
        assert_eq!(result, TranscodeResult::Success(destination.clone()));
        assert!(destination.exists());

        let calls = spawner.get_received_calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].iter().any(|a| a == "-n"));
        assert!(calls[0].iter().any(|a| a == "h264"));
    }

    #[test]
    fn test_existing_destination_is_conflict_without_spawning() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("movie.mkv");
        let destination = dir.path().join("movie.mp4");
        File::create(&source).unwrap();
        fs::write(&destination, b"keep me").unwrap();

        let spawner = MockFfmpegSpawner::new();
        let transcoder = FfmpegTranscoder::new(spawner.clone());

        let result = transcoder.transcode(&source, &destination, &convert_video(), &targets());
        assert_eq!(result, TranscodeResult::Conflict(destination.clone()));
        assert!(spawner.get_received_calls().is_empty());
        assert_eq!(fs::read(&destination).unwrap(), b"keep me");
    }

    #[test]
    fn test_already_exists_from_ffmpeg_is_conflict() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("movie.mkv");
        let destination = dir.path().join("movie.mp4");
        File::create(&source).unwrap();

        let spawner = MockFfmpegSpawner::new();
        spawner.add_exit_error_expectation(
            "movie.mp4",
            vec![FfmpegEvent::Error(
                "File 'movie.mp4' already exists. Exiting.".to_string(),
            )],
            1,
        );
        let transcoder = FfmpegTranscoder::new(spawner);

        let result = transcoder.transcode(&source, &destination, &convert_video(), &targets());
        assert_eq!(result, TranscodeResult::Conflict(destination));
    }

    #[test]
    fn test_nonzero_exit_is_engine_failure() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("broken.mkv");
        let destination = dir.path().join("broken.mp4");
        File::create(&source).unwrap();

        let spawner = MockFfmpegSpawner::new();
        spawner.add_exit_error_expectation(
            "broken.mp4",
            vec![FfmpegEvent::Log(
                LogLevel::Error,
                "Invalid data found when processing input".to_string(),
            )],
            1,
        );
        let transcoder = FfmpegTranscoder::new(spawner);

        match transcoder.transcode(&source, &destination, &convert_video(), &targets()) {
            TranscodeResult::EngineFailure(detail) => {
                assert!(detail.contains("Invalid data found"));
            }
            other => panic!("expected engine failure, got {other:?}"),
        }
    }

    #[test]
    fn test_spawn_error_is_engine_failure() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("movie.mkv");
        let destination = dir.path().join("movie.mp4");

        let spawner = MockFfmpegSpawner::new();
        spawner.add_spawn_error_expectation(
            "movie.mp4",
            CoreError::OperationFailed("ffmpeg missing".to_string()),
        );
        let transcoder = FfmpegTranscoder::new(spawner);

        assert!(matches!(
            transcoder.transcode(&source, &destination, &convert_video(), &targets()),
            TranscodeResult::EngineFailure(_)
        ));
    }

    #[test]
    fn test_delete_then_rename_replaces_source() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("movie.mkv");
        let temp = dir.path().join("movie-TEMP.mp4");
        let final_path = dir.path().join("movie.mp4");
        fs::write(&source, b"original").unwrap();
        fs::write(&temp, b"converted").unwrap();

        finalize_in_place(&source, &temp, &final_path, SwapStrategy::DeleteThenRename).unwrap();

        assert!(!source.exists());
        assert!(!temp.exists());
        assert_eq!(fs::read(&final_path).unwrap(), b"converted");
    }

    #[test]
    fn test_rename_then_delete_with_same_final_name() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("movie.mp4");
        let temp = dir.path().join("movie-TEMP.mp4");
        fs::write(&source, b"original").unwrap();
        fs::write(&temp, b"converted").unwrap();

        finalize_in_place(&source, &temp, &source, SwapStrategy::RenameThenDelete).unwrap();

        assert!(!temp.exists());
        assert_eq!(fs::read(&source).unwrap(), b"converted");
    }

    #[test]
    fn test_swap_failure_reports_step() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("missing.mkv");
        let temp = dir.path().join("missing-TEMP.mp4");
        fs::write(&temp, b"converted").unwrap();

        let err = finalize_in_place(
            &source,
            &temp,
            &dir.path().join("missing.mp4"),
            SwapStrategy::DeleteThenRename,
        )
        .unwrap_err();

        assert!(matches!(err, CoreError::InPlaceSwap { step: "remove source", .. }));
        assert!(temp.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_destination_is_conflict() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("movie.mkv");
        let destination = dir.path().join("movie.mp4");
        File::create(&source).unwrap();
        std::os::unix::fs::symlink(dir.path().join("elsewhere.mp4"), &destination).unwrap();

        let spawner = MockFfmpegSpawner::new();
        let transcoder = FfmpegTranscoder::new(spawner.clone());

        let result = transcoder.transcode(&source, &destination, &convert_video(), &targets());
        assert_eq!(result, TranscodeResult::Conflict(destination));
        assert!(spawner.get_received_calls().is_empty());
        assert!(!dir.path().join("elsewhere.mp4").exists());
    }
}
