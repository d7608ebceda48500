// ============================================================================
// vidsweep-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Vidsweep Core Library
//
// This module defines the error type shared by every component of the core
// library. Per-file problems are represented here too, but the engine folds
// them into the run report instead of propagating them, so only setup errors
// ever abort a run.
//
// KEY COMPONENTS:
// - CoreError: Enum of every failure the library can report
// - CoreResult: Result alias used throughout the crate
// - Helper constructors for external command failures

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors produced by the vidsweep core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Directory traversal error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Input directory not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, io::Error),

    #[error("Failed waiting for command '{0}': {1}")]
    CommandWait(String, io::Error),

    #[error("Command '{cmd}' failed with status {status}: {stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("ffprobe output error: {0}")]
    FfprobeParse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The probe could not determine a video and an audio codec.
    #[error("{} is missing video and/or audio streams", .0.display())]
    NotMedia(PathBuf),

    /// The transcode destination already existed when ffmpeg was invoked.
    #[error("Destination {} already exists", .0.display())]
    TranscodeConflict(PathBuf),

    /// Finalizing an in-place transcode failed part-way through.
    #[error("In-place swap of {} failed at step '{step}': {source}", .path.display())]
    InPlaceSwap {
        path: PathBuf,
        step: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for vidsweep-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

pub(crate) fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

pub(crate) fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

pub(crate) fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status,
        stderr: stderr.into(),
    }
}
