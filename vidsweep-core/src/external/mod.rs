// ============================================================================
// vidsweep-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffprobe and ffmpeg
//
// This module encapsulates every call out to the external media tools. The
// engine only sees two traits: `MediaProbe` for reading a file's codecs and
// `FfmpegSpawner` for launching a conversion. The default implementations use
// the ffprobe and ffmpeg-sidecar crates; tests substitute their own.
//
// KEY COMPONENTS:
// - MediaProbe / CrateFfprobeExecutor: codec inspection
// - FfmpegSpawner / SidecarSpawner: process launching, FfmpegRun results
// - Transcode command construction
// - Dependency checking

use crate::error::{CoreError, CoreResult};

use std::io;
use std::process::{Command, Stdio};

/// Contains ffmpeg argument building for transcodes
pub mod ffmpeg;

/// Contains traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Contains the codec probe trait and its ffprobe implementation
pub mod ffprobe_executor;

/// Test doubles for the ffmpeg process traits
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

pub use ffmpeg::{EncodeTargets, build_transcode_command};
pub use ffmpeg_executor::{FfmpegProcess, FfmpegRun, FfmpegSpawner, SidecarProcess, SidecarSpawner};
pub use ffprobe_executor::{CrateFfprobeExecutor, MediaProbe};

/// Checks if a required external command is available and executable.
///
/// Runs `cmd_name -version` with output discarded and only looks at whether
/// the process could be started.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(CoreError::OperationFailed(format!(
                "required tool '{cmd_name}' was not found on PATH"
            )))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{cmd_name}': {e}");
            Err(crate::error::command_start_error(cmd_name, e))
        }
    }
}
