//! FFprobe integration for codec inspection
//!
//! This module defines the [`MediaProbe`] boundary the engine uses to learn a
//! file's primary video and audio codecs, and its default implementation on
//! top of the `ffprobe` crate.

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use crate::media::CodecProfile;

use ffprobe::{FfProbe, FfProbeError, ffprobe};
use std::path::Path;

/// Reads the primary codecs of a media file.
///
/// Callers treat any error the same as a profile with both codecs absent.
pub trait MediaProbe {
    fn probe_codecs(&self, input_path: &Path) -> CoreResult<CodecProfile>;
}

/// [`MediaProbe`] backed by the `ffprobe` binary via the `ffprobe` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrateFfprobeExecutor;

impl CrateFfprobeExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl MediaProbe for CrateFfprobeExecutor {
    fn probe_codecs(&self, input_path: &Path) -> CoreResult<CodecProfile> {
        log::debug!(
            "Running ffprobe (via crate) for codecs on: {}",
            input_path.display()
        );
        match ffprobe(input_path) {
            Ok(metadata) => Ok(codec_profile_from(&metadata)),
            Err(err) => {
                log::debug!(
                    "ffprobe failed for codecs on {}: {:?}",
                    input_path.display(),
                    err
                );
                Err(map_ffprobe_error(err, "codecs"))
            }
        }
    }
}

/// Picks the codec of the first video stream and the first audio stream.
fn codec_profile_from(metadata: &FfProbe) -> CodecProfile {
    let first_codec = |kind: &str| {
        metadata
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some(kind))
            .and_then(|s| s.codec_name.clone())
            .filter(|name| !name.is_empty())
    };

    CodecProfile {
        video_codec: first_codec("video"),
        audio_codec: first_codec("audio"),
    }
}

fn map_ffprobe_error(err: FfProbeError, context: &str) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error(format!("ffprobe ({context})"), io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error(format!("ffprobe ({context})"), output.status, stderr)
        }
        FfProbeError::Deserialize(err) => {
            CoreError::FfprobeParse(format!("ffprobe {context} output deserialization: {err}"))
        }
        _ => CoreError::FfprobeParse(format!("Unknown ffprobe error during {context}: {err:?}")),
    }
}
