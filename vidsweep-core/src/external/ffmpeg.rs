//! Builds the ffmpeg invocation for a single transcode.
//!
//! Each stream is either passed through (`copy`) or re-encoded to the
//! configured target codec. The command always carries `-n`, so ffmpeg
//! refuses to replace an existing destination instead of clobbering it.

use crate::config::TranscodeConfig;
use crate::media::StreamActionPlan;

use ffmpeg_sidecar::command::FfmpegCommand;
use std::path::Path;

/// Target codecs and verbosity for a transcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeTargets {
    pub video_codec: String,
    pub audio_codec: String,
    pub log_level: String,
}

impl EncodeTargets {
    pub fn from_config(config: &TranscodeConfig) -> Self {
        Self {
            video_codec: config.video_codec().to_string(),
            audio_codec: config.audio_codec().to_string(),
            log_level: config.ffmpeg_log_level().to_string(),
        }
    }
}

/// Arguments for converting `source` into `destination` following `plan`.
///
/// Kept separate from [`build_transcode_command`] so the exact argument list
/// can be inspected without constructing a process.
pub fn transcode_args(
    source: &Path,
    destination: &Path,
    plan: &StreamActionPlan,
    targets: &EncodeTargets,
) -> Vec<String> {
    vec![
        "-loglevel".to_string(),
        targets.log_level.clone(),
        // -stats keeps progress lines flowing even at quiet log levels
        "-stats".to_string(),
        "-n".to_string(),
        "-i".to_string(),
        source.to_string_lossy().into_owned(),
        "-c:v".to_string(),
        plan.video.codec_arg(&targets.video_codec).to_string(),
        "-c:a".to_string(),
        plan.audio.codec_arg(&targets.audio_codec).to_string(),
        destination.to_string_lossy().into_owned(),
    ]
}

/// Builds the ffmpeg command for converting `source` into `destination`.
pub fn build_transcode_command(
    source: &Path,
    destination: &Path,
    plan: &StreamActionPlan,
    targets: &EncodeTargets,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.args(transcode_args(source, destination, plan, targets));
    cmd
}
