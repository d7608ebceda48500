//! Consistency checks run when a [`TranscodeConfig`] is built.

use super::{FFMPEG_LOG_LEVELS, OutputMode, TranscodeConfig};
use crate::error::{CoreError, CoreResult};

impl TranscodeConfig {
    /// Checks that the settings describe a runnable scan.
    ///
    /// Only the combination of values is checked here; whether the input
    /// directory exists is decided when the run starts.
    pub fn validate(&self) -> CoreResult<()> {
        if self.video_codec.is_empty() {
            return Err(invalid("target video codec must not be empty"));
        }
        if self.audio_codec.is_empty() {
            return Err(invalid("target audio codec must not be empty"));
        }
        if self.container.is_empty() {
            return Err(invalid("target container type must not be empty"));
        }
        if self.container.contains(['/', '\\']) {
            return Err(invalid(format!(
                "target container type '{}' must not contain path separators",
                self.container
            )));
        }
        if !FFMPEG_LOG_LEVELS.contains(&self.ffmpeg_log_level.as_str()) {
            return Err(invalid(format!(
                "unknown ffmpeg log level '{}' (expected one of: {})",
                self.ffmpeg_log_level,
                FFMPEG_LOG_LEVELS.join(", ")
            )));
        }
        if let OutputMode::Dedicated(output_dir) = self.output_mode() {
            if output_dir.as_os_str().is_empty() {
                return Err(invalid("output directory must not be empty"));
            }
            if output_dir == self.input_dir {
                return Err(invalid(format!(
                    "output directory '{}' must differ from the input directory (use in-place mode instead)",
                    output_dir.display()
                )));
            }
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> CoreError {
    CoreError::InvalidConfig(message.into())
}
