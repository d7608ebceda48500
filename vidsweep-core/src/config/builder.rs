// ============================================================================
// vidsweep-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for TranscodeConfig
//
// This module implements the builder pattern for TranscodeConfig. The builder
// starts from the default profile, accepts overrides one at a time, and
// validates the combination when `build` is called. The resulting config is
// immutable.

use std::path::PathBuf;

use super::{SwapStrategy, TranscodeConfig, normalize_extension, to_extension_set, to_set};
use crate::error::CoreResult;

/// Builder for creating [`TranscodeConfig`] instances.
///
/// # Examples
///
/// ```rust
/// use vidsweep_core::config::{SwapStrategy, TranscodeConfigBuilder};
///
/// let config = TranscodeConfigBuilder::new()
///     .input_dir("/media/shows")
///     .in_place(true)
///     .recursive(false)
///     .video_codec("hevc")
///     .allowed_video_codecs(["hevc", "h264"])
///     .swap_strategy(SwapStrategy::RenameThenDelete)
///     .build()
///     .unwrap();
///
/// assert!(config.in_place());
/// assert!(config.video_codec_allowed("hevc"));
/// ```
#[derive(Debug, Clone)]
pub struct TranscodeConfigBuilder {
    config: TranscodeConfig,
}

impl Default for TranscodeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscodeConfigBuilder {
    /// Creates a builder holding the default settings.
    pub fn new() -> Self {
        Self {
            config: TranscodeConfig::default(),
        }
    }

    /// Walk subdirectories of the input directory (default: true).
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.config.recursive = recursive;
        self
    }

    /// Replace sources in their own directories instead of writing to the output directory.
    pub fn in_place(mut self, in_place: bool) -> Self {
        self.config.in_place = in_place;
        self
    }

    /// Report required conversions without touching any file.
    pub fn discovery(mut self, discovery: bool) -> Self {
        self.config.discovery = discovery;
        self
    }

    pub fn input_dir(mut self, input_dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = input_dir.into();
        self
    }

    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = output_dir.into();
        self
    }

    pub fn video_codec(mut self, codec: impl Into<String>) -> Self {
        self.config.video_codec = codec.into().trim().to_string();
        self
    }

    pub fn allowed_video_codecs<I, S>(mut self, codecs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.allowed_video_codecs = to_set(codecs);
        self
    }

    pub fn audio_codec(mut self, codec: impl Into<String>) -> Self {
        self.config.audio_codec = codec.into().trim().to_string();
        self
    }

    pub fn allowed_audio_codecs<I, S>(mut self, codecs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.allowed_audio_codecs = to_set(codecs);
        self
    }

    /// Container written for transcoded files, e.g. `"mp4"`.
    pub fn container(mut self, container: impl AsRef<str>) -> Self {
        self.config.container = normalize_extension(container.as_ref());
        self
    }

    pub fn allowed_containers<I, S>(mut self, containers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.allowed_containers = to_extension_set(containers);
        self
    }

    pub fn excluded_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.excluded_extensions = to_extension_set(extensions);
        self
    }

    pub fn ffmpeg_log_level(mut self, level: impl Into<String>) -> Self {
        self.config.ffmpeg_log_level = level.into().trim().to_lowercase();
        self
    }

    pub fn swap_strategy(mut self, strategy: SwapStrategy) -> Self {
        self.config.swap_strategy = strategy;
        self
    }

    /// Validates the settings and returns the finished configuration.
    pub fn build(self) -> CoreResult<TranscodeConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
