//! Configuration structures and constants for the vidsweep-core library.
//!
//! A [`TranscodeConfig`] is built once at startup (usually from command-line
//! flags) and passed by reference into every component. Nothing mutates it
//! after construction.

mod builder;
mod validation;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub use builder::TranscodeConfigBuilder;

// Default constants

/// Default directory scanned for video files.
pub const DEFAULT_INPUT_DIR: &str = "./input";

/// Default directory receiving transcoded and copied files.
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

/// Video codec used when a file's video stream must be converted.
pub const DEFAULT_VIDEO_CODEC: &str = "h264";

/// Video codecs that never require conversion.
pub const DEFAULT_ALLOWED_VIDEO_CODECS: &[&str] = &["h264"];

/// Audio codec used when a file's audio stream must be converted.
pub const DEFAULT_AUDIO_CODEC: &str = "aac";

/// Audio codecs that never require conversion.
pub const DEFAULT_ALLOWED_AUDIO_CODECS: &[&str] = &["aac"];

/// Container written for transcoded files.
pub const DEFAULT_CONTAINER: &str = "mp4";

/// Containers accepted as-is when both codecs are already allowed.
pub const DEFAULT_ALLOWED_CONTAINERS: &[&str] = &["mp4", "m4v", "mkv"];

/// Extensions skipped before any probing happens.
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[
    "py", "txt", "zip", "rar", "exe", "srt", "sub", "jpg", "jpeg", "png", "webp",
];

/// Verbosity passed to ffmpeg's `-loglevel`.
pub const DEFAULT_FFMPEG_LOG_LEVEL: &str = "quiet";

/// Log levels ffmpeg understands for `-loglevel`.
pub const FFMPEG_LOG_LEVELS: &[&str] = &[
    "quiet", "panic", "fatal", "error", "warning", "info", "verbose", "debug", "trace",
];

/// Where the results of a run end up.
///
/// Derived from the `discovery` and `in_place` flags. Discovery always wins,
/// so a discovery run never touches the file system even when `in_place` is
/// also set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode<'a> {
    /// Classify and report only.
    Discovery,
    /// Write next to the source under a temporary name, then replace the source.
    InPlace,
    /// Write into a dedicated output directory, leaving sources untouched.
    Dedicated(&'a Path),
}

/// How an in-place transcode replaces its source once ffmpeg succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwapStrategy {
    /// Remove the source, then rename the temporary output to its final name.
    ///
    /// An interruption between the two steps loses the source while the
    /// replacement still carries its temporary name.
    #[default]
    DeleteThenRename,
    /// Rename the temporary output over the final name, then remove the source
    /// if it lives at a different path.
    RenameThenDelete,
}

/// Process-wide settings for a scan.
///
/// Construct with [`TranscodeConfig::builder`] or take the defaults with
/// [`TranscodeConfig::default`].
///
/// # Examples
///
/// ```rust
/// use vidsweep_core::config::{OutputMode, TranscodeConfig};
///
/// let config = TranscodeConfig::builder()
///     .input_dir("/media/incoming")
///     .output_dir("/media/ready")
///     .allowed_containers(["mp4", "MKV"])
///     .build()
///     .unwrap();
///
/// assert!(config.container_allowed("mkv"));
/// assert!(matches!(config.output_mode(), OutputMode::Dedicated(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeConfig {
    pub(crate) recursive: bool,
    pub(crate) in_place: bool,
    pub(crate) discovery: bool,
    pub(crate) input_dir: PathBuf,
    pub(crate) output_dir: PathBuf,
    pub(crate) video_codec: String,
    pub(crate) allowed_video_codecs: BTreeSet<String>,
    pub(crate) audio_codec: String,
    pub(crate) allowed_audio_codecs: BTreeSet<String>,
    pub(crate) container: String,
    pub(crate) allowed_containers: BTreeSet<String>,
    pub(crate) excluded_extensions: BTreeSet<String>,
    pub(crate) ffmpeg_log_level: String,
    pub(crate) swap_strategy: SwapStrategy,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            in_place: false,
            discovery: false,
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            allowed_video_codecs: to_set(DEFAULT_ALLOWED_VIDEO_CODECS.iter().copied()),
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            allowed_audio_codecs: to_set(DEFAULT_ALLOWED_AUDIO_CODECS.iter().copied()),
            container: DEFAULT_CONTAINER.to_string(),
            allowed_containers: to_extension_set(DEFAULT_ALLOWED_CONTAINERS.iter().copied()),
            excluded_extensions: to_extension_set(DEFAULT_EXCLUDED_EXTENSIONS.iter().copied()),
            ffmpeg_log_level: DEFAULT_FFMPEG_LOG_LEVEL.to_string(),
            swap_strategy: SwapStrategy::default(),
        }
    }
}

impl TranscodeConfig {
    /// Starts a builder seeded with the default settings.
    pub fn builder() -> TranscodeConfigBuilder {
        TranscodeConfigBuilder::new()
    }

    /// Resolves the effective output mode from the mode flags.
    pub fn output_mode(&self) -> OutputMode<'_> {
        if self.discovery {
            OutputMode::Discovery
        } else if self.in_place {
            OutputMode::InPlace
        } else {
            OutputMode::Dedicated(&self.output_dir)
        }
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub fn in_place(&self) -> bool {
        self.in_place
    }

    pub fn discovery(&self) -> bool {
        self.discovery
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn video_codec(&self) -> &str {
        &self.video_codec
    }

    pub fn allowed_video_codecs(&self) -> &BTreeSet<String> {
        &self.allowed_video_codecs
    }

    pub fn audio_codec(&self) -> &str {
        &self.audio_codec
    }

    pub fn allowed_audio_codecs(&self) -> &BTreeSet<String> {
        &self.allowed_audio_codecs
    }

    /// Container (file extension) written for transcoded files.
    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn allowed_containers(&self) -> &BTreeSet<String> {
        &self.allowed_containers
    }

    pub fn excluded_extensions(&self) -> &BTreeSet<String> {
        &self.excluded_extensions
    }

    pub fn ffmpeg_log_level(&self) -> &str {
        &self.ffmpeg_log_level
    }

    pub fn swap_strategy(&self) -> SwapStrategy {
        self.swap_strategy
    }

    /// Whether files with this (already lowercased) extension are skipped unprobed.
    pub fn is_excluded(&self, extension: &str) -> bool {
        self.excluded_extensions.contains(extension)
    }

    pub fn video_codec_allowed(&self, codec: &str) -> bool {
        self.allowed_video_codecs.contains(codec)
    }

    pub fn audio_codec_allowed(&self, codec: &str) -> bool {
        self.allowed_audio_codecs.contains(codec)
    }

    pub fn container_allowed(&self, extension: &str) -> bool {
        self.allowed_containers.contains(extension)
    }
}

/// Lowercases an extension and strips any leading dots (`".MKV"` -> `"mkv"`).
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}

pub(crate) fn to_set<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|value| value.as_ref().trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

pub(crate) fn to_extension_set<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|value| normalize_extension(value.as_ref()))
        .filter(|value| !value.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_profile() {
        let config = TranscodeConfig::default();
        assert!(config.recursive());
        assert!(!config.in_place());
        assert!(!config.discovery());
        assert_eq!(config.video_codec(), "h264");
        assert_eq!(config.audio_codec(), "aac");
        assert_eq!(config.container(), "mp4");
        assert!(config.container_allowed("m4v"));
        assert!(config.is_excluded("srt"));
        assert!(!config.is_excluded("mkv"));
        assert_eq!(config.ffmpeg_log_level(), "quiet");
        assert_eq!(config.swap_strategy(), SwapStrategy::DeleteThenRename);
    }

    #[test]
    fn test_discovery_wins_over_in_place() {
        let config = TranscodeConfig {
            discovery: true,
            in_place: true,
            ..TranscodeConfig::default()
        };
        assert_eq!(config.output_mode(), OutputMode::Discovery);
    }

    #[test]
    fn test_output_mode_dedicated_carries_root() {
        let config = TranscodeConfig::default();
        assert_eq!(
            config.output_mode(),
            OutputMode::Dedicated(Path::new(DEFAULT_OUTPUT_DIR))
        );
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension(".MKV"), "mkv");
        assert_eq!(normalize_extension(" Mp4 "), "mp4");
        assert_eq!(normalize_extension("avi"), "avi");
    }

    #[test]
    fn test_codec_matching_is_exact() {
        let config = TranscodeConfig::default();
        assert!(config.video_codec_allowed("h264"));
        assert!(!config.video_codec_allowed("H264"));
        assert!(!config.audio_codec_allowed("mp3"));
    }
}
