//! Core library for sweeping a directory tree of videos into a target format.
//!
//! Every file under the input root is probed with ffprobe and compared against
//! allow-lists of video codecs, audio codecs, and containers. Compliant files
//! are copied (or left alone in place), the rest are converted with ffmpeg,
//! copying whichever streams are already acceptable. Discovery mode only
//! reports what would be converted.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidsweep_core::{
//!     CrateFfprobeExecutor, FfmpegTranscoder, SidecarSpawner, TranscodeConfig, process_tree,
//! };
//!
//! let config = TranscodeConfig::builder()
//!     .input_dir("/media/incoming")
//!     .output_dir("/media/ready")
//!     .allowed_video_codecs(["h264", "hevc"])
//!     .build()
//!     .unwrap();
//!
//! let transcoder = FfmpegTranscoder::new(SidecarSpawner);
//! let report = process_tree(&config, &CrateFfprobeExecutor::new(), &transcoder, |task, outcome| {
//!     println!("{}: {outcome:?}", task.source_path().display());
//! })
//! .unwrap();
//!
//! println!("Transcoded {} file(s)", report.transcoded_count);
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod media;
pub mod processing;
pub mod reporting;
pub mod utils;

// Re-exports for public API
pub use config::{OutputMode, SwapStrategy, TranscodeConfig, TranscodeConfigBuilder};
pub use discovery::{CatalogEntry, PathCatalog};
pub use error::{CoreError, CoreResult};
pub use external::{
    CrateFfprobeExecutor, EncodeTargets, FfmpegSpawner, MediaProbe, SidecarSpawner,
    check_dependency,
};
pub use media::{CodecProfile, FileTask, StreamAction, StreamActionPlan};
pub use processing::{
    Decision, FfmpegTranscoder, SkipReason, TranscodeResult, Transcoder, classify, process_file,
    process_tree,
};
pub use reporting::{DiscoveryEntry, Outcome, RunReport};
pub use utils::format_elapsed;
