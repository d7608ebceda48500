// vidsweep-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.
//
// Value flags are optional so that anything left unset falls through to the
// core library's defaults; `config::build_config` applies only what was given.

use clap::Parser;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Vidsweep: batch video format normalizer",
    long_about = "Walks a directory tree, probes every file with ffprobe, and copies or \
                  converts each video so its codecs and container match the allowed lists."
)]
pub struct Cli {
    /// Only process files directly inside the input directory
    #[arg(short = 'n', long)]
    pub non_recursive: bool,

    /// Replace each converted file next to its source instead of writing to the output directory
    #[arg(short = 'p', long)]
    pub in_place: bool,

    /// Report which files would be converted without changing anything
    #[arg(short = 'd', long)]
    pub discovery: bool,

    /// Directory to scan [default: ./input]
    #[arg(short = 'i', long, value_name = "DIR", env = "VIDSWEEP_INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory converted and copied files are written to [default: ./output]
    #[arg(short = 'o', long, value_name = "DIR", env = "VIDSWEEP_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Video codec to convert to [default: h264]
    #[arg(long, value_name = "CODEC")]
    pub video_codec: Option<String>,

    /// Comma-separated video codecs that are kept as-is [default: h264]
    #[arg(long, value_name = "CODECS", value_delimiter = ',')]
    pub allowed_video_codecs: Option<Vec<String>>,

    /// Audio codec to convert to [default: aac]
    #[arg(long, value_name = "CODEC")]
    pub audio_codec: Option<String>,

    /// Comma-separated audio codecs that are kept as-is [default: aac]
    #[arg(long, value_name = "CODECS", value_delimiter = ',')]
    pub allowed_audio_codecs: Option<Vec<String>>,

    /// Container (file extension) for converted files [default: mp4]
    #[arg(long, value_name = "EXT")]
    pub file_type: Option<String>,

    /// Comma-separated containers that are kept as-is [default: mp4,m4v,mkv]
    #[arg(long, value_name = "EXTS", value_delimiter = ',')]
    pub allowed_file_types: Option<Vec<String>>,

    /// Comma-separated extensions that are never probed
    #[arg(long, value_name = "EXTS", value_delimiter = ',')]
    pub excluded_file_types: Option<Vec<String>>,

    /// ffmpeg -loglevel value passed to every conversion [default: quiet]
    #[arg(long, value_name = "LEVEL")]
    pub ffmpeg_log_level: Option<String>,

    /// In place: move the converted file into place before deleting the source
    #[arg(long)]
    pub safe_swap: bool,

    /// Write a JSON run report to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Print the equivalent command line for these settings and exit
    #[arg(long)]
    pub print_command: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["vidsweep"]);
        assert!(!cli.non_recursive);
        assert!(!cli.in_place);
        assert!(!cli.discovery);
        assert!(cli.video_codec.is_none());
        assert!(cli.allowed_file_types.is_none());
        assert!(cli.report.is_none());
        assert!(!cli.safe_swap);
    }

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::parse_from(["vidsweep", "-n", "-p", "-d", "-i", "in", "-o", "out", "-v"]);
        assert!(cli.non_recursive);
        assert!(cli.in_place);
        assert!(cli.discovery);
        assert!(cli.verbose);
        assert_eq!(cli.input_dir, Some(PathBuf::from("in")));
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_parse_comma_separated_lists() {
        let cli = Cli::parse_from([
            "vidsweep",
            "--allowed-video-codecs",
            "h264,hevc",
            "--allowed-file-types",
            "mp4,mkv,webm",
            "--excluded-file-types",
            "nfo",
        ]);
        assert_eq!(
            cli.allowed_video_codecs,
            Some(vec!["h264".to_string(), "hevc".to_string()])
        );
        assert_eq!(
            cli.allowed_file_types,
            Some(vec!["mp4".to_string(), "mkv".to_string(), "webm".to_string()])
        );
        assert_eq!(cli.excluded_file_types, Some(vec!["nfo".to_string()]));
    }

    #[test]
    fn test_parse_targets_and_report() {
        let cli = Cli::parse_from([
            "vidsweep",
            "--video-codec",
            "hevc",
            "--audio-codec",
            "opus",
            "--file-type",
            "mkv",
            "--ffmpeg-log-level",
            "error",
            "--report",
            "run.json",
            "--safe-swap",
        ]);
        assert_eq!(cli.video_codec.as_deref(), Some("hevc"));
        assert_eq!(cli.audio_codec.as_deref(), Some("opus"));
        assert_eq!(cli.file_type.as_deref(), Some("mkv"));
        assert_eq!(cli.ffmpeg_log_level.as_deref(), Some("error"));
        assert_eq!(cli.report, Some(PathBuf::from("run.json")));
        assert!(cli.safe_swap);
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
