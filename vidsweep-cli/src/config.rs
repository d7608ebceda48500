// vidsweep-cli/src/config.rs
//
// Turns parsed flags into a core `TranscodeConfig`, and back into the
// shortest equivalent command line for `--print-command`.

use crate::cli::Cli;
use crate::error::CliResult;

use std::collections::BTreeSet;
use std::path::Path;
use vidsweep_core::config::{SwapStrategy, TranscodeConfig};

/// Builds the run configuration, leaving unset flags at the core defaults.
pub fn build_config(cli: &Cli) -> CliResult<TranscodeConfig> {
    let mut builder = TranscodeConfig::builder()
        .recursive(!cli.non_recursive)
        .in_place(cli.in_place)
        .discovery(cli.discovery);

    if cli.safe_swap {
        builder = builder.swap_strategy(SwapStrategy::RenameThenDelete);
    }
    if let Some(dir) = &cli.input_dir {
        builder = builder.input_dir(dir);
    }
    if let Some(dir) = &cli.output_dir {
        builder = builder.output_dir(dir);
    }
    if let Some(codec) = &cli.video_codec {
        builder = builder.video_codec(codec);
    }
    if let Some(codecs) = &cli.allowed_video_codecs {
        builder = builder.allowed_video_codecs(codecs);
    }
    if let Some(codec) = &cli.audio_codec {
        builder = builder.audio_codec(codec);
    }
    if let Some(codecs) = &cli.allowed_audio_codecs {
        builder = builder.allowed_audio_codecs(codecs);
    }
    if let Some(container) = &cli.file_type {
        builder = builder.container(container);
    }
    if let Some(containers) = &cli.allowed_file_types {
        builder = builder.allowed_containers(containers);
    }
    if let Some(extensions) = &cli.excluded_file_types {
        builder = builder.excluded_extensions(extensions);
    }
    if let Some(level) = &cli.ffmpeg_log_level {
        builder = builder.ffmpeg_log_level(level);
    }

    builder.build()
}

/// The `vidsweep` invocation reproducing `config`, listing only non-default settings.
pub fn equivalent_invocation(config: &TranscodeConfig) -> String {
    let defaults = TranscodeConfig::default();
    let mut args = vec!["vidsweep".to_string()];

    if !config.recursive() {
        args.push("--non-recursive".to_string());
    }
    if config.in_place() {
        args.push("--in-place".to_string());
    }
    if config.discovery() {
        args.push("--discovery".to_string());
    }
    if config.input_dir() != defaults.input_dir() {
        push_path(&mut args, "--input-dir", config.input_dir());
    }
    if config.output_dir() != defaults.output_dir() {
        push_path(&mut args, "--output-dir", config.output_dir());
    }
    if config.video_codec() != defaults.video_codec() {
        push_value(&mut args, "--video-codec", config.video_codec());
    }
    if config.allowed_video_codecs() != defaults.allowed_video_codecs() {
        push_list(&mut args, "--allowed-video-codecs", config.allowed_video_codecs());
    }
    if config.audio_codec() != defaults.audio_codec() {
        push_value(&mut args, "--audio-codec", config.audio_codec());
    }
    if config.allowed_audio_codecs() != defaults.allowed_audio_codecs() {
        push_list(&mut args, "--allowed-audio-codecs", config.allowed_audio_codecs());
    }
    if config.container() != defaults.container() {
        push_value(&mut args, "--file-type", config.container());
    }
    if config.allowed_containers() != defaults.allowed_containers() {
        push_list(&mut args, "--allowed-file-types", config.allowed_containers());
    }
    if config.excluded_extensions() != defaults.excluded_extensions() {
        push_list(&mut args, "--excluded-file-types", config.excluded_extensions());
    }
    if config.ffmpeg_log_level() != defaults.ffmpeg_log_level() {
        push_value(&mut args, "--ffmpeg-log-level", config.ffmpeg_log_level());
    }
    if config.swap_strategy() != defaults.swap_strategy() {
        args.push("--safe-swap".to_string());
    }

    args.join(" ")
}

fn push_value(args: &mut Vec<String>, flag: &str, value: &str) {
    args.push(flag.to_string());
    args.push(quote(value));
}

fn push_path(args: &mut Vec<String>, flag: &str, path: &Path) {
    push_value(args, flag, &path.to_string_lossy());
}

fn push_list(args: &mut Vec<String>, flag: &str, values: &BTreeSet<String>) {
    let joined = values.iter().map(String::as_str).collect::<Vec<_>>().join(",");
    push_value(args, flag, &joined);
}

/// Single-quotes a value for a POSIX shell when it needs it.
fn quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./,:=+@".contains(c));
    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
