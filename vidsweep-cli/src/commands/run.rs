// ============================================================================
// vidsweep-cli/src/commands/run.rs
// ============================================================================
//
// RUN COMMAND: One Full Sweep of the Input Tree
//
// Resolves the configuration, checks for ffmpeg/ffprobe, hands the tree to
// the core engine with a spinner as the per-file observer, then prints the
// summary and optionally writes the JSON report.

use crate::cli::Cli;
use crate::config::{build_config, equivalent_invocation};
use crate::error::{CliErrorContext, CliResult};
use crate::terminal;

use vidsweep_core::config::{OutputMode, SwapStrategy, TranscodeConfig};
use vidsweep_core::reporting::{Outcome, summary_lines, write_json};
use vidsweep_core::{
    CrateFfprobeExecutor, FfmpegTranscoder, MediaProbe, SidecarSpawner, Transcoder,
    check_dependency, process_tree,
};

/// Exit code for a completed run with no failed files.
pub const EXIT_OK: i32 = 0;
/// Exit code for a completed run in which at least one file failed.
pub const EXIT_FILE_FAILURES: i32 = 2;

/// Executes the sweep described by `cli` and returns the process exit code.
pub fn run(cli: &Cli) -> CliResult<i32> {
    run_with(cli, &CrateFfprobeExecutor::new(), &FfmpegTranscoder::new(SidecarSpawner))
}

/// Like [`run`], with the codec probe and the transcoder supplied by the caller.
pub fn run_with<P, T>(cli: &Cli, probe: &P, transcoder: &T) -> CliResult<i32>
where
    P: MediaProbe + ?Sized,
    T: Transcoder + ?Sized,
{
    let config = build_config(cli)?;

    if cli.print_command {
        println!("{}", equivalent_invocation(&config));
        return Ok(EXIT_OK);
    }

    print_configuration(&config);
    check_tools(&config);

    let mut spinner = terminal::ScanSpinner::new();

    let report = process_tree(&config, probe, transcoder, |task, outcome| {
        spinner.tick(&task.source_path().display().to_string());
        match outcome {
            Outcome::TranscodeFailed(detail) | Outcome::CopyFailed(detail) => {
                spinner.suspend(|| {
                    terminal::print_warning(&format!("{}: {detail}", task.source_path().display()))
                });
            }
            Outcome::Transcoded { destination } => {
                spinner.suspend(|| {
                    terminal::print_success(&format!(
                        "{} -> {}",
                        task.source_path().display(),
                        destination.display()
                    ))
                });
            }
            _ => {}
        }
    });
    spinner.finish();
    let report = report?;

    terminal::print_section("Summary");
    for line in summary_lines(&report) {
        terminal::print_item(&line);
    }

    if let Some(path) = &cli.report {
        write_json(&report, path)
            .cli_with_context(|| format!("Failed to write run report to {}", path.display()))?;
        terminal::print_status("Report", &path.display().to_string(), false);
    }

    Ok(if report.has_failures() {
        EXIT_FILE_FAILURES
    } else {
        EXIT_OK
    })
}

fn print_configuration(config: &TranscodeConfig) {
    terminal::print_section("Configuration");
    terminal::print_status("Input", &config.input_dir().display().to_string(), true);

    let mode = match config.output_mode() {
        OutputMode::Discovery => "discovery (no changes)".to_string(),
        OutputMode::InPlace => match config.swap_strategy() {
            SwapStrategy::DeleteThenRename => "in place".to_string(),
            SwapStrategy::RenameThenDelete => "in place (safe swap)".to_string(),
        },
        OutputMode::Dedicated(output) => output.display().to_string(),
    };
    terminal::print_status("Output", &mode, true);
    terminal::print_status(
        "Recursive",
        if config.recursive() { "yes" } else { "no" },
        false,
    );
    terminal::print_status(
        "Target",
        &format!(
            "{} / {} in .{}",
            config.video_codec(),
            config.audio_codec(),
            config.container()
        ),
        false,
    );
}

/// Warns about missing tools; the run still proceeds and every probe or
/// conversion that needs them is recorded as a per-file result.
fn check_tools(config: &TranscodeConfig) {
    let mut tools = vec!["ffprobe"];
    if !config.discovery() {
        tools.push("ffmpeg");
    }
    for tool in tools {
        if let Err(e) = check_dependency(tool) {
            terminal::print_warning(&e.to_string());
        }
    }
}
