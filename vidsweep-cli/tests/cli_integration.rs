use assert_cmd::Command;
use clap::Parser;
use predicates::prelude::*;
use predicates::str::contains;
use std::error::Error;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use vidsweep_cli::commands::run::{EXIT_FILE_FAILURES, EXIT_OK};
use vidsweep_cli::{Cli, run_with};
use vidsweep_core::external::mocks::{MockFfmpegSpawner, MockMediaProbe};
use vidsweep_core::{CodecProfile, FfmpegTranscoder};

// Helper to get the compiled binary with a predictable environment
fn vidsweep_cmd() -> Command {
    let mut cmd = Command::cargo_bin("vidsweep").expect("Failed to find vidsweep binary");
    cmd.env_remove("VIDSWEEP_INPUT_DIR")
        .env_remove("VIDSWEEP_OUTPUT_DIR")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_discovery_with_no_media() -> Result<(), Box<dyn Error>> {
    let input_dir = tempdir()?;
    fs::write(input_dir.path().join("notes.txt"), "not a video")?;
    fs::write(input_dir.path().join("fake.mkv"), "dummy content")?;

    vidsweep_cmd()
        .arg("--discovery")
        .arg("--input-dir")
        .arg(input_dir.path())
        .assert()
        .success()
        .stdout(contains("2 files checked"))
        .stdout(contains("Found 0 files requiring transcoding"));

    // Discovery never writes anything next to the sources
    assert_eq!(fs::read_dir(input_dir.path())?.count(), 2);
    Ok(())
}

#[test]
fn test_missing_input_dir_is_fatal() -> Result<(), Box<dyn Error>> {
    let parent = tempdir()?;
    let missing = parent.path().join("does-not-exist");

    vidsweep_cmd()
        .arg("--input-dir")
        .arg(&missing)
        .arg("--output-dir")
        .arg(parent.path().join("out"))
        .assert()
        .code(1)
        .stderr(contains("Input directory not found"));

    assert!(!parent.path().join("out").exists());
    Ok(())
}

#[test]
fn test_output_dir_is_created() -> Result<(), Box<dyn Error>> {
    let input_dir = tempdir()?;
    let parent = tempdir()?;
    let output_dir = parent.path().join("nested").join("out");
    fs::write(input_dir.path().join("cover.jpg"), "not a video")?;

    vidsweep_cmd()
        .arg("-i")
        .arg(input_dir.path())
        .arg("-o")
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(contains("Transcoded 0 videos"))
        .stdout(contains("Skipped 1 file(s): excluded-extension"));

    assert!(output_dir.is_dir());
    assert_eq!(fs::read_dir(&output_dir)?.count(), 0);
    Ok(())
}

#[test]
fn test_report_is_written() -> Result<(), Box<dyn Error>> {
    let input_dir = tempdir()?;
    let report_dir = tempdir()?;
    let report_path = report_dir.path().join("run.json");
    fs::write(input_dir.path().join("a.zip"), "archive")?;
    fs::create_dir(input_dir.path().join("sub"))?;
    fs::write(input_dir.path().join("sub").join("b.srt"), "subs")?;

    vidsweep_cmd()
        .arg("-d")
        .arg("-i")
        .arg(input_dir.path())
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success();

    let report = fs::read_to_string(&report_path)?;
    assert!(report.contains("\"total_processed\": 2"));
    assert!(report.contains("\"discovery\": true"));
    Ok(())
}

#[test]
fn test_print_command_lists_non_default_flags() {
    vidsweep_cmd()
        .args(["--print-command", "-d", "-n", "--allowed-video-codecs", "hevc,h264"])
        .args(["-i", "./input", "-o", "./output"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "vidsweep --non-recursive --discovery --allowed-video-codecs h264,hevc\n",
        ));
}

#[test]
fn test_invalid_log_level_is_rejected() {
    vidsweep_cmd()
        .args(["--ffmpeg-log-level", "chatty", "--print-command"])
        .assert()
        .code(1)
        .stderr(contains("unknown ffmpeg log level"));
}

#[test]
fn test_same_input_and_output_is_rejected() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    vidsweep_cmd()
        .arg("-i")
        .arg(dir.path())
        .arg("-o")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(contains("must differ from the input directory"));
    Ok(())
}

fn sweep_args(input: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "vidsweep".into(),
        "--input-dir".into(),
        input.into(),
        "--output-dir".into(),
        output.into(),
    ]
}

#[test]
fn test_failed_transcode_exits_with_file_failure_code() -> Result<(), Box<dyn Error>> {
    let input_dir = tempdir()?;
    let output_dir = tempdir()?;
    let broken = input_dir.path().join("broken.mkv");
    let fine = input_dir.path().join("fine.mp4");
    fs::write(&broken, "dummy content")?;
    fs::write(&fine, "dummy content")?;

    let probe = MockMediaProbe::new();
    probe.expect_profile(&broken, CodecProfile::new("hevc", "aac"));
    probe.expect_profile(&fine, CodecProfile::new("h264", "aac"));
    let spawner = MockFfmpegSpawner::new();
    spawner.add_exit_error_expectation("broken.mp4", vec![], 1);
    let transcoder = FfmpegTranscoder::new(spawner);

    let cli = Cli::try_parse_from(sweep_args(input_dir.path(), output_dir.path()))?;
    let code = run_with(&cli, &probe, &transcoder)?;

    assert_eq!(code, EXIT_FILE_FAILURES);
    assert_eq!(code, 2);
    assert!(!output_dir.path().join("broken.mp4").exists());
    // The failure did not stop the compliant file from being copied
    assert!(output_dir.path().join("fine.mp4").exists());
    Ok(())
}

#[test]
fn test_clean_run_exits_with_zero() -> Result<(), Box<dyn Error>> {
    let input_dir = tempdir()?;
    let output_dir = tempdir()?;
    let movie = input_dir.path().join("movie.mkv");
    fs::write(&movie, "dummy content")?;

    let probe = MockMediaProbe::new();
    probe.expect_profile(&movie, CodecProfile::new("hevc", "aac"));
    let spawner = MockFfmpegSpawner::new();
    spawner.add_success_expectation("movie.mp4", vec![], true);
    let transcoder = FfmpegTranscoder::new(spawner);

    let cli = Cli::try_parse_from(sweep_args(input_dir.path(), output_dir.path()))?;
    assert_eq!(run_with(&cli, &probe, &transcoder)?, EXIT_OK);
    assert!(output_dir.path().join("movie.mp4").exists());
    Ok(())
}
