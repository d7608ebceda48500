// ============================================================================
// vidsweep-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: Launching ffmpeg and Collecting What It Reported
//
// A conversion is fire-and-wait: ffmpeg is started, its event stream is
// drained until it exits, and only the exit status plus the error lines are
// kept. `FfmpegRun` is that residue; the transcoder classifies it without
// ever touching the event stream itself.
//
// KEY COMPONENTS:
// - FfmpegRun: Exit status and error output of one finished run
// - FfmpegProcess / FfmpegSpawner: Seams the transcoder and its tests use
// - SidecarSpawner: Implementation backed by ffmpeg-sidecar

use crate::error::{CoreResult, command_failed_error, command_start_error, command_wait_error};

use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::process::ExitStatus;

/// ffmpeg's message when `-n` refuses to replace an output file.
const EXISTING_OUTPUT_MARKER: &str = "already exists";

/// Exit status and error output of a finished ffmpeg run.
#[derive(Debug, Clone)]
pub struct FfmpegRun {
    pub status: ExitStatus,
    pub error_lines: Vec<String>,
}

impl FfmpegRun {
    /// Builds a run by draining `events` and pairing them with `status`.
    pub fn from_events<I>(events: I, status: ExitStatus) -> Self
    where
        I: IntoIterator<Item = FfmpegEvent>,
    {
        let mut run = Self {
            status,
            error_lines: Vec::new(),
        };
        for event in events {
            run.observe(event);
        }
        run
    }

    fn observe(&mut self, event: FfmpegEvent) {
        match event {
            FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, line) | FfmpegEvent::Error(line) => {
                log::debug!("ffmpeg: {line}");
                self.error_lines.push(line);
            }
            FfmpegEvent::Progress(progress) => {
                log::trace!("ffmpeg progress: time={} speed={}x", progress.time, progress.speed);
            }
            _ => {}
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status.success()
    }

    /// True when ffmpeg stopped because the output file was already there.
    pub fn refused_existing_output(&self) -> bool {
        self.error_lines
            .iter()
            .any(|line| line.contains(EXISTING_OUTPUT_MARKER))
    }

    /// One-line description of a failed run for the report.
    pub fn failure_detail(&self) -> String {
        if self.error_lines.is_empty() {
            format!("ffmpeg exited with {}", self.status)
        } else {
            format!("ffmpeg exited with {}: {}", self.status, self.error_lines.join("\n"))
        }
    }
}

/// A started ffmpeg process that can be run to completion.
pub trait FfmpegProcess {
    /// Blocks until ffmpeg exits, keeping only its status and error lines.
    fn finish(self) -> CoreResult<FfmpegRun>;
}

/// Starts ffmpeg processes from prepared commands.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

/// A running ffmpeg-sidecar child.
pub struct SidecarProcess(FfmpegChild);

impl FfmpegProcess for SidecarProcess {
    fn finish(mut self) -> CoreResult<FfmpegRun> {
        let events = self.0.iter().map_err(|e| {
            command_failed_error("ffmpeg", ExitStatus::default(), format!("no event stream: {e}"))
        })?;
        // The iterator ends when ffmpeg closes its output, so the wait below
        // only reaps the child.
        let collected: Vec<FfmpegEvent> = events.collect();
        let status = self.0.wait().map_err(|e| command_wait_error("ffmpeg", e))?;
        Ok(FfmpegRun::from_events(collected, status))
    }
}

/// [`FfmpegSpawner`] backed by the `ffmpeg-sidecar` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<SidecarProcess> {
        log::debug!("Starting ffmpeg: {cmd:?}");
        match cmd.spawn() {
            Ok(child) => Ok(SidecarProcess(child)),
            Err(e) => Err(command_start_error("ffmpeg", e)),
        }
    }
}
