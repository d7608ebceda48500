// vidsweep-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

use super::{FfmpegProcess, FfmpegRun, FfmpegSpawner, MediaProbe};
use crate::error::{CoreError, CoreResult};
use crate::media::CodecProfile;

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

/// Builds an `ExitStatus` carrying `code`.
pub fn exit_status(code: i32) -> ExitStatus {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        // wait(2) encodes the exit code in the high byte
        ExitStatus::from_raw(code << 8)
    }
    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(code as u32)
    }
}

/// Mock implementation of FfmpegProcess.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events replayed when the process is finished.
    pub events_to_emit: Rc<RefCell<Vec<FfmpegEvent>>>,
    /// Exit status the finished run reports.
    pub exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn finish(self) -> CoreResult<FfmpegRun> {
        let events = self.events_to_emit.borrow().clone();
        Ok(FfmpegRun::from_events(events, self.exit_status))
    }
}

/// Represents an expected ffmpeg command call and its mock result.
pub struct MockFfmpegExpectation {
    pub arg_pattern: String,
    pub result: CoreResult<MockFfmpegProcess>,
    pub create_dummy_output: bool,
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
///
/// Each spawn consumes the first expectation whose pattern is contained in
/// one of the command's arguments. A spawn with no matching expectation
/// panics, so tests fail loudly on unexpected invocations.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Rc<RefCell<Vec<MockFfmpegExpectation>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(
        &self,
        arg_pattern: &str,
        result: CoreResult<MockFfmpegProcess>,
        create_dummy_output: bool,
    ) {
        self.expectations.borrow_mut().push(MockFfmpegExpectation {
            arg_pattern: arg_pattern.to_string(),
            result,
            create_dummy_output,
        });
    }

    pub fn add_success_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        create_dummy_output: bool,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            exit_status: exit_status(0),
        };
        self.add_expectation(arg_pattern, Ok(process), create_dummy_output);
    }

    pub fn add_spawn_error_expectation(&self, arg_pattern: &str, error: CoreError) {
        self.add_expectation(arg_pattern, Err(error), false);
    }

    pub fn add_exit_error_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        exit_code: i32,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            exit_status: exit_status(exit_code),
        };
        self.add_expectation(arg_pattern, Ok(process), false);
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args.clone());

        let mut expectations = self.expectations.borrow_mut();
        let found_index = expectations
            .iter()
            .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));

        let Some(index) = found_index else {
            panic!("MockFfmpegSpawner: No expectation found for command args: {args:?}");
        };

        let expectation = expectations.remove(index);
        log::debug!(
            "MockFfmpegSpawner: Matched expectation with pattern '{}'",
            expectation.arg_pattern
        );

        if expectation.result.is_ok() && expectation.create_dummy_output {
            if let Some(output_path) = args.last().map(PathBuf::from) {
                if let Err(e) = std::fs::write(&output_path, b"mock transcode output") {
                    log::error!(
                        "MockFfmpegSpawner failed to create dummy output file {}: {e}",
                        output_path.display()
                    );
                }
            }
        }
        expectation.result
    }
}

/// Mock implementation of MediaProbe returning canned profiles.
///
/// Paths without a canned profile probe as an error, the same as a file
/// ffprobe cannot read.
#[derive(Clone, Default)]
pub struct MockMediaProbe {
    profiles: Rc<RefCell<HashMap<PathBuf, CodecProfile>>>,
    probed: Rc<RefCell<Vec<PathBuf>>>,
}

impl MockMediaProbe {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn expect_profile(&self, input_path: &Path, profile: CodecProfile) {
        self.profiles
            .borrow_mut()
            .insert(input_path.to_path_buf(), profile);
    }

    /// Every path passed to `probe_codecs`, in call order.
    pub fn probed_paths(&self) -> Vec<PathBuf> {
        self.probed.borrow().clone()
    }
}

impl MediaProbe for MockMediaProbe {
    fn probe_codecs(&self, input_path: &Path) -> CoreResult<CodecProfile> {
        self.probed.borrow_mut().push(input_path.to_path_buf());
        self.profiles
            .borrow()
            .get(input_path)
            .cloned()
            .ok_or_else(|| {
                CoreError::FfprobeParse(format!(
                    "MockMediaProbe: No profile set for path {}",
                    input_path.display()
                ))
            })
    }
}
