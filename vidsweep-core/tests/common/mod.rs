// vidsweep-core/tests/common/mod.rs
//
// Shared fakes for the engine integration tests.

#![allow(dead_code)]

use vidsweep_core::error::{CoreError, CoreResult};
use vidsweep_core::external::{EncodeTargets, MediaProbe};
use vidsweep_core::media::{CodecProfile, StreamActionPlan};
use vidsweep_core::processing::{TranscodeResult, Transcoder};

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Creates `dir/name` with some placeholder bytes.
pub fn create_dummy_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).expect("Failed to create dummy file");
    file.write_all(b"dummy content")
        .expect("Failed to write dummy content");
    path
}

/// Probe answering from a table keyed by file name. Unknown names fail.
#[derive(Default)]
pub struct FakeProbe {
    profiles: HashMap<String, CodecProfile>,
    calls: RefCell<Vec<PathBuf>>,
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, file_name: &str, video: &str, audio: &str) -> Self {
        self.profiles
            .insert(file_name.to_string(), CodecProfile::new(video, audio));
        self
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }
}

impl MediaProbe for FakeProbe {
    fn probe_codecs(&self, input_path: &Path) -> CoreResult<CodecProfile> {
        self.calls.borrow_mut().push(input_path.to_path_buf());
        let name = input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.profiles
            .get(&name)
            .cloned()
            .ok_or_else(|| CoreError::FfprobeParse(format!("no streams in {name}")))
    }
}

/// One recorded transcode request.
#[derive(Debug, Clone)]
pub struct TranscodeCall {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub plan: StreamActionPlan,
}

/// Transcoder that writes a marker file instead of running ffmpeg.
///
/// Refuses existing destinations like `ffmpeg -n`. Sources whose file name is
/// listed in `failing` report an engine failure without writing anything.
#[derive(Default)]
pub struct FakeTranscoder {
    calls: RefCell<Vec<TranscodeCall>>,
    failing: Vec<String>,
}

impl FakeTranscoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(file_name: &str) -> Self {
        Self {
            calls: RefCell::default(),
            failing: vec![file_name.to_string()],
        }
    }

    pub fn calls(&self) -> Vec<TranscodeCall> {
        self.calls.borrow().clone()
    }
}

impl Transcoder for FakeTranscoder {
    fn transcode(
        &self,
        source: &Path,
        destination: &Path,
        plan: &StreamActionPlan,
        _targets: &EncodeTargets,
    ) -> TranscodeResult {
        self.calls.borrow_mut().push(TranscodeCall {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            plan: *plan,
        });

        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.failing.contains(&name) {
            return TranscodeResult::EngineFailure(format!("cannot decode {name}"));
        }
        if destination.exists() {
            return TranscodeResult::Conflict(destination.to_path_buf());
        }
        match fs::write(destination, b"transcoded") {
            Ok(()) => TranscodeResult::Success(destination.to_path_buf()),
            Err(e) => TranscodeResult::EngineFailure(e.to_string()),
        }
    }
}
