//! Decides what a file needs: nothing, a plain copy, or a transcode.
//!
//! Everything here is pure. The engine performs the side effects a
//! [`Decision`] calls for.

use crate::config::TranscodeConfig;
use crate::media::{CodecProfile, FileTask, StreamAction, StreamActionPlan};

use serde::Serialize;
use std::fmt;

/// Why a file was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// The extension is on the excluded list; the file was never probed.
    ExcludedExtension,
    /// The probe found no video or no audio stream.
    NotProbeableMedia,
    /// Discovery mode found nothing to change.
    AlreadyCompliant,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::ExcludedExtension => "excluded-extension",
            SkipReason::NotProbeableMedia => "not-probeable-media",
            SkipReason::AlreadyCompliant => "already-compliant",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dimension on which a file fails the allow-lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplianceIssue {
    VideoCodec(String),
    AudioCodec(String),
    Container(String),
}

impl fmt::Display for ComplianceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceIssue::VideoCodec(codec) => write!(f, "has {codec} video"),
            ComplianceIssue::AudioCodec(codec) => write!(f, "has {codec} audio"),
            ComplianceIssue::Container(extension) => write!(f, "is in {extension} format"),
        }
    }
}

/// What the engine should do with a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Skip(SkipReason),
    /// Already compliant; copy it to the output directory (or leave it, in place).
    CopyOnly,
    /// Needs conversion with the given per-stream plan.
    Transcode {
        plan: StreamActionPlan,
        issues: Vec<ComplianceIssue>,
    },
    /// Discovery mode: needs conversion, report only.
    Flag {
        plan: StreamActionPlan,
        reason: String,
    },
}

/// Copy each stream whose codec is allowed, convert the rest.
pub fn plan_streams(video_codec: &str, audio_codec: &str, config: &TranscodeConfig) -> StreamActionPlan {
    let action = |allowed: bool| {
        if allowed {
            StreamAction::Copy
        } else {
            StreamAction::Convert
        }
    };
    StreamActionPlan {
        video: action(config.video_codec_allowed(video_codec)),
        audio: action(config.audio_codec_allowed(audio_codec)),
    }
}

/// Lists the failing dimensions in fixed order: video, audio, container.
pub fn compliance_issues(
    video_codec: &str,
    audio_codec: &str,
    extension: &str,
    config: &TranscodeConfig,
) -> Vec<ComplianceIssue> {
    let mut issues = Vec::new();
    if !config.video_codec_allowed(video_codec) {
        issues.push(ComplianceIssue::VideoCodec(video_codec.to_string()));
    }
    if !config.audio_codec_allowed(audio_codec) {
        issues.push(ComplianceIssue::AudioCodec(audio_codec.to_string()));
    }
    if !config.container_allowed(extension) {
        issues.push(ComplianceIssue::Container(extension.to_string()));
    }
    issues
}

/// Joins issues into a sentence fragment, e.g. `has hevc video and is in avi format`.
pub fn describe_issues(issues: &[ComplianceIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" and ")
}

/// Classifies a probed file.
///
/// The excluded-extension check comes first so that a caller holding no
/// profile yet can skip probing; the engine checks it before probing too.
pub fn classify(task: &FileTask, profile: &CodecProfile, config: &TranscodeConfig) -> Decision {
    if config.is_excluded(task.extension()) {
        return Decision::Skip(SkipReason::ExcludedExtension);
    }

    let Some((video_codec, audio_codec)) = profile.codecs() else {
        return Decision::Skip(SkipReason::NotProbeableMedia);
    };

    let plan = plan_streams(video_codec, audio_codec, config);
    let issues = compliance_issues(video_codec, audio_codec, task.extension(), config);

    if issues.is_empty() {
        return if config.discovery() {
            Decision::Skip(SkipReason::AlreadyCompliant)
        } else {
            Decision::CopyOnly
        };
    }

    if config.discovery() {
        Decision::Flag {
            plan,
            reason: describe_issues(&issues),
        }
    } else {
        Decision::Transcode { plan, issues }
    }
}
