use serde::Serialize;

/// Primary video and audio codec of a file, as reported by the probe.
///
/// Either value being absent marks the file as not processable media.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodecProfile {
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
}

impl CodecProfile {
    pub fn new(video_codec: impl Into<String>, audio_codec: impl Into<String>) -> Self {
        Self {
            video_codec: Some(video_codec.into()),
            audio_codec: Some(audio_codec.into()),
        }
    }

    /// Both codecs, or `None` when either stream is missing.
    pub fn codecs(&self) -> Option<(&str, &str)> {
        match (self.video_codec.as_deref(), self.audio_codec.as_deref()) {
            (Some(video), Some(audio)) => Some((video, audio)),
            _ => None,
        }
    }
}

/// What happens to one stream during a transcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StreamAction {
    /// Pass the stream through unchanged.
    Copy,
    /// Re-encode to the configured target codec.
    Convert,
}

impl StreamAction {
    /// Value handed to ffmpeg's `-c:v` / `-c:a` for this action.
    pub fn codec_arg<'a>(&self, target_codec: &'a str) -> &'a str {
        match self {
            StreamAction::Copy => "copy",
            StreamAction::Convert => target_codec,
        }
    }
}

/// Per-stream actions for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreamActionPlan {
    pub video: StreamAction,
    pub audio: StreamAction,
}

impl StreamActionPlan {
    /// True when neither stream needs re-encoding.
    pub fn is_copy_only(&self) -> bool {
        self.video == StreamAction::Copy && self.audio == StreamAction::Copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codecs_requires_both_streams() {
        assert_eq!(
            CodecProfile::new("h264", "aac").codecs(),
            Some(("h264", "aac"))
        );
        let video_only = CodecProfile {
            video_codec: Some("h264".to_string()),
            audio_codec: None,
        };
        assert_eq!(video_only.codecs(), None);
        assert_eq!(CodecProfile::default().codecs(), None);
    }

    #[test]
    fn test_codec_arg() {
        assert_eq!(StreamAction::Copy.codec_arg("h264"), "copy");
        assert_eq!(StreamAction::Convert.codec_arg("h264"), "h264");
    }
}
