use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Various causes of failure for ffmpeg/ffprobe functions.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum FfmpegError {
    /// Ffmpeg/Ffprobe command was not found. Make sure Ffmpeg is installed and can be found on the command line.
    #[error("ffmpeg/ffprobe file not found. Make sure ffmpeg/ffprobe are installed and visible on the command line")]
    FfmpegNotFound,

    /// Io error occurred while executing Ffmpeg/Ffprobe command
    #[error("Ffmpeg IO error: {0}")]
    Io(String),

    /// Ffmpeg/Ffprobe returned a nonzero exit code. Because ffmpeg sometimes prints long error strings
    /// to stderr, the resulting string contains the first few hundred characters of the error message.
    #[error("Ffmpeg failure (exit code {exit_code:?}): {stderr}")]
    FfmpegInternal {
        exit_code: Option<i32>,
        stderr: String,
    },

    /// Failed to interpret Ffmpeg/Ffprobe output as a utf8-string.
    #[error("utf8 parsing/conversion failure")]
    Utf8Conversion,

    /// The subprocess did not complete within the allowed time.
    #[error("ffmpeg/ffprobe timed out after {0} seconds")]
    Timeout(u64),

    /// The probed X or Y dimension of the video was zero.
    /// Note: This sometimes occurs when attempting to decode frames from an audio file.
    #[error("video stream has invalid resolution")]
    InvalidResolution,

    /// Ffmpeg exited successfully but produced no (or truncated) frame data.
    #[error("ffmpeg decoded no frame data")]
    NoFrameDecoded,

    /// Failed to parse the output of ffprobe.
    #[error("failed to parse ffprobe output: {0}")]
    Probe(#[from] ProbeDataError),
}

/// Failures while interpreting ffprobe's JSON output.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ProbeDataError {
    #[error("ffprobe output was not valid json: {0}")]
    Json(String),

    #[error("bad numeric field in ffprobe output: {0}")]
    Numeric(String),
}

impl From<serde_json::Error> for ProbeDataError {
    fn from(e: serde_json::Error) -> Self {
        //limit maximum number of characters
        let error_string = format!("{e}").chars().take(500).collect::<String>();
        ProbeDataError::Json(error_string)
    }
}

impl From<std::num::ParseIntError> for ProbeDataError {
    fn from(e: std::num::ParseIntError) -> Self {
        ProbeDataError::Numeric(format!("{e}"))
    }
}

impl From<std::num::ParseFloatError> for ProbeDataError {
    fn from(e: std::num::ParseFloatError) -> Self {
        ProbeDataError::Numeric(format!("{e}"))
    }
}
