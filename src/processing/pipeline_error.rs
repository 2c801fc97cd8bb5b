use std::path::PathBuf;

use ffmpeg_render_utils::FfmpegError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for the various reasons a pipeline run could not produce an
/// output file.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PipelineError {
    /// The source file is missing or unreadable. Propagated without retry.
    #[error("cannot read source {src_path}: {error}")]
    Io { src_path: PathBuf, error: String },

    /// A step could not construct a valid graph node from its parameters.
    /// Raised before the render stage is ever invoked, so a bad
    /// configuration never wastes an encode.
    #[error("invalid step configuration: {0}")]
    Configuration(String),

    /// The render invocation failed (bad filter graph, encoder rejection,
    /// or a nonzero ffmpeg exit). Carries the underlying diagnostic.
    #[error("render failed for {src_path}: {error}")]
    Render { src_path: PathBuf, error: FfmpegError },
}
