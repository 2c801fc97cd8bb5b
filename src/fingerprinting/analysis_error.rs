use std::path::PathBuf;

use ffmpeg_render_utils::FfmpegError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for the various reasons a fingerprint could not be computed.
///
/// Note that per-sample frame extraction failure is NOT represented here:
/// it degrades the sample sequence (logged and skipped) but never fails an
/// analysis.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum AnalysisError {
    /// Ffprobe could not read container metadata (missing file, corrupt or
    /// undecodable input).
    #[error("failed to probe {src_path}: {error}")]
    Probe { src_path: PathBuf, error: FfmpegError },

    /// An IO error occurred while streaming the file through the exact-hash
    /// digest.
    #[error("io error while hashing {src_path}: {error}")]
    Io { src_path: PathBuf, error: String },
}
