use std::{ffi::OsString, path::Path, time::Duration};

use image::GrayImage;

use crate::{
    exec::{run_tool, FfmpegTool},
    FfmpegError,
};

const EXTRACT_TIMEOUT_SECS: u64 = 60;

/// Decode a single frame of `src_path` at `timestamp_secs`, scaled to an
/// `edge`×`edge` grayscale image.
///
/// The frame is read as rawvideo from ffmpeg's stdout, so no intermediate
/// file is written. Seeking uses `-ss` before `-i` (keyframe-accurate and
/// fast, which is what a perceptual sampler wants).
pub fn extract_frame_gray(
    src_path: &Path,
    timestamp_secs: u32,
    edge: u32,
) -> Result<GrayImage, FfmpegError> {
    if edge == 0 {
        return Err(FfmpegError::InvalidResolution);
    }

    #[rustfmt::skip]
    let args = [
        OsString::from("-hide_banner"),
        OsString::from("-loglevel"),  OsString::from("error"),
        OsString::from("-nostats"),
        OsString::from("-ss"),        OsString::from(timestamp_secs.to_string()),
        OsString::from("-i"),         OsString::from(src_path),
        OsString::from("-frames:v"),  OsString::from("1"),
        OsString::from("-vf"),        OsString::from(format!("scale={edge}:{edge}")),
        OsString::from("-pix_fmt"),   OsString::from("gray"),
        OsString::from("-f"),         OsString::from("rawvideo"),
        OsString::from("-"),
    ];

    let output = run_tool(
        FfmpegTool::Ffmpeg,
        &args,
        Duration::from_secs(EXTRACT_TIMEOUT_SECS),
    )?;

    let expected_len = edge as usize * edge as usize;
    if output.stdout.len() < expected_len {
        return Err(FfmpegError::NoFrameDecoded);
    }

    let mut raw_buf = output.stdout;
    raw_buf.truncate(expected_len);

    GrayImage::from_raw(edge, edge, raw_buf).ok_or(FfmpegError::NoFrameDecoded)
}
