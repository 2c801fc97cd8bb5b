use std::{ffi::OsString, path::Path, time::Duration};

use crate::{
    exec::{run_tool, FfmpegTool},
    FfmpegError,
};

// Encoding a long video is legitimately slow, so the render timeout is much
// more generous than the probe/extract timeouts.
const RENDER_TIMEOUT_SECS: u64 = 3600;

/// Run a single ffmpeg encode of `src_path` into `dest_path`.
///
/// `filter_graph` is passed verbatim as the `-vf` argument when present.
/// `output_args` is a flattened list of additional output arguments (e.g.
/// `["-c:v", "libx264", "-crf", "23"]`) placed before the destination path.
/// The destination is overwritten if it already exists (`-y`).
///
/// On a nonzero exit status the returned [`FfmpegError::FfmpegInternal`]
/// carries the exit code and the truncated stderr diagnostic.
pub fn render(
    src_path: &Path,
    filter_graph: Option<&str>,
    output_args: &[String],
    dest_path: &Path,
) -> Result<(), FfmpegError> {
    let mut args = vec![
        OsString::from("-hide_banner"),
        OsString::from("-loglevel"),
        OsString::from("error"),
        OsString::from("-nostats"),
        OsString::from("-y"),
        OsString::from("-i"),
        OsString::from(src_path),
    ];

    if let Some(graph) = filter_graph {
        args.push(OsString::from("-vf"));
        args.push(OsString::from(graph));
    }

    args.extend(output_args.iter().map(OsString::from));
    args.push(OsString::from(dest_path));

    run_tool(
        FfmpegTool::Ffmpeg,
        &args,
        Duration::from_secs(RENDER_TIMEOUT_SECS),
    )
    .map(|_output| ())
}
